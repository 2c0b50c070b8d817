//! Brightness-ordered glyph ramp
//!
//! Index 0 is the densest glyph and stands for the darkest cells; the last
//! index is blank and stands for the brightest. Dark pixels therefore come out
//! as heavy glyphs, which is what gives the result its ASCII-art look.

/// Default ramp, densest to blank
pub const DEFAULT_RAMP: &str = "@%#*+=-:. ";

/// Ordered, immutable sequence of glyphs from darkest-looking to lightest-looking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphRamp {
    glyphs: Vec<char>,
}

impl Default for GlyphRamp {
    fn default() -> Self {
        Self::new(DEFAULT_RAMP)
    }
}

impl GlyphRamp {
    pub fn new(glyphs: &str) -> Self {
        Self {
            glyphs: glyphs.chars().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    /// Ramp index for a luminance value
    ///
    /// `floor(L * (len - 1))`, so L = 0.0 maps to index 0 and L = 1.0 to the
    /// last index. Out-of-range input is clamped.
    pub fn index_for(&self, luminance: f64) -> usize {
        let last = self.glyphs.len().saturating_sub(1);
        let lum = if luminance.is_nan() { 0.0 } else { luminance.clamp(0.0, 1.0) };
        ((lum * last as f64).floor() as usize).min(last)
    }

    /// Glyph for a luminance value, `None` only for an empty ramp
    pub fn glyph_for(&self, luminance: f64) -> Option<char> {
        self.glyphs.get(self.index_for(luminance)).copied()
    }
}
