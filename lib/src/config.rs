use crate::color::Color;
use crate::error::{ConfigError, Result};
use crate::ramp::GlyphRamp;

/// Configuration for background-masked ASCII conversion
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Grid
    pub target_width: u32,       // columns, default 120

    /// Background segmentation
    pub border_size: u32,        // noise sampling strip, default 10
    pub min_threshold: f64,      // floor on the fill tolerance, default 30.0
    pub noise_multiplier: f64,   // stddev scale, default 2.5

    /// Rendering
    pub char_aspect: f32,        // glyph width / font size, default 0.6
    pub fill_color: Color,       // default black
    pub ramp: GlyphRamp,         // darkest to lightest
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            // Grid
            target_width: 120,

            // Background segmentation
            border_size: 10,
            min_threshold: 30.0,
            noise_multiplier: 2.5,

            // Rendering
            char_aspect: 0.6,
            fill_color: Color::BLACK,
            ramp: GlyphRamp::default(),
        }
    }
}

impl ConvertConfig {
    /// Validates the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !(1..=1000).contains(&self.target_width) {
            return Err(ConfigError::TargetWidth(self.target_width));
        }
        if !(1..=100).contains(&self.border_size) {
            return Err(ConfigError::BorderSize(self.border_size));
        }
        if !(0.0..=442.0).contains(&self.min_threshold) {
            return Err(ConfigError::MinThreshold(self.min_threshold));
        }
        if !(0.0..=10.0).contains(&self.noise_multiplier) {
            return Err(ConfigError::NoiseMultiplier(self.noise_multiplier));
        }
        if !(0.1..=2.0).contains(&self.char_aspect) {
            return Err(ConfigError::CharAspect(self.char_aspect));
        }
        if self.ramp.is_empty() {
            return Err(ConfigError::EmptyRamp);
        }
        Ok(())
    }
}
