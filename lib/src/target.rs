//! Drawing surface abstraction
//!
//! The renderer only ever talks to a [`RenderTarget`]: a canvas-like surface
//! with a current fill color and text style. [`ImageTarget`](crate::raster::ImageTarget)
//! rasterizes into an `RgbaImage`; [`CommandRecorder`] keeps the call
//! sequence for inspection.

use crate::color::Color;

/// Horizontal text anchor
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Vertical text anchor
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum TextBaseline {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Font and anchoring used by subsequent `fill_text` calls
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub family: String,
    pub bold: bool,
    pub size_px: f32,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

impl TextStyle {
    /// Bold monospace, centered on both axes
    pub fn monospace(size_px: f32) -> Self {
        Self {
            family: "monospace".to_string(),
            bold: true,
            size_px,
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
        }
    }
}

/// A surface the renderer draws onto
///
/// Coordinates are in output pixels. Implementations clip anything outside
/// their own bounds.
pub trait RenderTarget {
    /// Output size in pixels
    fn dimensions(&self) -> (u32, u32);

    /// Color used by `fill_rect` and `fill_text`
    fn set_fill_color(&mut self, color: Color);

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    fn set_text_style(&mut self, style: &TextStyle);

    /// Draw `glyph` anchored at (x, y) according to the current style
    fn fill_text(&mut self, glyph: char, x: f32, y: f32);

    fn set_image_smoothing(&mut self, enabled: bool);
}

/// One recorded call on a [`CommandRecorder`]
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    SetFillColor(Color),
    FillRect { x: f32, y: f32, width: f32, height: f32 },
    SetTextStyle(TextStyle),
    FillText { glyph: char, x: f32, y: f32 },
    SetImageSmoothing(bool),
}

/// A glyph as it lands on the surface
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrawnGlyph {
    pub glyph: char,
    pub color: Color,
    pub x: f32,
    pub y: f32,
}

/// Render target that records every call instead of drawing
#[derive(Clone, Debug, Default)]
pub struct CommandRecorder {
    width: u32,
    height: u32,
    pub commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Drawn glyphs paired with the fill color active at the time
    pub fn glyphs(&self) -> Vec<DrawnGlyph> {
        let mut color = Color::BLACK;
        let mut out = Vec::new();
        for command in &self.commands {
            match *command {
                DrawCommand::SetFillColor(c) => color = c,
                DrawCommand::FillText { glyph, x, y } => out.push(DrawnGlyph { glyph, color, x, y }),
                _ => {}
            }
        }
        out
    }
}

impl RenderTarget for CommandRecorder {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_fill_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetFillColor(color));
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::FillRect { x, y, width, height });
    }

    fn set_text_style(&mut self, style: &TextStyle) {
        self.commands.push(DrawCommand::SetTextStyle(style.clone()));
    }

    fn fill_text(&mut self, glyph: char, x: f32, y: f32) {
        self.commands.push(DrawCommand::FillText { glyph, x, y });
    }

    fn set_image_smoothing(&mut self, enabled: bool) {
        self.commands.push(DrawCommand::SetImageSmoothing(enabled));
    }
}
