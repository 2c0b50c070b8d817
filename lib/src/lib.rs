//! glyphmask - background-masked ASCII art converter
//!
//! Finds the uniform background of an image by flood filling from its four
//! corners, then redraws only the foreground as a grid of colored glyphs
//! picked by brightness.
//!
//! # Example
//! ```no_run
//! use glyphmask::{ImageTarget, convert, prepare_canvas};
//! use image;
//!
//! let photo = image::open("photo.jpg").unwrap().to_rgba8();
//! let (canvas, _) = prepare_canvas(&photo, 1000);
//! let (width, height) = canvas.dimensions();
//!
//! let mut target = ImageTarget::new(width, height);
//! convert(&canvas, &mut target, width, height);
//! target.into_image().save("ascii_art.png").unwrap();
//! ```

pub mod color;
pub mod config;
mod error;
pub mod grid;
pub mod processor;
pub mod ramp;
pub mod raster;
pub mod render;
pub mod segment;
pub mod target;

// Re-export main types for convenience
pub use color::Color;
pub use config::ConvertConfig;
pub use error::{ConfigError, Result};
pub use processor::{convert, convert_to_image, convert_with_config, fit_within, prepare_canvas};
pub use ramp::GlyphRamp;
pub use raster::ImageTarget;
pub use render::RenderSummary;
pub use segment::BackgroundMask;
pub use target::{CommandRecorder, RenderTarget, TextStyle};
