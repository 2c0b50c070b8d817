use crate::config::ConvertConfig;
use crate::error::Result;
use crate::raster::ImageTarget;
use crate::render::{RenderSummary, render_glyphs};
use crate::segment::segment_background;
use crate::target::RenderTarget;
use image::{RgbaImage, imageops};
use log::{debug, warn};

/// Longest side of the working canvas the desktop front end converts on
pub const DEFAULT_CANVAS_SIZE: u32 = 1000;

/// Scale (width, height) so the longer side equals `max_side`, keeping the
/// aspect ratio and truncating the shorter side
///
/// Smaller images are scaled up. Zero-area input stays (0, 0).
pub fn fit_within(width: u32, height: u32, max_side: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }
    let (w, h, max) = (width as u64, height as u64, max_side as u64);
    if width > height {
        (max_side, ((max * h) / w).max(1) as u32)
    } else {
        (((max * w) / h).max(1) as u32, max_side)
    }
}

/// Resize an image onto the working canvas used for conversion
///
/// # Returns
/// A tuple of (canvas, was_resized) where was_resized indicates if resizing occurred
pub fn prepare_canvas(input: &RgbaImage, max_side: u32) -> (RgbaImage, bool) {
    let (width, height) = input.dimensions();
    let (target_width, target_height) = fit_within(width, height, max_side);

    if (width, height) == (target_width, target_height) || target_width == 0 {
        return (input.clone(), false);
    }

    let resized = imageops::resize(
        input,
        target_width,
        target_height,
        imageops::FilterType::Triangle,
    );
    (resized, true)
}

/// Converts an image to background-masked ASCII art on `target`
///
/// The pipeline:
/// 1. Estimate the background from the corners and border noise
/// 2. Flood fill the background from the four corners
/// 3. Average the foreground of each grid block
/// 4. Draw the luminance-selected glyph in that average color
///
/// `buffer` is used at the resolution given; scaling it to the output is
/// the caller's job (see [`prepare_canvas`]). Degenerate inputs produce a
/// plain fill with no glyphs.
pub fn convert<T: RenderTarget + ?Sized>(
    buffer: &RgbaImage,
    target: &mut T,
    out_width: u32,
    out_height: u32,
) -> RenderSummary {
    run(buffer, target, out_width, out_height, &ConvertConfig::default())
}

/// Same as [`convert`] with explicit settings
///
/// Invalid settings are reported before anything is drawn.
pub fn convert_with_config<T: RenderTarget + ?Sized>(
    buffer: &RgbaImage,
    target: &mut T,
    out_width: u32,
    out_height: u32,
    config: &ConvertConfig,
) -> Result<RenderSummary> {
    config.validate()?;
    Ok(run(buffer, target, out_width, out_height, config))
}

/// Converts an image onto a fresh raster surface of the same size
pub fn convert_to_image(input: &RgbaImage, config: &ConvertConfig) -> Result<RgbaImage> {
    let (width, height) = input.dimensions();
    let mut target = ImageTarget::new(width, height);
    convert_with_config(input, &mut target, width, height, config)?;
    Ok(target.into_image())
}

fn run<T: RenderTarget + ?Sized>(
    buffer: &RgbaImage,
    target: &mut T,
    out_width: u32,
    out_height: u32,
    config: &ConvertConfig,
) -> RenderSummary {
    let (width, height) = buffer.dimensions();
    if width == 0 || height == 0 {
        warn!("convert: empty source image {}x{}", width, height);
    }

    let mask = segment_background(buffer, config);
    let summary = render_glyphs(buffer, &mask, target, out_width, out_height, config);

    debug!(
        "convert: {}x{} -> {}x{} grid {}x{}, {} glyphs",
        width,
        height,
        out_width,
        out_height,
        summary.layout.target_width,
        summary.layout.target_height,
        summary.glyphs_drawn
    );

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::error::ConfigError;
    use crate::target::{CommandRecorder, DrawCommand};
    use image::Rgba;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn config(target_width: u32) -> ConvertConfig {
        ConvertConfig {
            target_width,
            ..Default::default()
        }
    }

    /// Small photo-like subject: a shaded disc on a slightly noisy backdrop
    fn subject(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            let dx = x as f32 - width as f32 / 2.0;
            let dy = y as f32 - height as f32 / 2.0;
            let r = (dx * dx + dy * dy).sqrt();
            if r < width.min(height) as f32 / 3.0 {
                let shade = (x * 255 / width) as u8;
                Rgba([shade, 64, 255 - shade, 255])
            } else {
                let noise = ((x * 31 + y * 17) % 7) as u8;
                Rgba([240 + noise, 240 + noise, 235 + noise, 255])
            }
        })
    }

    #[test]
    fn test_fit_within_landscape() {
        assert_eq!(fit_within(2000, 1000, 1000), (1000, 500));
        assert_eq!(fit_within(1600, 900, 1000), (1000, 562));
    }

    #[test]
    fn test_fit_within_portrait_and_square() {
        assert_eq!(fit_within(500, 1000, 1000), (500, 1000));
        assert_eq!(fit_within(300, 300, 1000), (1000, 1000));
    }

    #[test]
    fn test_fit_within_extreme_aspect() {
        assert_eq!(fit_within(10_000, 1, 1000), (1000, 1));
        assert_eq!(fit_within(0, 50, 1000), (0, 0));
    }

    #[test]
    fn test_prepare_canvas_resizes() {
        let img = RgbaImage::from_pixel(200, 100, WHITE);
        let (canvas, was_resized) = prepare_canvas(&img, 100);
        assert_eq!(canvas.dimensions(), (100, 50));
        assert!(was_resized);
    }

    #[test]
    fn test_prepare_canvas_no_resize() {
        let img = RgbaImage::from_pixel(100, 40, WHITE);
        let (canvas, was_resized) = prepare_canvas(&img, 100);
        assert_eq!(canvas.dimensions(), (100, 40));
        assert!(!was_resized);
    }

    #[test]
    fn test_uniform_white_draws_nothing() {
        let img = RgbaImage::from_pixel(4, 4, WHITE);
        let mut rec = CommandRecorder::new(4, 4);
        let summary = convert(&img, &mut rec, 4, 4);

        assert_eq!(summary.glyphs_drawn, 0);
        assert!(rec.glyphs().is_empty());
        assert_eq!(rec.commands[0], DrawCommand::SetFillColor(Color::BLACK));

        let mut target = ImageTarget::new(4, 4);
        convert(&img, &mut target, 4, 4);
        assert!(target.image().pixels().all(|p| *p == BLACK));
    }

    #[test]
    fn test_framed_black_center_is_darkest_glyph() {
        let img = RgbaImage::from_fn(10, 10, |x, y| {
            if (2..8).contains(&x) && (2..8).contains(&y) { BLACK } else { WHITE }
        });
        let config = ConvertConfig {
            target_width: 1,
            border_size: 2,
            ..Default::default()
        };
        let mut rec = CommandRecorder::new(10, 10);
        let summary = convert_with_config(&img, &mut rec, 10, 10, &config).unwrap();

        assert_eq!(summary.cells_considered, 1);
        let glyphs = rec.glyphs();
        assert_eq!(glyphs.len(), 1);
        assert_eq!(glyphs[0].glyph, config.ramp.glyphs()[0]);
        assert_eq!(glyphs[0].color, Color::BLACK);
        assert_eq!((glyphs[0].x, glyphs[0].y), (5.0, 5.0));
    }

    #[test]
    fn test_two_by_two_extremes() {
        // Grey backdrop with a black patch in the top-left quadrant and a
        // white patch in the bottom-right one
        let img = RgbaImage::from_fn(16, 16, |x, y| {
            if (2..8).contains(&x) && (2..8).contains(&y) {
                BLACK
            } else if (8..14).contains(&x) && (8..14).contains(&y) {
                WHITE
            } else {
                Rgba([128, 128, 128, 255])
            }
        });
        let config = ConvertConfig {
            target_width: 2,
            border_size: 2,
            ..Default::default()
        };
        let mut rec = CommandRecorder::new(80, 80);
        let summary = convert_with_config(&img, &mut rec, 80, 80, &config).unwrap();

        let ramp = &config.ramp;
        let glyphs = rec.glyphs();
        assert_eq!(summary.cells_considered, 4);
        assert_eq!(glyphs.len(), 2);

        let top_left = glyphs[0];
        assert_eq!((top_left.x, top_left.y), (20.0, 20.0));
        assert_eq!(top_left.glyph, ramp.glyphs()[0]);
        assert_eq!(top_left.color, Color::BLACK);

        let bottom_right = glyphs[1];
        assert_eq!((bottom_right.x, bottom_right.y), (60.0, 60.0));
        assert_eq!(bottom_right.glyph, ramp.glyphs()[ramp.len() - 1]);
        assert_eq!(bottom_right.color, Color::WHITE);
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let img = subject(120, 90);
        let mut first = CommandRecorder::new(600, 450);
        let mut second = CommandRecorder::new(600, 450);
        convert_with_config(&img, &mut first, 600, 450, &config(40)).unwrap();
        convert_with_config(&img, &mut second, 600, 450, &config(40)).unwrap();

        assert!(!first.glyphs().is_empty());
        assert_eq!(first.commands, second.commands);
    }

    #[test]
    fn test_background_is_suppressed() {
        let img = subject(120, 90);
        let mut rec = CommandRecorder::new(120, 90);
        let summary = convert_with_config(&img, &mut rec, 120, 90, &config(40)).unwrap();

        assert_eq!(summary.cells_considered, 40 * 30);
        assert!(summary.glyphs_drawn > 0);
        assert!(summary.glyphs_drawn < summary.cells_considered);
    }

    #[test]
    fn test_empty_source_is_blank() {
        let img = RgbaImage::new(0, 0);
        let mut rec = CommandRecorder::new(50, 50);
        let summary = convert(&img, &mut rec, 50, 50);
        assert_eq!(summary.glyphs_drawn, 0);
        assert_eq!(summary.cells_considered, 0);
    }

    #[test]
    fn test_empty_output_is_blank() {
        let img = subject(30, 30);
        let mut target = ImageTarget::new(0, 0);
        let summary = convert(&img, &mut target, 0, 0);
        assert_eq!(summary.glyphs_drawn, 0);
    }

    #[test]
    fn test_invalid_config_leaves_target_untouched() {
        let img = subject(30, 30);
        let mut rec = CommandRecorder::new(30, 30);
        let result = convert_with_config(&img, &mut rec, 30, 30, &config(0));
        assert_eq!(result, Err(ConfigError::TargetWidth(0)));
        assert!(rec.commands.is_empty());
    }

    #[test]
    fn test_convert_to_image_keeps_dimensions() {
        let img = subject(96, 64);
        let output = convert_to_image(&img, &config(24)).unwrap();
        assert_eq!(output.dimensions(), (96, 64));
        // fill is opaque black, glyphs are colored
        assert!(output.pixels().all(|p| p[3] == 255));
        assert!(output.pixels().any(|p| *p != BLACK));
    }
}
