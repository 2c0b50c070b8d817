/// Basic example: Convert a synthetic photo-like image to masked ASCII art
///
/// Draws a shaded ball on an off-white backdrop, then renders only the ball
/// as glyphs and records the drawing calls alongside the PNG output
use glyphmask::{CommandRecorder, ConvertConfig, ImageTarget, convert, convert_with_config};
use image::{Rgba, RgbaImage};

fn main() {
    println!("glyphmask - Basic Example");
    println!("=========================\n");

    let width = 480;
    let height = 360;

    // Off-white backdrop with a little sensor-like noise
    let mut img = RgbaImage::from_fn(width, height, |x, y| {
        let noise = ((x * 131 + y * 71) % 9) as u8;
        Rgba([236 + noise, 232 + noise, 224 + noise, 255])
    });

    // Shaded ball in the center
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let radius = 120.0;

    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;
            let dist = (dx * dx + dy * dy).sqrt();

            if dist < radius {
                // brighter toward the upper left
                let light = 1.0 - ((dx + radius) + (dy + radius)) / (4.0 * radius);
                let shade = (40.0 + 200.0 * light) as u8;
                img.put_pixel(x, y, Rgba([shade, shade / 2, 30, 255]));
            }
        }
    }

    println!("Created test image: {}x{}", width, height);

    let config = ConvertConfig::default();
    println!("Processing with config:");
    println!("  - Grid width: {}", config.target_width);
    println!("  - Border strip: {}px", config.border_size);
    println!("  - Min threshold: {}", config.min_threshold);
    println!();

    // Render to an image
    let mut target = ImageTarget::new(width, height);
    let summary = convert(&img, &mut target, width, height);

    // Same conversion, recorded
    let mut recorder = CommandRecorder::new(width, height);
    convert_with_config(&img, &mut recorder, width, height, &config)
        .expect("default config is valid");

    img.save("basic_input.png").expect("Failed to save input");
    target
        .into_image()
        .save("basic_output.png")
        .expect("Failed to save output");

    println!(
        "Grid {}x{}, {} of {} cells drawn ({} draw calls)",
        summary.layout.target_width,
        summary.layout.target_height,
        summary.glyphs_drawn,
        summary.cells_considered,
        recorder.commands.len()
    );
    println!("✓ Saved input to:  basic_input.png");
    println!("✓ Saved output to: basic_output.png");
    println!("\nASCII conversion complete!");
}
