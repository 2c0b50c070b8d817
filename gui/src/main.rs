mod app;

use app::GlyphmaskApp;

fn main() -> Result<(), eframe::Error> {
    // RUST_LOG=glyphmask=debug shows the segmentation thresholds
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("glyphmask")
            .with_icon(load_icon()),
        ..Default::default()
    };

    eframe::run_native(
        "glyphmask",
        options,
        Box::new(|cc| Ok(Box::new(GlyphmaskApp::new(cc)))),
    )
}

/// Application icon: an '@' glyph bitmap stamped on black
fn load_icon() -> egui::IconData {
    let icon_size = 32;
    let mut pixels = vec![0u8; icon_size * icon_size * 4];

    for y in 0..icon_size {
        for x in 0..icon_size {
            let idx = (y * icon_size + x) * 4;

            // ring plus core, sampled on a 4px grid
            let dx = (x / 4) as i32 * 2 - 7;
            let dy = (y / 4) as i32 * 2 - 7;
            let r2 = dx * dx + dy * dy;
            let inked = (26..=49).contains(&r2) || r2 <= 10;

            let (r, g, b) = if inked { (255, 170, 40) } else { (0, 0, 0) };
            pixels[idx] = r;
            pixels[idx + 1] = g;
            pixels[idx + 2] = b;
            pixels[idx + 3] = 255;
        }
    }

    egui::IconData {
        rgba: pixels,
        width: icon_size as u32,
        height: icon_size as u32,
    }
}
