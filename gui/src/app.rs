use glyphmask::processor::DEFAULT_CANVAS_SIZE;
use glyphmask::{
    Color, ConvertConfig, GlyphRamp, ImageTarget, RenderSummary, convert_with_config,
    prepare_canvas,
};
use image::RgbaImage;
use log::{info, warn};
use std::time::Instant;

/// Main application state for the glyphmask GUI
pub struct GlyphmaskApp {
    /// Loaded image, fitted onto the working canvas
    canvas: Option<RgbaImage>,
    /// File name of the loaded image
    file_name: Option<String>,
    /// Rendered ASCII art, same size as the canvas
    output_image: Option<RgbaImage>,
    /// Conversion settings
    config: ConvertConfig,
    /// Editable copy of the glyph ramp
    ramp_text: String,

    /// Texture handle for input image display
    input_texture: Option<egui::TextureHandle>,
    /// Texture handle for output image display
    output_texture: Option<egui::TextureHandle>,

    /// Whether to automatically reprocess when parameters change
    auto_process: bool,
    /// Flag indicating parameters have changed and reprocessing is needed
    needs_reprocess: bool,

    /// Last processing time in milliseconds
    last_process_time_ms: f64,
    /// Grid statistics from the last conversion
    last_summary: Option<RenderSummary>,
    /// Error message to display (if any)
    error_message: Option<String>,
}

impl Default for GlyphmaskApp {
    fn default() -> Self {
        let config = ConvertConfig::default();
        let ramp_text = config.ramp.glyphs().iter().collect();
        Self {
            canvas: None,
            file_name: None,
            output_image: None,
            config,
            ramp_text,
            input_texture: None,
            output_texture: None,
            auto_process: true,
            needs_reprocess: false,
            last_process_time_ms: 0.0,
            last_summary: None,
            error_message: None,
        }
    }
}

impl GlyphmaskApp {
    /// Create a new glyphmask application
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    /// Load an image from file path and fit it onto the working canvas
    pub fn load_image(&mut self, path: &std::path::Path) {
        match image::open(path) {
            Ok(img) => {
                let rgba = img.to_rgba8();
                let (canvas, was_resized) = prepare_canvas(&rgba, DEFAULT_CANVAS_SIZE);
                info!(
                    "loaded {} ({}x{}, canvas {}x{}, resized: {})",
                    path.display(),
                    rgba.width(),
                    rgba.height(),
                    canvas.width(),
                    canvas.height(),
                    was_resized
                );

                self.file_name = path.file_name().map(|n| n.to_string_lossy().into_owned());
                self.canvas = Some(canvas);
                self.output_image = None;
                self.input_texture = None; // Clear old texture
                self.output_texture = None;
                self.needs_reprocess = true;
                self.error_message = None;
            }
            Err(e) => {
                warn!("failed to load {}: {}", path.display(), e);
                self.error_message = Some(format!("Failed to load image: {}", e));
            }
        }
    }

    /// Save the output image to file
    pub fn save_output(&self, path: &std::path::Path) -> Result<(), String> {
        match &self.output_image {
            Some(img) => {
                img.save(path).map_err(|e| format!("Failed to save: {}", e))?;
                info!("saved {}", path.display());
                Ok(())
            }
            None => Err("No output image to save".to_string()),
        }
    }

    /// Forget the current image
    fn clear(&mut self) {
        self.canvas = None;
        self.file_name = None;
        self.output_image = None;
        self.input_texture = None;
        self.output_texture = None;
        self.last_summary = None;
        self.needs_reprocess = false;
    }

    /// Process the canvas with current configuration
    fn process(&mut self) {
        let Some(ref canvas) = self.canvas else {
            return;
        };

        let start = Instant::now();
        let (width, height) = canvas.dimensions();
        let mut target = ImageTarget::new(width, height);

        match convert_with_config(canvas, &mut target, width, height, &self.config) {
            Ok(summary) => {
                self.last_process_time_ms = start.elapsed().as_secs_f64() * 1000.0;
                info!(
                    "converted in {:.1} ms, {} glyphs",
                    self.last_process_time_ms, summary.glyphs_drawn
                );
                self.output_image = Some(target.into_image());
                self.output_texture = None; // Clear old texture
                self.last_summary = Some(summary);
                self.needs_reprocess = false;
                self.error_message = None;
            }
            Err(e) => {
                self.error_message = Some(format!("Invalid config: {}", e));
                self.needs_reprocess = false;
            }
        }
    }

    /// Render the control panel UI
    fn render_controls(&mut self, ui: &mut egui::Ui) -> bool {
        let mut changed = false;

        ui.heading("Controls");
        ui.separator();

        ui.collapsing("Grid", |ui| {
            changed |= ui
                .add(egui::Slider::new(&mut self.config.target_width, 10..=300).text("Columns"))
                .on_hover_text("Glyph columns; rows follow the image aspect ratio")
                .changed();

            ui.label("Glyph ramp (dark to light)");
            if ui.text_edit_singleline(&mut self.ramp_text).changed() {
                self.config.ramp = GlyphRamp::new(&self.ramp_text);
                changed = true;
            }
        });

        ui.add_space(8.0);

        ui.collapsing("Background Detection", |ui| {
            changed |= ui
                .add(egui::Slider::new(&mut self.config.border_size, 1..=50).text("Border Strip"))
                .on_hover_text("Width of the edge strip sampled for noise")
                .changed();

            changed |= ui
                .add(egui::Slider::new(&mut self.config.min_threshold, 0.0..=120.0).text("Min Threshold"))
                .on_hover_text("Lowest color distance the fill will tolerate")
                .changed();

            changed |= ui
                .add(egui::Slider::new(&mut self.config.noise_multiplier, 0.0..=10.0).text("Noise Scale"))
                .on_hover_text("Multiplier on border noise when deriving the tolerance")
                .changed();
        });

        ui.add_space(8.0);

        ui.collapsing("Colors", |ui| {
            let fill = self.config.fill_color;
            let mut rgb = [fill.r, fill.g, fill.b];
            if ui.color_edit_button_srgb(&mut rgb).changed() {
                self.config.fill_color = Color::new(rgb[0], rgb[1], rgb[2]);
                changed = true;
            }
            ui.label("Background Fill");
        });

        ui.add_space(16.0);
        ui.separator();

        // Auto-process toggle
        ui.checkbox(&mut self.auto_process, "Auto-process")
            .on_hover_text("Automatically reprocess when parameters change");

        // Manual process button
        ui.add_enabled_ui(self.canvas.is_some(), |ui| {
            if ui.button("Process").clicked() {
                self.process();
            }
        });

        // Show processing stats
        if self.last_process_time_ms > 0.0 {
            ui.label(format!("Last process: {:.1} ms", self.last_process_time_ms));
        }
        if let Some(summary) = self.last_summary {
            ui.label(format!(
                "Grid {}x{}, {} glyphs",
                summary.layout.target_width, summary.layout.target_height, summary.glyphs_drawn
            ));
        }

        changed
    }

    /// Convert RgbaImage to egui ColorImage
    fn rgba_to_color_image(img: &RgbaImage) -> egui::ColorImage {
        let (width, height) = img.dimensions();
        egui::ColorImage::from_rgba_unmultiplied([width as usize, height as usize], img.as_raw())
    }

    /// Display an image in the UI (standalone helper function)
    fn display_image(
        ui: &mut egui::Ui,
        image: Option<&RgbaImage>,
        texture: &mut Option<egui::TextureHandle>,
        label: &str,
    ) {
        ui.vertical(|ui| {
            ui.heading(label);

            if let Some(img) = image {
                // Update texture if needed
                if texture.is_none() {
                    let color_image = Self::rgba_to_color_image(img);
                    *texture = Some(ui.ctx().load_texture(
                        label,
                        color_image,
                        egui::TextureOptions::NEAREST,
                    ));
                }

                // Display the texture
                if let Some(tex) = texture {
                    let size = tex.size_vec2();
                    let max_size = ui.available_size();
                    let scale = (max_size.x / size.x).min(max_size.y / size.y).min(1.0);
                    let display_size = size * scale;

                    ui.image((tex.id(), display_size));
                    ui.label(format!("{}x{}", img.width(), img.height()));
                }
            } else {
                ui.label("No image loaded");
            }
        });
    }
}

impl eframe::App for GlyphmaskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "gif", "webp"])
                            .pick_file()
                        {
                            self.load_image(&path);
                        }
                        ui.close();
                    }

                    if ui.button("Save Output...").clicked() {
                        let default_name = self
                            .file_name
                            .as_deref()
                            .and_then(|n| n.rsplit_once('.').map(|(stem, _)| stem))
                            .map(|stem| format!("{stem}-ascii.png"))
                            .unwrap_or_else(|| "ascii-art.png".to_string());
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("PNG", &["png"])
                            .set_file_name(default_name)
                            .save_file()
                            && let Err(e) = self.save_output(&path)
                        {
                            self.error_message = Some(e);
                        }
                        ui.close();
                    }

                    if ui.button("Close Image").clicked() {
                        self.clear();
                        ui.close();
                    }

                    ui.separator();

                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.error_message = Some(
                            "glyphmask\nFlood-fill background removal + colored ASCII art\n\nBuilt with Rust + egui".to_string()
                        );
                        ui.close();
                    }
                });
            });
        });

        // Left panel: Controls
        egui::SidePanel::left("control_panel")
            .resizable(true)
            .default_width(250.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let changed = self.render_controls(ui);

                    if changed {
                        self.needs_reprocess = true;
                    }
                });
            });

        // Central panel: Image display
        egui::CentralPanel::default().show(ctx, |ui| {
            // Show error message if any
            if let Some(ref msg) = self.error_message {
                ui.colored_label(egui::Color32::RED, msg);
                if ui.button("Clear Error").clicked() {
                    self.error_message = None;
                }
                ui.separator();
            }

            // Newly loaded images are always converted; edits only when auto-processing
            let fresh = self.output_image.is_none();
            if self.needs_reprocess && self.canvas.is_some() && (self.auto_process || fresh) {
                self.process();
            }

            // Display images side-by-side
            ui.horizontal(|ui| {
                let available_width = ui.available_width();
                let half_width = available_width / 2.0 - 8.0;

                ui.allocate_ui_with_layout(
                    egui::vec2(half_width, ui.available_height()),
                    egui::Layout::top_down(egui::Align::Center),
                    |ui| {
                        let label = self.file_name.as_deref().unwrap_or("Original");
                        Self::display_image(
                            ui,
                            self.canvas.as_ref(),
                            &mut self.input_texture,
                            label,
                        );
                    },
                );

                ui.separator();

                ui.allocate_ui_with_layout(
                    egui::vec2(half_width, ui.available_height()),
                    egui::Layout::top_down(egui::Align::Center),
                    |ui| {
                        Self::display_image(
                            ui,
                            self.output_image.as_ref(),
                            &mut self.output_texture,
                            "ASCII Output",
                        );
                    },
                );
            });
        });
    }
}
