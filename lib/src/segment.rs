use crate::color::{Color, ColorSum};
use crate::config::ConvertConfig;
use image::RgbaImage;
use log::debug;
use std::collections::VecDeque;

/// Per-pixel background classification, same dimensions as the source image
///
/// `true` marks a pixel as background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundMask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl BackgroundMask {
    /// Mask with every pixel set to `value`
    pub fn filled(width: u32, height: u32, value: bool) -> Self {
        Self {
            width,
            height,
            cells: vec![value; width as usize * height as usize],
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Out-of-bounds coordinates read as foreground
    pub fn is_background(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.cells[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.cells[idx] = value;
        }
    }

    pub fn background_count(&self) -> usize {
        self.cells.iter().filter(|&&bg| bg).count()
    }
}

fn pixel(img: &RgbaImage, x: u32, y: u32) -> Color {
    Color::from_rgba(img.get_pixel(x, y))
}

fn corners(width: u32, height: u32) -> [(u32, u32); 4] {
    [
        (0, 0),
        (width - 1, 0),
        (0, height - 1),
        (width - 1, height - 1),
    ]
}

/// Estimate the background color as the rounded mean of the four corners
///
/// Returns black for an empty image.
pub fn estimate_background(img: &RgbaImage) -> Color {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Color::BLACK;
    }

    corners(width, height)
        .into_iter()
        .map(|(x, y)| pixel(img, x, y))
        .collect::<ColorSum>()
        .mean()
        .unwrap_or(Color::BLACK)
}

/// Derive the flood fill tolerance from noise in the image border
///
/// Samples a `border_size` strip along all four edges (top and bottom rows
/// across the full width, left and right columns across the full height,
/// corners counted by both). The spread is the root mean square of each
/// sample's RGB distance to the strip mean:
///
/// `threshold = max(min_threshold, spread * noise_multiplier)`
///
/// Strips wider than the image are clamped to it.
pub fn noise_threshold(img: &RgbaImage, config: &ConvertConfig) -> f64 {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return config.min_threshold;
    }

    let strip_h = config.border_size.min(height);
    let strip_w = config.border_size.min(width);

    let mut samples = Vec::new();
    for x in 0..width {
        for y in 0..strip_h {
            samples.push(pixel(img, x, y));
        }
        for y in (height - strip_h)..height {
            samples.push(pixel(img, x, y));
        }
    }
    for y in 0..height {
        for x in 0..strip_w {
            samples.push(pixel(img, x, y));
        }
        for x in (width - strip_w)..width {
            samples.push(pixel(img, x, y));
        }
    }

    let Some([mr, mg, mb]) = samples.iter().copied().collect::<ColorSum>().mean_f64() else {
        return config.min_threshold;
    };

    let variance = samples
        .iter()
        .map(|c| {
            let dr = c.r as f64 - mr;
            let dg = c.g as f64 - mg;
            let db = c.b as f64 - mb;
            dr * dr + dg * dg + db * db
        })
        .sum::<f64>()
        / samples.len() as f64;

    config.min_threshold.max(variance.sqrt() * config.noise_multiplier)
}

/// Breadth-first region growing from all four corners
///
/// A 4-connected neighbor joins the region only when it lies within
/// `threshold` of both the pixel it is reached from and the global
/// background estimate `bg`. Visited bookkeeping is kept apart from the mask,
/// so a rejected neighbor stays foreground but is never tested twice.
pub fn flood_fill(img: &RgbaImage, bg: Color, threshold: f64) -> BackgroundMask {
    let (width, height) = img.dimensions();
    let mut mask = BackgroundMask::filled(width, height, false);
    if width == 0 || height == 0 {
        return mask;
    }

    let index = |x: u32, y: u32| y as usize * width as usize + x as usize;
    let mut visited = vec![false; width as usize * height as usize];
    let mut queue = VecDeque::new();

    for (x, y) in corners(width, height) {
        if !visited[index(x, y)] {
            visited[index(x, y)] = true;
            queue.push_back((x, y));
        }
    }

    while let Some((x, y)) = queue.pop_front() {
        mask.set(x, y, true);
        let current = pixel(img, x, y);

        let neighbors = [
            (x.checked_add(1), Some(y)),
            (x.checked_sub(1), Some(y)),
            (Some(x), y.checked_add(1)),
            (Some(x), y.checked_sub(1)),
        ];

        for (nx, ny) in neighbors {
            let (Some(nx), Some(ny)) = (nx, ny) else {
                continue;
            };
            if nx >= width || ny >= height || visited[index(nx, ny)] {
                continue;
            }

            let candidate = pixel(img, nx, ny);
            if current.distance(candidate) < threshold && bg.distance(candidate) < threshold {
                visited[index(nx, ny)] = true;
                queue.push_back((nx, ny));
            }
        }
    }

    mask
}

/// Classify every pixel as background or foreground
///
/// The four corners always end up as background.
pub fn segment_background(img: &RgbaImage, config: &ConvertConfig) -> BackgroundMask {
    let bg = estimate_background(img);
    let threshold = noise_threshold(img, config);
    let mask = flood_fill(img, bg, threshold);

    debug!(
        "segment_background: bg=({}, {}, {}) threshold={:.2} background={}/{}",
        bg.r,
        bg.g,
        bg.b,
        threshold,
        mask.background_count(),
        img.width() as usize * img.height() as usize
    );

    mask
}
