use crate::color::Color;
use crate::target::{RenderTarget, TextAlign, TextBaseline, TextStyle};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

/// Advance width of the built-in font as a fraction of its pixel size
pub const GLYPH_ASPECT: f32 = 0.6;

/// Cells per side of the built-in glyph bitmaps
const BITMAP_SIZE: f32 = 8.0;

/// Output-space rectangle a glyph bitmap is stretched over
#[derive(Copy, Clone, Debug)]
struct GlyphBox {
    left: f32,
    top: f32,
    width: f32,
    height: f32,
}

/// Render target backed by an `RgbaImage`
///
/// Text is drawn with a small built-in bitmap font covering the default
/// glyph ramp; the requested font family is not looked up. Each glyph is
/// stretched over a box `size_px * GLYPH_ASPECT` wide and `size_px` tall.
pub struct ImageTarget {
    image: RgbaImage,
    fill: Color,
    style: TextStyle,
    smoothing: bool,
}

impl ImageTarget {
    /// Fully transparent surface of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            fill: Color::BLACK,
            style: TextStyle::monospace(10.0),
            smoothing: true,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Fraction of a pixel covered by the glyph, sampled at pixel centers or
    /// on a 2x2 grid when smoothing is enabled
    fn coverage(&self, glyph: char, area: GlyphBox, px: u32, py: u32) -> f32 {
        let offsets: &[f32] = if self.smoothing { &[0.25, 0.75] } else { &[0.5] };
        let mut hits = 0;
        let mut total = 0;

        for &oy in offsets {
            for &ox in offsets {
                total += 1;
                let u = (px as f32 + ox - area.left) / area.width * BITMAP_SIZE;
                let v = (py as f32 + oy - area.top) / area.height * BITMAP_SIZE;
                if !(0.0..BITMAP_SIZE).contains(&u) || !(0.0..BITMAP_SIZE).contains(&v) {
                    continue;
                }
                if glyph_bit(glyph, u as u32, v as u32, self.style.bold) {
                    hits += 1;
                }
            }
        }

        hits as f32 / total as f32
    }

    fn blend(&mut self, x: u32, y: u32, coverage: f32) {
        let dst = *self.image.get_pixel(x, y);
        let src = [self.fill.r, self.fill.g, self.fill.b, 255];
        let mix = |s: u8, d: u8| (s as f32 * coverage + d as f32 * (1.0 - coverage)).round() as u8;
        let out = Rgba([
            mix(src[0], dst[0]),
            mix(src[1], dst[1]),
            mix(src[2], dst[2]),
            mix(src[3], dst[3]),
        ]);
        self.image.put_pixel(x, y, out);
    }
}

impl RenderTarget for ImageTarget {
    fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill = color;
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let (img_w, img_h) = self.image.dimensions();
        let x0 = x.round().max(0.0);
        let y0 = y.round().max(0.0);
        let x1 = (x + width).round().min(img_w as f32);
        let y1 = (y + height).round().min(img_h as f32);
        if x1 <= x0 || y1 <= y0 {
            return;
        }

        let rect = Rect::at(x0 as i32, y0 as i32).of_size((x1 - x0) as u32, (y1 - y0) as u32);
        draw_filled_rect_mut(&mut self.image, rect, self.fill.to_rgba());
    }

    fn set_text_style(&mut self, style: &TextStyle) {
        self.style = style.clone();
    }

    fn fill_text(&mut self, glyph: char, x: f32, y: f32) {
        let box_h = self.style.size_px;
        let box_w = box_h * GLYPH_ASPECT;
        if glyph == ' ' || !(box_w > 0.0 && box_h > 0.0) {
            return;
        }

        let left = match self.style.align {
            TextAlign::Left => x,
            TextAlign::Center => x - box_w / 2.0,
            TextAlign::Right => x - box_w,
        };
        let top = match self.style.baseline {
            TextBaseline::Top => y,
            TextBaseline::Middle => y - box_h / 2.0,
            TextBaseline::Bottom => y - box_h,
        };

        let area = GlyphBox {
            left,
            top,
            width: box_w,
            height: box_h,
        };

        let (img_w, img_h) = self.image.dimensions();
        let px_start = left.floor().max(0.0) as u32;
        let py_start = top.floor().max(0.0) as u32;
        let px_end = ((left + box_w).ceil().max(0.0) as u32).min(img_w);
        let py_end = ((top + box_h).ceil().max(0.0) as u32).min(img_h);

        for py in py_start..py_end {
            for px in px_start..px_end {
                let coverage = self.coverage(glyph, area, px, py);
                if coverage > 0.0 {
                    self.blend(px, py, coverage);
                }
            }
        }
    }

    fn set_image_smoothing(&mut self, enabled: bool) {
        self.smoothing = enabled;
    }
}

/// Whether bitmap cell (x, y) of an 8x8 glyph is inked
///
/// Bold glyphs also ink the cell to the right of every stroke.
fn glyph_bit(ch: char, x: u32, y: u32, bold: bool) -> bool {
    bitmap_bit(ch, x, y) || (bold && x > 0 && bitmap_bit(ch, x - 1, y))
}

fn bitmap_bit(ch: char, x: u32, y: u32) -> bool {
    match ch {
        ' ' => false,

        '.' => (3..=4).contains(&x) && y >= 6,

        ':' => (3..=4).contains(&x) && (y == 2 || y == 5),

        '-' => y == 3 || y == 4,

        '=' => y == 2 || y == 5,

        '+' => (3..=4).contains(&x) && (1..=6).contains(&y) || (3..=4).contains(&y) && (1..=6).contains(&x),

        '*' => {
            let bar = (x == 3 || x == 4) || (y == 3 || y == 4);
            let cross = x == y || x == 7 - y;
            (1..=6).contains(&x) && (1..=6).contains(&y) && (bar || cross)
        }

        '#' => x == 2 || x == 5 || y == 2 || y == 5,

        '%' => x + y == 7 || (x <= 1 && y <= 1) || (x >= 6 && y >= 6),

        '@' => {
            let dx = x as i32 * 2 - 7;
            let dy = y as i32 * 2 - 7;
            let r2 = dx * dx + dy * dy;
            // ring plus a solid core
            (26..=49).contains(&r2) || r2 <= 10
        }

        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::new(255, 0, 0);

    fn solid(target: &ImageTarget, color: Color) -> usize {
        target
            .image()
            .pixels()
            .filter(|p| **p == color.to_rgba())
            .count()
    }

    #[test]
    fn test_fill_rect_covers_surface() {
        let mut target = ImageTarget::new(16, 8);
        target.set_fill_color(Color::BLACK);
        target.fill_rect(0.0, 0.0, 16.0, 8.0);
        assert_eq!(solid(&target, Color::BLACK), 16 * 8);
    }

    #[test]
    fn test_fill_rect_is_clipped() {
        let mut target = ImageTarget::new(4, 4);
        target.set_fill_color(RED);
        target.fill_rect(-10.0, 2.0, 100.0, 100.0);
        assert_eq!(solid(&target, RED), 4 * 2);
    }

    #[test]
    fn test_fill_rect_on_empty_surface_is_noop() {
        let mut target = ImageTarget::new(0, 0);
        target.fill_rect(0.0, 0.0, 10.0, 10.0);
        assert_eq!(target.dimensions(), (0, 0));
    }

    #[test]
    fn test_space_draws_nothing() {
        let mut target = ImageTarget::new(20, 20);
        target.set_fill_color(RED);
        target.set_text_style(&TextStyle::monospace(20.0));
        target.fill_text(' ', 10.0, 10.0);
        assert_eq!(solid(&target, RED), 0);
    }

    #[test]
    fn test_glyph_is_drawn_around_center() {
        let mut target = ImageTarget::new(40, 40);
        target.set_image_smoothing(false);
        target.set_fill_color(RED);
        target.set_text_style(&TextStyle::monospace(20.0));
        target.fill_text('@', 20.0, 20.0);

        assert!(solid(&target, RED) > 0);
        // box is 12x20 centered at (20, 20)
        for (x, y, p) in target.image().enumerate_pixels() {
            if *p == RED.to_rgba() {
                assert!((14..26).contains(&x) && (10..30).contains(&y), "stray pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_unsmoothed_glyph_is_crisp() {
        let mut target = ImageTarget::new(30, 30);
        target.set_fill_color(Color::BLACK);
        target.fill_rect(0.0, 0.0, 30.0, 30.0);
        target.set_image_smoothing(false);
        target.set_fill_color(Color::WHITE);
        target.set_text_style(&TextStyle::monospace(13.0));
        target.fill_text('#', 15.3, 14.7);

        for p in target.image().pixels() {
            assert!(*p == Color::BLACK.to_rgba() || *p == Color::WHITE.to_rgba());
        }
        assert!(solid(&target, Color::WHITE) > 0);
    }

    #[test]
    fn test_left_top_anchor() {
        let mut target = ImageTarget::new(40, 40);
        target.set_image_smoothing(false);
        target.set_fill_color(RED);
        let style = TextStyle {
            align: TextAlign::Left,
            baseline: TextBaseline::Top,
            ..TextStyle::monospace(10.0)
        };
        target.set_text_style(&style);
        target.fill_text('#', 0.0, 0.0);

        for (x, y, p) in target.image().enumerate_pixels() {
            if *p == RED.to_rgba() {
                assert!(x < 6 && y < 10);
            }
        }
    }

    #[test]
    fn test_glyph_off_surface_is_clipped() {
        let mut target = ImageTarget::new(10, 10);
        target.set_fill_color(RED);
        target.set_text_style(&TextStyle::monospace(40.0));
        target.fill_text('@', -100.0, 500.0);
        target.fill_text('@', 0.0, 0.0);
        assert_eq!(target.dimensions(), (10, 10));
    }

    #[test]
    fn test_denser_glyphs_ink_more() {
        let ink = |ch: char| {
            (0..8)
                .flat_map(|y| (0..8).map(move |x| (x, y)))
                .filter(|&(x, y)| glyph_bit(ch, x, y, false))
                .count()
        };
        assert!(ink('@') > ink('+'));
        assert!(ink('#') > ink(':'));
        assert!(ink(':') > ink(' '));
        assert_eq!(ink(' '), 0);
    }

    #[test]
    fn test_bold_thickens_strokes() {
        assert!(!glyph_bit('-', 0, 0, true));
        assert!(glyph_bit('#', 3, 0, true));
        assert!(!glyph_bit('#', 3, 0, false));
    }
}
