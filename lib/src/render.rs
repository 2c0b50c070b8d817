use crate::color::{Color, ColorSum};
use crate::config::ConvertConfig;
use crate::grid::GridLayout;
use crate::segment::BackgroundMask;
use crate::target::{RenderTarget, TextStyle};
use image::RgbaImage;
use log::{trace, warn};

/// Foreground color total and background tally for one source block
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockAggregate {
    pub foreground: ColorSum,
    pub background: u64,
}

/// Outcome of one render pass
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderSummary {
    pub layout: GridLayout,
    /// Cells whose block was aggregated
    pub cells_considered: usize,
    /// Cells that produced a glyph
    pub glyphs_drawn: usize,
}

/// Sum the foreground pixels of the `width` x `height` block at (x0, y0)
///
/// Pixels outside the image are ignored; a zero-sized block aggregates
/// nothing.
pub fn aggregate_block(
    img: &RgbaImage,
    mask: &BackgroundMask,
    x0: u32,
    y0: u32,
    width: u32,
    height: u32,
) -> BlockAggregate {
    let (img_w, img_h) = img.dimensions();
    let mut agg = BlockAggregate::default();

    for y in y0..y0.saturating_add(height).min(img_h) {
        for x in x0..x0.saturating_add(width).min(img_w) {
            if mask.is_background(x, y) {
                agg.background += 1;
                continue;
            }
            agg.foreground.add(Color::from_rgba(img.get_pixel(x, y)));
        }
    }

    agg
}

/// Draw one glyph per foreground grid cell onto `target`
///
/// The whole `out_width` x `out_height` surface is first filled with
/// `config.fill_color`. Each cell's block is then averaged over its
/// foreground pixels; cells with no foreground are left as fill. The mean
/// color picks the glyph through its luminance and is also the color the
/// glyph is drawn in, centered in the cell with smoothing disabled.
pub fn render_glyphs<T: RenderTarget + ?Sized>(
    img: &RgbaImage,
    mask: &BackgroundMask,
    target: &mut T,
    out_width: u32,
    out_height: u32,
    config: &ConvertConfig,
) -> RenderSummary {
    let layout = GridLayout::new(img.dimensions(), (out_width, out_height), config.target_width);
    let mut summary = RenderSummary {
        layout,
        cells_considered: 0,
        glyphs_drawn: 0,
    };

    target.set_fill_color(config.fill_color);
    target.fill_rect(0.0, 0.0, out_width as f32, out_height as f32);

    if out_width == 0 || out_height == 0 {
        warn!("render_glyphs: empty output surface {}x{}", out_width, out_height);
        return summary;
    }
    if target.dimensions() != (out_width, out_height) {
        warn!(
            "render_glyphs: drawing {}x{} onto a {:?} surface, the target clips",
            out_width,
            out_height,
            target.dimensions()
        );
    }
    if mask.dimensions() != img.dimensions() {
        warn!(
            "render_glyphs: mask {:?} does not match image {:?}, unmatched pixels count as foreground",
            mask.dimensions(),
            img.dimensions()
        );
    }

    if layout.cell_count() == 0 {
        warn!("render_glyphs: source {:?} yields an empty grid", img.dimensions());
    }

    target.set_text_style(&TextStyle::monospace(layout.font_size(config.char_aspect)));
    target.set_image_smoothing(false);

    for cell in layout.cells() {
        summary.cells_considered += 1;

        let (x0, y0) = layout.block_origin(cell);
        let agg = aggregate_block(img, mask, x0, y0, layout.block_width, layout.block_height);
        let Some(color) = agg.foreground.mean() else {
            continue;
        };
        let Some(glyph) = config.ramp.glyph_for(color.luminance()) else {
            continue;
        };

        let (cx, cy) = layout.cell_center(cell);
        target.set_fill_color(color);
        target.fill_text(glyph, cx, cy);
        summary.glyphs_drawn += 1;
    }

    trace!(
        "render_glyphs: grid {}x{} block {}x{} drew {}/{}",
        layout.target_width,
        layout.target_height,
        layout.block_width,
        layout.block_height,
        summary.glyphs_drawn,
        summary.cells_considered
    );

    summary
}
