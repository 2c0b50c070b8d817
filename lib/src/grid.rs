//! Mapping between the logical glyph grid, source pixel blocks and the
//! output surface.

/// Address of one glyph cell in the logical grid
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
}

/// Grid geometry for one conversion
///
/// Block sizes use integer floor division, so trailing source rows and
/// columns that do not fill a whole block are never sampled.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridLayout {
    /// Columns in the glyph grid
    pub target_width: u32,
    /// Rows in the glyph grid, `floor(target_width / aspect_ratio)`
    pub target_height: u32,
    /// Source pixels per cell horizontally
    pub block_width: u32,
    /// Source pixels per cell vertically
    pub block_height: u32,
    /// Output pixels per cell horizontally
    pub cell_width: f32,
    /// Output pixels per cell vertically
    pub cell_height: f32,
}

impl GridLayout {
    /// Lay out a `target_width`-column grid over a source of `source`
    /// dimensions drawn onto an output of `output` dimensions
    ///
    /// A zero-area source produces a grid with no rows.
    pub fn new(source: (u32, u32), output: (u32, u32), target_width: u32) -> Self {
        let (src_w, src_h) = source;
        let (out_w, out_h) = output;

        let target_height = if src_w == 0 || src_h == 0 || target_width == 0 {
            0
        } else {
            let aspect_ratio = src_w as f64 / src_h as f64;
            (target_width as f64 / aspect_ratio).floor() as u32
        };

        let block_width = src_w.checked_div(target_width).unwrap_or(0);
        let block_height = src_h.checked_div(target_height).unwrap_or(0);

        let cell_width = if target_width == 0 { 0.0 } else { out_w as f32 / target_width as f32 };
        let cell_height = if target_height == 0 { 0.0 } else { out_h as f32 / target_height as f32 };

        Self {
            target_width,
            target_height,
            block_width,
            block_height,
            cell_width,
            cell_height,
        }
    }

    /// Number of cells the renderer considers
    pub fn cell_count(&self) -> usize {
        self.target_width as usize * self.target_height as usize
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let (rows, cols) = (self.target_height, self.target_width);
        (0..rows).flat_map(move |row| (0..cols).map(move |col| Cell { row, col }))
    }

    /// Top-left source pixel of a cell's block
    pub fn block_origin(&self, cell: Cell) -> (u32, u32) {
        (cell.col * self.block_width, cell.row * self.block_height)
    }

    /// Center of a cell on the output surface
    pub fn cell_center(&self, cell: Cell) -> (f32, f32) {
        (
            cell.col as f32 * self.cell_width + self.cell_width / 2.0,
            cell.row as f32 * self.cell_height + self.cell_height / 2.0,
        )
    }

    /// Font pixel size that makes a glyph of `char_aspect` width ratio span
    /// one cell
    pub fn font_size(&self, char_aspect: f32) -> f32 {
        self.cell_width / char_aspect
    }
}
