//! Terminal-backed drawing surface.
//!
//! The terminal is treated as a pixel canvas where every terminal cell
//! covers a block of [`PIXELS_PER_COLUMN`] x [`PIXELS_PER_ROW`] pixels. Each
//! cell remembers one glyph and its color; fills blend over that color, so a
//! translucent background fill slowly darkens old glyphs into a trail.

use std::cell::RefCell;
use std::rc::Rc;

use glyphfall_core::Rgba;
use glyphfall_grid::{DrawingContext, Host, Surface};
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

/// Horizontal pixels per terminal column.
pub const PIXELS_PER_COLUMN: u32 = 10;

/// Vertical pixels per terminal row.
pub const PIXELS_PER_ROW: u32 = 20;

/// Glyphs this close to the backdrop color are rendered blank.
const FADED_DISTANCE: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Glyph {
    symbol: char,
    rgb: [u8; 3],
}

const BLANK: Glyph = Glyph {
    symbol: ' ',
    rgb: [0, 0, 0],
};

/// Glyph and color storage for one terminal screen.
#[derive(Debug, Clone)]
pub struct TerminalCanvas {
    columns: u16,
    rows: u16,
    glyphs: Vec<Glyph>,
    /// Color the whole canvas converges to under repeated fills.
    backdrop: [u8; 3],
}

impl TerminalCanvas {
    /// Create a blank canvas covering `columns` x `rows` terminal cells.
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            columns,
            rows,
            glyphs: vec![BLANK; columns as usize * rows as usize],
            backdrop: [0, 0, 0],
        }
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn width_px(&self) -> u32 {
        self.columns as u32 * PIXELS_PER_COLUMN
    }

    pub fn height_px(&self) -> u32 {
        self.rows as u32 * PIXELS_PER_ROW
    }

    /// The visible glyph at a terminal cell, or `None` if blank or faded.
    pub fn glyph_at(&self, column: u16, row: u16) -> Option<(char, [u8; 3])> {
        let glyph = self.glyphs.get(self.index(column, row)?)?;
        if glyph.symbol == ' ' || distance(glyph.rgb, self.backdrop) <= FADED_DISTANCE {
            return None;
        }
        Some((glyph.symbol, glyph.rgb))
    }

    fn index(&self, column: u16, row: u16) -> Option<usize> {
        (column < self.columns && row < self.rows)
            .then(|| row as usize * self.columns as usize + column as usize)
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba, alpha: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let (col_start, col_end) = span(x, width, PIXELS_PER_COLUMN, self.columns);
        let (row_start, row_end) = span(y, height, PIXELS_PER_ROW, self.rows);

        for row in row_start..row_end {
            for column in col_start..col_end {
                if let Some(i) = self.index(column, row) {
                    let glyph = &mut self.glyphs[i];
                    glyph.rgb = color.blend_onto(glyph.rgb, alpha);
                }
            }
        }

        let covers_canvas = col_start == 0
            && row_start == 0
            && col_end == self.columns
            && row_end == self.rows;
        if covers_canvas {
            self.backdrop = color.blend_onto(self.backdrop, alpha);
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font_size: u32, color: Rgba, alpha: f32) {
        let top = y - font_size as f64;
        if x < 0.0 || top < 0.0 {
            return;
        }
        let row = (top / PIXELS_PER_ROW as f64) as u16;
        let first_column = (x / PIXELS_PER_COLUMN as f64) as u16;

        for (offset, symbol) in text.chars().enumerate() {
            let Some(column) = first_column.checked_add(offset as u16) else {
                break;
            };
            let Some(i) = self.index(column, row) else {
                break;
            };
            let glyph = &mut self.glyphs[i];
            glyph.symbol = symbol;
            glyph.rgb = color.blend_onto(glyph.rgb, alpha);
        }
    }
}

impl Widget for &TerminalCanvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let backdrop = rgb_color(self.backdrop);
        for row in 0..self.rows.min(area.height) {
            for column in 0..self.columns.min(area.width) {
                let Some(cell) = buf.cell_mut((area.x + column, area.y + row)) else {
                    continue;
                };
                cell.set_bg(backdrop);
                match self.glyph_at(column, row) {
                    Some((symbol, rgb)) => {
                        cell.set_char(symbol).set_fg(rgb_color(rgb));
                    }
                    None => {
                        cell.set_char(' ');
                    }
                }
            }
        }
    }
}

/// Terminal cells covered by a pixel span, clipped to `limit`.
fn span(start: f64, length: f64, pixels_per_cell: u32, limit: u16) -> (u16, u16) {
    let per_cell = pixels_per_cell as f64;
    let first = (start / per_cell).floor().clamp(0.0, limit as f64) as u16;
    let last = ((start + length) / per_cell).ceil().clamp(0.0, limit as f64) as u16;
    (first, last)
}

fn distance(a: [u8; 3], b: [u8; 3]) -> u8 {
    a.iter()
        .zip(b)
        .map(|(x, y)| x.abs_diff(y))
        .max()
        .unwrap_or(0)
}

fn rgb_color([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(r, g, b)
}

/// Handle to a shared [`TerminalCanvas`], usable as a drawing surface.
#[derive(Debug, Clone)]
pub struct CanvasSurface {
    canvas: Rc<RefCell<TerminalCanvas>>,
}

impl Surface for CanvasSurface {
    type Context = CanvasContext;

    fn width(&self) -> u32 {
        self.canvas.borrow().width_px()
    }

    fn height(&self) -> u32 {
        self.canvas.borrow().height_px()
    }

    fn context_2d(&self) -> Option<CanvasContext> {
        Some(CanvasContext {
            canvas: Rc::clone(&self.canvas),
            fill: Rgba::opaque(0, 0, 0),
            alpha: 1.0,
            font_size: 10,
        })
    }
}

/// Drawing state bound to a [`TerminalCanvas`].
#[derive(Debug)]
pub struct CanvasContext {
    canvas: Rc<RefCell<TerminalCanvas>>,
    fill: Rgba,
    alpha: f32,
    font_size: u32,
}

impl DrawingContext for CanvasContext {
    fn set_fill_style(&mut self, color: Rgba) {
        self.fill = color;
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0) as f32;
    }

    fn set_font(&mut self, _family: &str, size_px: u32) {
        // Terminals pick their own font; only the size matters for placement.
        self.font_size = size_px;
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.canvas
            .borrow_mut()
            .fill_rect(x, y, width, height, self.fill, self.alpha);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.canvas
            .borrow_mut()
            .fill_text(text, x, y, self.font_size, self.fill, self.alpha);
    }
}

/// The set of named canvases the animator can draw on.
#[derive(Debug, Default)]
pub struct Screen {
    canvases: Vec<(String, Rc<RefCell<TerminalCanvas>>)>,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `canvas` reachable under `id`, replacing any previous entry.
    pub fn register(&mut self, id: &str, canvas: Rc<RefCell<TerminalCanvas>>) {
        self.canvases.retain(|(existing, _)| existing != id);
        self.canvases.push((id.to_string(), canvas));
    }
}

impl Host for Screen {
    type Surface = CanvasSurface;

    fn surface_by_id(&self, id: &str) -> Option<CanvasSurface> {
        self.canvases
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, canvas)| CanvasSurface {
                canvas: Rc::clone(canvas),
            })
    }
}
