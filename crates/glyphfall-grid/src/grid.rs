//! Fixed-size grid of animated cells.

use glyphfall_core::AnimationConfig;
use rand::Rng;

use crate::cell::Cell;

/// Row-major grid of [`Cell`]s. Its size never changes after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell in its initial state.
    pub(crate) fn new<R: Rng>(
        columns: u32,
        rows: u32,
        config: &AnimationConfig,
        rng: &mut R,
    ) -> Self {
        let len = columns as usize * rows as usize;
        let cells = (0..len).map(|_| Cell::spawn(config, rng)).collect();
        Self {
            columns,
            rows,
            cells,
        }
    }

    /// Create a grid sized for a surface of `width` x `height` pixels.
    pub(crate) fn for_surface<R: Rng>(
        width: u32,
        height: u32,
        config: &AnimationConfig,
        rng: &mut R,
    ) -> Self {
        let (columns, rows) = config.grid_dimensions(width, height);
        Self::new(columns, rows, config, rng)
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cell at `(column, row)`, if inside the grid.
    pub fn cell(&self, column: u32, row: u32) -> Option<&Cell> {
        self.index(column, row).map(|i| &self.cells[i])
    }

    /// Mutable access to the cell at `(column, row)`, if inside the grid.
    pub fn cell_mut(&mut self, column: u32, row: u32) -> Option<&mut Cell> {
        self.index(column, row).map(|i| &mut self.cells[i])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Iterate `(column, row, cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, &Cell)> {
        let columns = self.columns.max(1);
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let i = i as u32;
            (i % columns, i / columns, cell)
        })
    }

    fn index(&self, column: u32, row: u32) -> Option<usize> {
        (column < self.columns && row < self.rows)
            .then(|| row as usize * self.columns as usize + column as usize)
    }
}
