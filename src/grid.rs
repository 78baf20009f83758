//! Dense 2D cell storage with bounds checking and neighbor lookup.
//!
//! Cells are stored row-major in a flat `Vec`. Row `0` is the visual bottom
//! of the grid and row indices grow toward the top, which is the direction
//! cells fall from during a refill.

use std::fmt;

use crate::constants::{DIRECTIONS, EMPTY_GLYPH, WIDE_GLYPH};
use crate::palette::ColorSource;

/// Identifies a color group. Two cells match iff their ids are equal.
pub type ColorId = u32;

/// A `(row, col)` coordinate on the grid.
pub type Point = (usize, usize);

/// A single slot of the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub color_id: ColorId,
    /// `false` while the slot is empty and waiting to be refilled.
    pub active: bool,
}

impl Cell {
    /// An active cell of the given color.
    pub fn new(color_id: ColorId) -> Self {
        Self {
            color_id,
            active: true,
        }
    }
}

/// Error raised by grid accesses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The coordinate lies outside `[0, rows) x [0, cols)`.
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::OutOfRange {
                row,
                col,
                rows,
                cols,
            } => write!(f, "cell ({row}, {col}) is outside the {rows}x{cols} grid"),
        }
    }
}

impl std::error::Error for GridError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build a grid where every cell is active with a color drawn from `source`.
    pub fn random(rows: usize, cols: usize, source: &mut impl ColorSource) -> Self {
        let mut cells = Vec::with_capacity(rows * cols);
        for _ in 0..rows * cols {
            cells.push(Cell::new(source.next_color_id()));
        }
        Self { rows, cols, cells }
    }

    /// Build an all-active grid from color ids, `rows[0]` being row 0.
    ///
    /// # Panics
    ///
    /// Panics if the rows are ragged.
    pub fn from_rows(rows: &[Vec<ColorId>]) -> Self {
        let cols = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (r, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), cols, "row {r} has {} cells, expected {cols}", row.len());
            cells.extend(row.iter().copied().map(Cell::new));
        }
        Self {
            rows: rows.len(),
            cols,
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn check(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if self.in_bounds(row, col) {
            Ok(self.idx(row, col))
        } else {
            Err(GridError::OutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    #[inline]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Cell, GridError> {
        let i = self.check(row, col)?;
        Ok(self.cells[i])
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), GridError> {
        let i = self.check(row, col)?;
        self.cells[i] = cell;
        Ok(())
    }

    /// Cell at an in-bounds point.
    ///
    /// # Panics
    ///
    /// Panics if `pt` is outside the grid; callers pass points produced by
    /// the grid itself.
    pub(crate) fn cell(&self, (row, col): Point) -> Cell {
        assert!(self.in_bounds(row, col), "cell ({row}, {col}) outside the grid");
        self.cells[self.idx(row, col)]
    }

    /// Mutable access to the cell at an in-bounds point.
    ///
    /// # Panics
    ///
    /// Panics if `pt` is outside the grid.
    pub(crate) fn cell_mut(&mut self, (row, col): Point) -> &mut Cell {
        assert!(self.in_bounds(row, col), "cell ({row}, {col}) outside the grid");
        let i = self.idx(row, col);
        &mut self.cells[i]
    }

    /// Orthogonal neighbors of `(row, col)` that lie inside the grid.
    ///
    /// The order is fixed (see [`DIRECTIONS`]) so traversals are reproducible.
    pub fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = Point> + '_ {
        DIRECTIONS.iter().filter_map(move |&(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            self.in_bounds(r, c).then_some((r, c))
        })
    }

    /// Overwrite every cell with a fresh, active color from `source`.
    pub fn randomize(&mut self, source: &mut impl ColorSource) {
        for cell in &mut self.cells {
            *cell = Cell::new(source.next_color_id());
        }
    }

    /// Iterate over all cells with their coordinates, row 0 first.
    pub fn cells(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| ((i / cols, i % cols), cell))
    }

    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|c| c.active).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.active)
    }
}

fn glyph(cell: Cell) -> char {
    if !cell.active {
        return EMPTY_GLYPH;
    }
    char::from_digit(cell.color_id, 36).unwrap_or(WIDE_GLYPH)
}

impl fmt::Display for Grid {
    /// Top row first, so the output reads the way the grid is drawn.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.rows).rev() {
            for col in 0..self.cols {
                let ch = glyph(self.cells[self.idx(row, col)]);
                if col + 1 < self.cols {
                    write!(f, "{ch} ")?;
                } else {
                    write!(f, "{ch}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
