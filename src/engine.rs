//! Match resolution and refill.
//!
//! A move is resolved in two steps:
//! - [`resolve_move`] flood-fills the same-colored region around the selected
//!   cell and deactivates it, returning its size (the move's score)
//! - [`refill_grid`] lets cells above each empty slot fall into it and draws
//!   fresh colors for whatever is left at the top
//!
//! Both functions borrow the grid; ownership stays with the session.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::grid::{Cell, ColorId, Grid, GridError, Point};
use crate::palette::ColorSource;

/// Breadth-first search over active cells of `color` starting at `origin`.
///
/// Returns the region in visit order.
fn flood(grid: &Grid, origin: Point, color: ColorId) -> Vec<Point> {
    let cols = grid.cols();
    let mut visited = vec![false; grid.rows() * cols];
    let mut queue = VecDeque::from([origin]);
    let mut group = Vec::new();

    while let Some((r, c)) = queue.pop_front() {
        // The same cell can be queued from two sides before it is visited.
        if visited[r * cols + c] {
            continue;
        }
        visited[r * cols + c] = true;
        group.push((r, c));

        for (nr, nc) in grid.neighbors(r, c) {
            if visited[nr * cols + nc] {
                continue;
            }
            let cell = grid.cell((nr, nc));
            if cell.active && cell.color_id == color {
                queue.push_back((nr, nc));
            }
        }
    }
    group
}

/// The maximal connected region of the origin's color, without mutating.
///
/// Returns an empty group for an inactive origin.
pub fn connected_group(grid: &Grid, row: usize, col: usize) -> Result<Vec<Point>, GridError> {
    let origin = grid.get(row, col)?;
    if !origin.active {
        return Ok(Vec::new());
    }
    Ok(flood(grid, (row, col), origin.color_id))
}

/// Deactivate the region around `(row, col)` and return its cells in visit order.
///
/// Selecting an inactive cell clears nothing.
pub fn clear_group(grid: &mut Grid, row: usize, col: usize) -> Result<Vec<Point>, GridError> {
    let group = connected_group(grid, row, col)?;
    for &pt in &group {
        grid.cell_mut(pt).active = false;
    }
    if !group.is_empty() {
        debug!(row, col, matched = group.len(), "cleared group");
    }
    Ok(group)
}

/// Resolve a selection at `(row, col)` and return the number of cells matched.
///
/// There is no minimum group size: a lone cell still matches itself.
pub fn resolve_move(grid: &mut Grid, row: usize, col: usize) -> Result<usize, GridError> {
    clear_group(grid, row, col).map(|group| group.len())
}

/// Take the color of the nearest active cell above `(row, col)`, emptying it.
///
/// Falls back to a fresh color from `source` when nothing is above.
fn falling_color(grid: &mut Grid, (row, col): Point, source: &mut impl ColorSource) -> ColorId {
    for r in row + 1..grid.rows() {
        let cell = grid.cell_mut((r, col));
        if !cell.active {
            continue;
        }
        cell.active = false;
        trace!(from = r, to = row, col, "cell falls");
        return cell.color_id;
    }
    source.next_color_id()
}

/// Fill every empty slot, bottom row first, and return the slots written.
///
/// Each gap takes the nearest active cell above it in its column, which then
/// becomes a gap itself and is filled later in the same pass. The top of each
/// column draws fresh colors. Afterwards every cell is active.
pub fn refill_grid(grid: &mut Grid, source: &mut impl ColorSource) -> Vec<Point> {
    let mut filled = Vec::new();
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            if grid.cell((row, col)).active {
                continue;
            }
            let color = falling_color(grid, (row, col), source);
            *grid.cell_mut((row, col)) = Cell::new(color);
            filled.push((row, col));
        }
    }
    debug!(filled = filled.len(), "refilled grid");
    filled
}
