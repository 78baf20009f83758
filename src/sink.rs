//! Presentation callbacks.
//!
//! A session reports everything a view needs through [`PresentationSink`].
//! All methods default to doing nothing, so a sink only implements what it
//! draws.

use crate::grid::Cell;

pub trait PresentationSink {
    /// A session (re)started with the given score and move budget.
    fn game_started(&mut self, _score: u32, _moves_remaining: u32) {}

    /// The cell at `(row, col)` now holds `cell`.
    fn cell_changed(&mut self, _row: usize, _col: usize, _cell: Cell) {}

    /// A move finished resolving.
    fn move_made(&mut self, _score: u32, _moves_remaining: u32) {}

    /// The move budget is spent.
    fn game_over(&mut self, _score: u32) {}
}

/// Ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl PresentationSink for NullSink {}
