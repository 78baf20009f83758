//! Default session parameters.
//!
//! These are the values used when the binary is run without flags. A library
//! caller is free to build a [`SessionConfig`](crate::config::SessionConfig)
//! with any dimensions it likes.

use std::time::Duration;

// =============================================================================
// Grid Geometry
// =============================================================================

/// Default number of rows.
pub const DEFAULT_ROWS: usize = 8;

/// Default number of columns.
pub const DEFAULT_COLS: usize = 8;

// =============================================================================
// Session Parameters
// =============================================================================

/// Default move budget for a session.
pub const DEFAULT_MOVES: u32 = 20;

/// Default number of distinct colors in the palette.
pub const DEFAULT_COLORS: u32 = 5;

/// Pause between clearing a match and refilling the grid.
pub const MATCH_DELAY: Duration = Duration::from_secs(1);

/// Pause between the last move and the game-over notification.
pub const GAME_OVER_DELAY: Duration = Duration::from_secs(1);

// =============================================================================
// Neighbor Offsets
// =============================================================================

/// Orthogonal `(row, col)` offsets, in traversal order.
///
/// Order: left, right, up, down, taken as index vectors over `(row, col)`.
pub const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, 1), (0, -1)];

// =============================================================================
// Rendering
// =============================================================================

/// Character drawn for an inactive (empty) slot.
pub const EMPTY_GLYPH: char = '.';

/// Character drawn for a color id that has no single-digit glyph.
pub const WIDE_GLYPH: char = '#';
