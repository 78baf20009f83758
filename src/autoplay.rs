//! Scripted players.
//!
//! An autoplayer keeps selecting cells until the session reports game over.
//! It is used by the `demo` command and by tests that need whole games.

use tracing::debug;

use crate::engine::connected_group;
use crate::grid::{GridError, Point};
use crate::palette::ColorSource;
use crate::session::{MoveOutcome, Session};
use crate::sink::PresentationSink;

/// How the next cell is chosen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Uniformly random active cell.
    Random,
    /// The cell with the largest group; ties go to the first in row-major order.
    Greedy,
}

/// Outcome of a full game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSummary {
    pub final_score: u32,
    /// Matched cells per move, in play order.
    pub moves: Vec<usize>,
}

/// Choose a random active cell.
fn random_cell(
    session: &Session<impl ColorSource, impl PresentationSink>,
    rng: &mut fastrand::Rng,
) -> Option<Point> {
    let candidates: Vec<Point> = session
        .grid()
        .cells()
        .filter(|(_, cell)| cell.active)
        .map(|(pt, _)| pt)
        .collect();
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.usize(..candidates.len())])
}

/// Choose the cell whose group is largest.
fn greedy_cell(
    session: &Session<impl ColorSource, impl PresentationSink>,
) -> Result<Option<Point>, GridError> {
    let grid = session.grid();
    let mut seen = vec![false; grid.rows() * grid.cols()];
    let mut best: Option<(usize, Point)> = None;

    for ((row, col), cell) in grid.cells() {
        if !cell.active || seen[row * grid.cols() + col] {
            continue;
        }
        // Every member of a group yields the same group, so scan each once.
        let group = connected_group(grid, row, col)?;
        for &(r, c) in &group {
            seen[r * grid.cols() + c] = true;
        }
        if best.is_none_or(|(size, _)| group.len() > size) {
            best = Some((group.len(), (row, col)));
        }
    }
    Ok(best.map(|(_, pt)| pt))
}

/// Play the session until game over and summarize it.
///
/// The session is started first if it is still `Ready`.
pub fn play_out<C: ColorSource, P: PresentationSink>(
    session: &mut Session<C, P>,
    strategy: Strategy,
    rng: &mut fastrand::Rng,
) -> Result<GameSummary, GridError> {
    session.start();
    let mut moves = Vec::new();

    while session.can_act() {
        let choice = match strategy {
            Strategy::Random => random_cell(session, rng),
            Strategy::Greedy => greedy_cell(session)?,
        };
        let Some((row, col)) = choice else {
            break;
        };
        if let MoveOutcome::Resolved(report) = session.on_cell_selected(row, col)? {
            debug!(row, col, matched = report.matched, "autoplay move");
            moves.push(report.matched);
        }
    }

    Ok(GameSummary {
        final_score: session.score(),
        moves,
    })
}
