//! Turn state machine.
//!
//! A [`Session`] owns the grid, the color source and the presentation sink,
//! and drives one move at a time:
//!
//! ```text
//! Ready --start--> AwaitingInput --select--> Resolving --+--> AwaitingInput
//!   ^                                                    |
//!   +------------------restart------------- GameOver <---+ (no moves left)
//! ```
//!
//! Selections that arrive outside `AwaitingInput`, and restarts outside
//! `GameOver`, are dropped.

use std::time::Duration;

use tracing::{debug, info};

use crate::config::{ConfigError, SessionConfig};
use crate::engine::{clear_group, refill_grid};
use crate::grid::{Grid, GridError, Point};
use crate::palette::ColorSource;
use crate::sink::{NullSink, PresentationSink};

/// Where the session is in its move cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Grid generated, waiting for [`Session::start`].
    Ready,
    AwaitingInput,
    /// A move is being matched and refilled.
    Resolving,
    /// Move budget spent; only [`Session::restart`] does anything.
    GameOver,
}

/// Summary of a resolved move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveReport {
    /// Cells cleared by this move (its score).
    pub matched: usize,
    /// Cumulative score after the move.
    pub score: u32,
    pub moves_remaining: u32,
    pub game_over: bool,
}

/// Result of a selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Dropped: wrong phase or empty cell. Nothing changed.
    Ignored,
    Resolved(MoveReport),
}

/// Called with each configured pause; the default sleeps the thread.
pub type Pacer = Box<dyn FnMut(Duration)>;

fn sleep_pacer(delay: Duration) {
    if !delay.is_zero() {
        std::thread::sleep(delay);
    }
}

pub struct Session<C, P = NullSink> {
    config: SessionConfig,
    grid: Grid,
    colors: C,
    sink: P,
    pacer: Pacer,
    score: u32,
    moves_remaining: u32,
    phase: Phase,
}

impl<C: ColorSource> Session<C, NullSink> {
    /// Validate `config` and generate a random grid from `colors`.
    pub fn new(config: SessionConfig, mut colors: C) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::random(config.rows, config.cols, &mut colors);
        Ok(Self::assemble(config, grid, colors))
    }

    /// Use a prepared grid; its dimensions override those in `config`.
    pub fn from_grid(
        mut config: SessionConfig,
        grid: Grid,
        colors: C,
    ) -> Result<Self, ConfigError> {
        config.rows = grid.rows();
        config.cols = grid.cols();
        config.validate()?;
        Ok(Self::assemble(config, grid, colors))
    }

    fn assemble(config: SessionConfig, grid: Grid, colors: C) -> Self {
        Self {
            moves_remaining: config.initial_moves,
            config,
            grid,
            colors,
            sink: NullSink,
            pacer: Box::new(sleep_pacer),
            score: 0,
            phase: Phase::Ready,
        }
    }
}

impl<C: ColorSource, P: PresentationSink> Session<C, P> {
    /// Replace the presentation sink.
    pub fn with_sink<Q: PresentationSink>(self, sink: Q) -> Session<C, Q> {
        Session {
            config: self.config,
            grid: self.grid,
            colors: self.colors,
            sink,
            pacer: self.pacer,
            score: self.score,
            moves_remaining: self.moves_remaining,
            phase: self.phase,
        }
    }

    /// Replace the pause hook.
    pub fn with_pacer(mut self, pacer: impl FnMut(Duration) + 'static) -> Self {
        self.pacer = Box::new(pacer);
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn sink(&self) -> &P {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut P {
        &mut self.sink
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves_remaining(&self) -> u32 {
        self.moves_remaining
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a selection would be accepted right now.
    pub fn can_act(&self) -> bool {
        self.phase == Phase::AwaitingInput
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Leave `Ready` and announce the initial state. No-op in other phases.
    pub fn start(&mut self) {
        if self.phase != Phase::Ready {
            return;
        }
        self.sink.game_started(self.score, self.moves_remaining);
        for ((row, col), cell) in self.grid.cells() {
            self.sink.cell_changed(row, col, cell);
        }
        self.phase = Phase::AwaitingInput;
        info!(
            rows = self.grid.rows(),
            cols = self.grid.cols(),
            moves = self.moves_remaining,
            "session started"
        );
    }

    /// Handle a selection of `(row, col)`.
    ///
    /// Out-of-range coordinates are an error. Selections outside
    /// `AwaitingInput`, or of an empty cell, are dropped without effect.
    pub fn on_cell_selected(&mut self, row: usize, col: usize) -> Result<MoveOutcome, GridError> {
        let cell = self.grid.get(row, col)?;
        if self.phase != Phase::AwaitingInput {
            debug!(row, col, phase = ?self.phase, "selection dropped");
            return Ok(MoveOutcome::Ignored);
        }
        if !cell.active {
            debug!(row, col, "selected an empty cell");
            return Ok(MoveOutcome::Ignored);
        }

        self.phase = Phase::Resolving;
        let cleared = clear_group(&mut self.grid, row, col)?;
        self.notify(&cleared);
        (self.pacer)(self.config.match_delay);

        let filled = refill_grid(&mut self.grid, &mut self.colors);
        self.notify(&filled);

        let matched = cleared.len();
        self.score = self
            .score
            .saturating_add(u32::try_from(matched).unwrap_or(u32::MAX));
        self.moves_remaining = self.moves_remaining.saturating_sub(1);
        self.sink.move_made(self.score, self.moves_remaining);
        debug!(
            matched,
            score = self.score,
            moves = self.moves_remaining,
            "move resolved"
        );

        let game_over = self.moves_remaining == 0;
        if game_over {
            (self.pacer)(self.config.game_over_delay);
            self.phase = Phase::GameOver;
            self.sink.game_over(self.score);
            info!(score = self.score, "game over");
        } else {
            self.phase = Phase::AwaitingInput;
        }

        Ok(MoveOutcome::Resolved(MoveReport {
            matched,
            score: self.score,
            moves_remaining: self.moves_remaining,
            game_over,
        }))
    }

    /// Reset score and moves, regenerate every cell, and start again.
    ///
    /// Only a finished game can be restarted; in any other phase this does
    /// nothing and returns `false`.
    pub fn restart(&mut self) -> bool {
        if self.phase != Phase::GameOver {
            debug!(phase = ?self.phase, "restart dropped");
            return false;
        }
        self.grid.randomize(&mut self.colors);
        self.score = 0;
        self.moves_remaining = self.config.initial_moves;
        self.phase = Phase::Ready;
        info!("session restarted");
        self.start();
        true
    }

    fn notify(&mut self, points: &[Point]) {
        for &(row, col) in points {
            self.sink.cell_changed(row, col, self.grid.cell((row, col)));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::grid::{Cell, ColorId};

    #[derive(Debug, Default)]
    struct Recorder {
        started: Vec<(u32, u32)>,
        changes: Vec<(usize, usize, Cell)>,
        moves: Vec<(u32, u32)>,
        over: Vec<u32>,
    }

    impl PresentationSink for Recorder {
        fn game_started(&mut self, score: u32, moves_remaining: u32) {
            self.started.push((score, moves_remaining));
        }

        fn cell_changed(&mut self, row: usize, col: usize, cell: Cell) {
            self.changes.push((row, col, cell));
        }

        fn move_made(&mut self, score: u32, moves_remaining: u32) {
            self.moves.push((score, moves_remaining));
        }

        fn game_over(&mut self, score: u32) {
            self.over.push(score);
        }
    }

    fn fixed(color: ColorId) -> impl FnMut() -> ColorId {
        move || color
    }

    fn session(
        rows: &[Vec<ColorId>],
        moves: u32,
    ) -> Session<impl FnMut() -> ColorId + use<>, Recorder> {
        let config = SessionConfig {
            initial_moves: moves,
            ..SessionConfig::default()
        }
        .instant();
        Session::from_grid(config, Grid::from_rows(rows), fixed(0))
            .unwrap()
            .with_sink(Recorder::default())
    }

    #[test]
    fn test_new_starts_ready() {
        let config = SessionConfig::new(3, 4, 5).unwrap().instant();
        let mut s = Session::new(config, fixed(1)).unwrap();
        assert_eq!(s.phase(), Phase::Ready);
        assert!(!s.can_act());
        assert_eq!(s.grid().rows(), 3);
        assert_eq!(s.grid().cols(), 4);

        // Not started yet: dropped.
        assert_eq!(s.on_cell_selected(0, 0).unwrap(), MoveOutcome::Ignored);
        s.start();
        assert!(s.can_act());
    }

    #[test]
    fn test_start_announces_every_cell() {
        let mut s = session(&[vec![1, 2], vec![3, 4]], 3);
        s.start();
        assert_eq!(s.sink().started, vec![(0, 3)]);
        assert_eq!(s.sink().changes.len(), 4);

        // Second start is a no-op.
        s.start();
        assert_eq!(s.sink().started.len(), 1);
    }

    #[test]
    fn test_move_updates_score_and_moves() {
        let mut s = session(&[vec![1, 1, 2], vec![3, 1, 2]], 3);
        s.start();
        let outcome = s.on_cell_selected(0, 0).unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Resolved(MoveReport {
                matched: 3,
                score: 3,
                moves_remaining: 2,
                game_over: false,
            })
        );
        assert_eq!(s.score(), 3);
        assert_eq!(s.moves_remaining(), 2);
        assert!(s.grid().is_full());
        assert_eq!(s.phase(), Phase::AwaitingInput);
        assert_eq!(s.sink().moves, vec![(3, 2)]);
    }

    #[test]
    fn test_cell_notifications_follow_clear_then_refill() {
        let mut s = session(&[vec![1], vec![2]], 2);
        s.start();
        let start_events = s.sink().changes.len();
        s.on_cell_selected(0, 0).unwrap();

        let events = &s.sink().changes[start_events..];
        // Cleared (0,0), then refill writes (0,0) from above and (1,0) fresh.
        assert_eq!(events[0], (0, 0, Cell { color_id: 1, active: false }));
        assert_eq!(events[1], (0, 0, Cell::new(2)));
        assert_eq!(events[2], (1, 0, Cell::new(0)));
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_game_over_after_last_move() {
        let mut s = session(&[vec![1, 2]], 2);
        s.start();
        s.on_cell_selected(0, 0).unwrap();
        let outcome = s.on_cell_selected(0, 1).unwrap();
        let MoveOutcome::Resolved(report) = outcome else {
            panic!("expected a resolved move");
        };
        assert!(report.game_over);
        assert_eq!(report.moves_remaining, 0);
        assert_eq!(s.phase(), Phase::GameOver);
        assert!(s.is_over());
        assert_eq!(s.sink().over, vec![s.score()]);

        // Further input is dropped.
        let before = s.grid().clone();
        assert_eq!(s.on_cell_selected(0, 0).unwrap(), MoveOutcome::Ignored);
        assert_eq!(s.grid(), &before);
        assert_eq!(s.moves_remaining(), 0);
    }

    #[test]
    fn test_out_of_range_selection_is_an_error() {
        let mut s = session(&[vec![1, 2]], 2);
        s.start();
        assert!(matches!(
            s.on_cell_selected(1, 0),
            Err(GridError::OutOfRange { .. })
        ));
        assert_eq!(s.moves_remaining(), 2);
    }

    #[test]
    fn test_restart_resets_state() {
        let mut s = session(&[vec![1, 1], vec![1, 1]], 1);
        s.start();
        s.on_cell_selected(1, 1).unwrap();
        assert!(s.is_over());
        assert_eq!(s.score(), 4);

        assert!(s.restart());
        assert_eq!(s.phase(), Phase::AwaitingInput);
        assert_eq!(s.score(), 0);
        assert_eq!(s.moves_remaining(), 1);
        assert!(s.grid().is_full());
        assert!(s.grid().cells().all(|(_, cell)| cell.color_id == 0));
        assert_eq!(s.sink().started, vec![(0, 1), (0, 1)]);
    }

    #[test]
    fn test_restart_ignored_mid_game() {
        let mut s = session(&[vec![1, 1, 2], vec![3, 4, 5], vec![6, 7, 8]], 5);
        assert!(!s.restart(), "nothing to restart before start");
        assert_eq!(s.phase(), Phase::Ready);

        s.start();
        s.on_cell_selected(0, 0).unwrap();
        let grid = s.grid().clone();
        assert_eq!((s.score(), s.moves_remaining()), (2, 4));

        assert!(!s.restart());
        assert_eq!(s.phase(), Phase::AwaitingInput);
        assert_eq!((s.score(), s.moves_remaining()), (2, 4));
        assert_eq!(s.grid(), &grid);
        assert_eq!(s.sink().started.len(), 1);
    }

    #[test]
    fn test_pacer_receives_configured_delays() {
        let pauses = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&pauses);
        let config = SessionConfig::new(2, 2, 1)
            .unwrap()
            .with_delays(Duration::from_millis(5), Duration::from_millis(7));
        let mut s = Session::new(config, fixed(3))
            .unwrap()
            .with_pacer(move |d| log.borrow_mut().push(d));
        s.start();
        s.on_cell_selected(0, 0).unwrap();
        assert_eq!(
            *pauses.borrow(),
            vec![Duration::from_millis(5), Duration::from_millis(7)]
        );
    }

    #[test]
    fn test_from_grid_rejects_empty_grid() {
        let config = SessionConfig::default().instant();
        let err = Session::from_grid(config, Grid::from_rows(&[]), fixed(0)).err();
        assert_eq!(err, Some(ConfigError::NoRows));
    }
}
