//! Session configuration.

use std::fmt;
use std::time::Duration;

use crate::constants::{DEFAULT_COLS, DEFAULT_MOVES, DEFAULT_ROWS, GAME_OVER_DELAY, MATCH_DELAY};

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Grid must have at least one row
    NoRows,
    /// Grid must have at least one column
    NoCols,
    /// Session must allow at least one move
    NoMoves,
    /// Palette must contain at least one color
    EmptyPalette,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoRows => write!(f, "invalid config: grid needs at least one row"),
            ConfigError::NoCols => write!(f, "invalid config: grid needs at least one column"),
            ConfigError::NoMoves => write!(f, "invalid config: initial moves must be positive"),
            ConfigError::EmptyPalette => write!(f, "invalid config: palette has no colors"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Immutable parameters of a session, fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub rows: usize,
    pub cols: usize,
    pub initial_moves: u32,
    /// Pause between clearing a match and refilling.
    pub match_delay: Duration,
    /// Pause before announcing game over.
    pub game_over_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            initial_moves: DEFAULT_MOVES,
            match_delay: MATCH_DELAY,
            game_over_delay: GAME_OVER_DELAY,
        }
    }
}

impl SessionConfig {
    /// Validated config with the default delays.
    pub fn new(rows: usize, cols: usize, initial_moves: u32) -> Result<Self, ConfigError> {
        let config = Self {
            rows,
            cols,
            initial_moves,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Replace both delays. Zero disables pacing entirely.
    pub fn with_delays(mut self, match_delay: Duration, game_over_delay: Duration) -> Self {
        self.match_delay = match_delay;
        self.game_over_delay = game_over_delay;
        self
    }

    /// Same config without any pacing.
    pub fn instant(self) -> Self {
        self.with_delays(Duration::ZERO, Duration::ZERO)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 {
            return Err(ConfigError::NoRows);
        }
        if self.cols == 0 {
            return Err(ConfigError::NoCols);
        }
        if self.initial_moves == 0 {
            return Err(ConfigError::NoMoves);
        }
        Ok(())
    }
}
