//! Colorfall: a flood-fill match puzzle core.
//!
//! Selecting a cell clears every orthogonally connected cell of the same
//! color, scores one point per cleared cell, and refills the grid by letting
//! cells above fall into the gaps and spawning new colors at the top. A
//! session ends when its move budget is spent.
//!
//! ## Modules
//!
//! - [`grid`] - Cell storage, bounds checks and neighbor lookup
//! - [`engine`] - Flood-fill match resolution and refill
//! - [`session`] - Turn state machine (start, select, game over, restart)
//! - [`palette`] - Color sources
//! - [`config`] - Session configuration and validation
//! - [`sink`] - Presentation callbacks
//! - [`hud`] - Text status display
//! - [`console`] - Line-oriented command protocol
//! - [`autoplay`] - Scripted players
//! - [`constants`] - Defaults
//!
//! ## Example
//!
//! ```
//! use colorfall::config::SessionConfig;
//! use colorfall::palette::Palette;
//! use colorfall::session::{MoveOutcome, Session};
//!
//! let config = SessionConfig::new(6, 6, 10).unwrap().instant();
//! let palette = Palette::uniform(4).unwrap().with_seed(7);
//! let mut session = Session::new(config, palette).unwrap();
//! session.start();
//!
//! if let MoveOutcome::Resolved(report) = session.on_cell_selected(0, 0).unwrap() {
//!     println!("matched {} cells, {} moves left", report.matched, report.moves_remaining);
//! }
//! ```

pub mod autoplay;
pub mod config;
pub mod console;
pub mod constants;
pub mod engine;
pub mod grid;
pub mod hud;
pub mod palette;
pub mod session;
pub mod sink;
