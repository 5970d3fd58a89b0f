//! Tic-tac-toe with a classic mode and a three-piece Pro mode.
//!
//! # Architecture
//!
//! - **Games**: the rules engine. [`Game`] applies moves under [`Mode::Basic`]
//!   or [`Mode::Pro`] rules, checked by contracts and invariants.
//! - **Session**: a [`ModeSession`] pairs a game with its running score.
//! - **Render**: the [`BoardRenderer`] seam. Sessions produce a [`BoardView`];
//!   the terminal UI and [`TextRenderer`] draw it.
//! - **TUI**: welcome splash, one board screen per mode, tab navigation.
//!
//! # Example
//!
//! ```
//! use tictactoe_pro::{BoardRenderer, Mode, ModeSession, Player, TextRenderer};
//!
//! let mut session = ModeSession::new(Mode::Pro);
//! for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
//!     session.tap(row, col)?;
//! }
//! assert_eq!(session.wins(Player::X), 1);
//!
//! let mut renderer = TextRenderer::new();
//! renderer.render(&session.view())?;
//! assert!(renderer.output().contains("Player X Wins!"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;
mod render;
mod session;

pub mod tui;

/// `EnvFilter` directive used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tictactoe_pro=debug";

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError, DEFAULT_CONFIG_FILE};

// Crate-level exports - Rendering
pub use render::{BoardRenderer, BoardView, CellHighlight, RenderError, TextRenderer};

// Crate-level exports - Sessions
pub use session::{ModeSession, ReplayError};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Board, Contract, Game, GameActive, GameStatus, LINES, LegalPlacement, Line, LivePieces,
    MAX_LIVE_PIECES, Mode, Move, MoveError, MoveHistory, PRO_MOVE_LOG_LEN, Placement,
    PlacementContract, Player, Position, ScoreBoard, SquareAvailable, Square,
};

// Crate-level exports - Rules and invariants
pub use games::tictactoe::{invariants, rules};
