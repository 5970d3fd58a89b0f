//! Screen implementations for the TUI state machine.

mod board;
mod welcome;

pub use board::{BoardScreen, notice_for};
pub use welcome::WelcomeScreen;
pub(crate) use welcome::row_offset;
