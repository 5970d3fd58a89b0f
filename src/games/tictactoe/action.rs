//! First-class action types for tic-tac-toe.
//!
//! Moves are domain events, not side effects. They represent
//! the player's intent and can be validated independently of execution.

use super::{GameStatus, Player, Position};
use derive_new::new;
use serde::{Deserialize, Serialize};

/// A move in tic-tac-toe: a player placing their mark at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The position where the player places their mark.
    pub position: Position,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.position.label())
    }
}

/// Everything a successful placement changed.
///
/// `captured` and `evicted` are only ever set under Pro rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// The move that was applied.
    pub mov: Move,
    /// Opponent piece removed because the move landed on it.
    pub captured: Option<Position>,
    /// The mover's own oldest piece, removed to stay within three.
    pub evicted: Option<Position>,
    /// Game status after the move.
    pub status: GameStatus,
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The square at the position is already occupied (Basic rules).
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// The acting player already has a piece here (Pro rules).
    #[display("Player already has a piece at {}", _0)]
    OwnPiece(Position),

    /// Row or column outside 0-2.
    #[display("Cell ({}, {}) is off the board", row, col)]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl MoveError {
    /// Returns true for rejections caused by the user's choice of cell
    /// or timing, as opposed to internal faults.
    pub fn is_invalid_move(&self) -> bool {
        !matches!(self, MoveError::InvariantViolation(_))
    }
}

impl std::error::Error for MoveError {}
