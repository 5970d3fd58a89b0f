//! Core domain types for tic-tac-toe.

use super::position::Position;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Player in the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Slot used for per-player arrays (X = 0, O = 1).
    pub(crate) fn slot(self) -> usize {
        match self {
            Player::X => 0,
            Player::O => 1,
        }
    }
}

/// Ruleset a game is played under.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Mode {
    /// Classic rules: occupied squares are final, a full board is a draw.
    #[default]
    Basic,
    /// Three live pieces per player; the oldest is evicted and opponents can be captured.
    Pro,
}

impl Mode {
    /// Returns the tab label for this mode.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Basic => "Basic Mode",
            Mode::Pro => "Pro Mode",
        }
    }

    /// Returns the other mode.
    pub fn toggle(self) -> Self {
        match self {
            Mode::Basic => Mode::Pro,
            Mode::Pro => Mode::Basic,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Returns the occupant, if any.
    pub fn occupant(self) -> Option<Player> {
        match self {
            Square::Empty => None,
            Square::Occupied(player) => Some(player),
        }
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Sets the square at the given position.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Empties the square at the given position.
    pub fn clear(&mut self, pos: Position) {
        self.set(pos, Square::Empty);
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns true if `player` holds the square at `pos`.
    pub fn is_held_by(&self, pos: Position, player: Player) -> bool {
        self.get(pos) == Square::Occupied(player)
    }

    /// Returns true when no square is empty.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Counts the squares held by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(player))
            .count()
    }

    /// Counts occupied squares.
    pub fn occupied(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Formats the board as a human-readable string.
    #[instrument(skip(self))]
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(player) => player.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[Square; 9]> for Board {
    fn from(squares: [Square; 9]) -> Self {
        Self { squares }
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Player),
    /// Game ended in a draw (Basic mode only).
    Draw,
}

impl GameStatus {
    /// Returns true while moves are accepted.
    pub fn is_active(self) -> bool {
        self == GameStatus::InProgress
    }

    /// Returns the winner if there is one.
    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::Won(player) => Some(player),
            _ => None,
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "In progress"),
            GameStatus::Won(player) => write!(f, "Player {} wins", player),
            GameStatus::Draw => write!(f, "Draw"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_display_numbers_empty_squares() {
        let mut board = Board::new();
        board.set(Position::Center, Square::Occupied(Player::X));
        assert_eq!(board.display(), "1|2|3\n-+-+-\n4|X|6\n-+-+-\n7|8|9");
    }

    #[test]
    fn test_mode_parses_case_insensitively() {
        assert_eq!("pro".parse::<Mode>().ok(), Some(Mode::Pro));
        assert_eq!("Basic".parse::<Mode>().ok(), Some(Mode::Basic));
        assert!("expert".parse::<Mode>().is_err());
    }

    #[test]
    fn test_count_and_full() {
        let mut board = Board::new();
        for pos in Position::ALL {
            board.set(pos, Square::Occupied(Player::O));
        }
        assert!(board.is_full());
        assert_eq!(board.count(Player::O), 9);
        assert_eq!(board.count(Player::X), 0);
    }
}
