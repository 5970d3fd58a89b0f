//! Win detection logic for tic-tac-toe.

use super::super::{Board, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One of the eight winning triples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line([Position; 3]);

impl Line {
    /// The three positions of this line.
    pub fn positions(&self) -> [Position; 3] {
        self.0
    }

    /// Returns true if `pos` lies on this line.
    pub fn contains(&self, pos: Position) -> bool {
        self.0.contains(&pos)
    }

    /// Returns true if `player` holds all three squares.
    pub fn held_by(&self, board: &Board, player: Player) -> bool {
        self.0.iter().all(|pos| board.is_held_by(*pos, player))
    }
}

/// Winning lines in evaluation order: rows top-to-bottom, columns
/// left-to-right, main diagonal, anti-diagonal.
pub const LINES: [Line; 8] = [
    // Rows
    Line([Position::TopLeft, Position::TopCenter, Position::TopRight]),
    Line([Position::MiddleLeft, Position::Center, Position::MiddleRight]),
    Line([Position::BottomLeft, Position::BottomCenter, Position::BottomRight]),
    // Columns
    Line([Position::TopLeft, Position::MiddleLeft, Position::BottomLeft]),
    Line([Position::TopCenter, Position::Center, Position::BottomCenter]),
    Line([Position::TopRight, Position::MiddleRight, Position::BottomRight]),
    // Diagonals
    Line([Position::TopLeft, Position::Center, Position::BottomRight]),
    Line([Position::TopRight, Position::Center, Position::BottomLeft]),
];

/// Returns the first line fully held by `player`, if any.
#[instrument(skip(board))]
pub fn winning_line(board: &Board, player: Player) -> Option<Line> {
    LINES.iter().copied().find(|line| line.held_by(board, player))
}

/// Returns true iff `player` holds every square of at least one line.
pub fn has_won(board: &Board, player: Player) -> bool {
    winning_line(board, player).is_some()
}

/// Checks if either player has three in a row.
///
/// X is checked first; under legal play both cannot hold a line at once.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Player> {
    [Player::X, Player::O]
        .into_iter()
        .find(|player| has_won(board, *player))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Square;

    fn board_with(player: Player, positions: &[Position]) -> Board {
        let mut board = Board::new();
        for pos in positions {
            board.set(*pos, Square::Occupied(player));
        }
        board
    }

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(check_winner(&board), None);
        assert_eq!(winning_line(&board, Player::X), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board = board_with(
            Player::X,
            &[Position::TopLeft, Position::TopCenter, Position::TopRight],
        );
        assert_eq!(check_winner(&board), Some(Player::X));
        assert_eq!(winning_line(&board, Player::X), Some(LINES[0]));
        assert!(!has_won(&board, Player::O));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board = board_with(
            Player::O,
            &[Position::TopRight, Position::Center, Position::BottomLeft],
        );
        assert_eq!(winning_line(&board, Player::O), Some(LINES[7]));
    }

    #[test]
    fn test_first_line_in_order_reported() {
        // Top row and left column both complete: the row comes first.
        let board = board_with(
            Player::X,
            &[
                Position::TopLeft,
                Position::TopCenter,
                Position::TopRight,
                Position::MiddleLeft,
                Position::BottomLeft,
            ],
        );
        assert_eq!(winning_line(&board, Player::X), Some(LINES[0]));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = board_with(Player::X, &[Position::TopLeft, Position::TopCenter]);
        assert_eq!(check_winner(&board), None);
    }
}
