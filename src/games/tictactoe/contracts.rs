//! Contract-based validation for tic-tac-toe placements.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use super::action::MoveError;
use super::game::Game;
use super::invariants::{GameInvariants, InvariantSet};
use super::{Mode, Position, Square};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Placement Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game must still accept moves.
pub struct GameActive;

impl GameActive {
    /// Rejects moves once the game is won or drawn.
    #[instrument(skip(game))]
    pub fn check(game: &Game) -> Result<(), MoveError> {
        if game.is_active() {
            Ok(())
        } else {
            Err(MoveError::GameOver)
        }
    }
}

/// Precondition: the target square must be available under the game's rules.
///
/// Basic rules need an empty square. Pro rules accept an empty square or one
/// held by the opponent, and reject only the mover's own piece.
pub struct SquareAvailable;

impl SquareAvailable {
    /// Checks the target square against the ruleset.
    #[instrument(skip(game))]
    pub fn check(pos: Position, game: &Game) -> Result<(), MoveError> {
        match (game.mode(), game.board().get(pos)) {
            (_, Square::Empty) => Ok(()),
            (Mode::Basic, Square::Occupied(_)) => Err(MoveError::SquareOccupied(pos)),
            (Mode::Pro, Square::Occupied(owner)) if owner == game.to_move() => {
                Err(MoveError::OwnPiece(pos))
            }
            (Mode::Pro, Square::Occupied(_)) => Ok(()),
        }
    }
}

/// Composite precondition: the game is active and the square is available.
pub struct LegalPlacement;

impl LegalPlacement {
    /// Validates all preconditions for a placement.
    #[instrument(skip(game))]
    pub fn check(pos: Position, game: &Game) -> Result<(), MoveError> {
        GameActive::check(game)?;
        SquareAvailable::check(pos, game)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Placement Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for placement actions.
///
/// Preconditions:
/// - Game is in progress
/// - Square is available for the ruleset
///
/// Postconditions:
/// - Players still alternate
/// - Histories and log agree with the board
/// - No player exceeds three live pieces
pub struct PlacementContract;

impl Contract<Game, Position> for PlacementContract {
    fn pre(game: &Game, pos: &Position) -> Result<(), MoveError> {
        LegalPlacement::check(*pos, game)
    }

    fn post(before: &Game, after: &Game) -> Result<(), MoveError> {
        if after.move_count() != before.move_count() + 1 {
            warn!(
                before = before.move_count(),
                after = after.move_count(),
                "Placement did not record exactly one move"
            );
            return Err(MoveError::InvariantViolation(
                "Postcondition failed: exactly one move recorded".to_string(),
            ));
        }

        GameInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Postcondition failed");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Player;

    #[test]
    fn test_precondition_empty_square() {
        let game = Game::new(Mode::Basic);
        assert!(PlacementContract::pre(&game, &Position::Center).is_ok());
    }

    #[test]
    fn test_precondition_occupied_square_basic() {
        let game = Game::replay(Mode::Basic, &[Position::Center]).unwrap();
        assert!(matches!(
            PlacementContract::pre(&game, &Position::Center),
            Err(MoveError::SquareOccupied(_))
        ));
    }

    #[test]
    fn test_precondition_opponent_square_pro() {
        // X holds Center; O may land on it.
        let game = Game::replay(Mode::Pro, &[Position::Center]).unwrap();
        assert_eq!(game.to_move(), Player::O);
        assert!(PlacementContract::pre(&game, &Position::Center).is_ok());
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let before = Game::new(Mode::Pro);
        let mut after = before.clone();
        after.place(Position::Center).unwrap();
        assert!(PlacementContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let before = Game::new(Mode::Basic);
        let mut after = before.clone();
        after.place(Position::Center).unwrap();

        // Corrupt the board behind the log's back.
        after
            .board
            .set(Position::TopLeft, Square::Occupied(Player::O));

        assert!(PlacementContract::post(&before, &after).is_err());
    }
}
