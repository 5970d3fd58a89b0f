//! First-class invariants for tic-tac-toe.
//!
//! Invariants are logical properties that must hold throughout game execution.
//! They are testable independently and serve as documentation of system guarantees.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implementations are provided for tuples.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or Err with a list of
    /// violations if any invariant fails.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod alternating_turn;
pub mod bounded_history;
pub mod history_consistent;

pub use alternating_turn::AlternatingTurnInvariant;
pub use bounded_history::BoundedHistoryInvariant;
pub use history_consistent::HistoryConsistentInvariant;

/// All game invariants as a composable set.
pub type GameInvariants = (
    AlternatingTurnInvariant,
    HistoryConsistentInvariant,
    BoundedHistoryInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Game, Mode, Player, Position, Square};

    #[test]
    fn test_invariant_set_holds_for_new_games() {
        assert!(GameInvariants::check_all(&Game::new(Mode::Basic)).is_ok());
        assert!(GameInvariants::check_all(&Game::new(Mode::Pro)).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_pro_evictions() {
        let positions = [
            Position::TopLeft,
            Position::Center,
            Position::TopRight,
            Position::BottomLeft,
            Position::MiddleRight,
            Position::TopCenter,
            Position::BottomCenter,
        ];
        let game = Game::replay(Mode::Pro, &positions).unwrap();
        assert!(GameInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_violations() {
        let mut game = Game::replay(Mode::Basic, &[Position::Center]).unwrap();
        game.board
            .set(Position::TopLeft, Square::Occupied(Player::O));

        let violations = GameInvariants::check_all(&game).unwrap_err();
        assert!(!violations.is_empty());
    }
}
