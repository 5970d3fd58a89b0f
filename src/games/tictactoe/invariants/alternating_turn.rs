//! Alternating turn invariant: players alternate X, O, X, O, ...

use super::super::{Game, Player};
use super::Invariant;

/// Invariant: Players alternate turns.
///
/// The move log must show X, O, X, O, ... starting with X. A Pro log only
/// keeps its tail, so the last mover is checked against the parity of
/// [`Game::move_count`]. While the game is in progress, `to_move` is the
/// player after the last mover; once it has ended, `to_move` stays on the
/// last mover.
pub struct AlternatingTurnInvariant;

impl Invariant<Game> for AlternatingTurnInvariant {
    fn holds(game: &Game) -> bool {
        let moves = game.moves();
        let count = game.move_count();

        let Some(last) = moves.last() else {
            return count == 0 && game.to_move() == Player::X;
        };

        if moves.len() > count {
            return false;
        }

        // Full log: it must open with X.
        if moves.len() == count && moves[0].player != Player::X {
            return false;
        }

        if moves.windows(2).any(|w| w[0].player == w[1].player) {
            return false;
        }

        let parity_mover = if count % 2 == 1 { Player::X } else { Player::O };
        if last.player != parity_mover {
            return false;
        }

        let expected = if game.is_active() {
            last.player.opponent()
        } else {
            last.player
        };

        game.to_move() == expected
    }

    fn description() -> &'static str {
        "Players alternate turns (X, O, X, O, ...)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Mode, Move, Position};

    #[test]
    fn test_empty_game_holds() {
        assert!(AlternatingTurnInvariant::holds(&Game::new(Mode::Basic)));
    }

    #[test]
    fn test_alternating_sequence_holds() {
        let game = Game::replay(
            Mode::Pro,
            &[
                Position::TopLeft,
                Position::Center,
                Position::TopRight,
                Position::BottomLeft,
                Position::BottomRight,
            ],
        )
        .unwrap();
        assert!(AlternatingTurnInvariant::holds(&game));
        assert_eq!(game.to_move(), Player::O);
    }

    #[test]
    fn test_same_player_twice_violates() {
        let mut game = Game::replay(Mode::Basic, &[Position::TopLeft]).unwrap();
        game.moves.push(Move::new(Player::X, Position::Center));
        game.move_count += 1;
        assert!(!AlternatingTurnInvariant::holds(&game));
    }

    #[test]
    fn test_count_parity_must_match_last_mover() {
        let mut game = Game::replay(Mode::Pro, &[Position::TopLeft, Position::Center]).unwrap();
        game.move_count += 1;
        assert!(!AlternatingTurnInvariant::holds(&game));
    }

    #[test]
    fn test_holds_on_trimmed_pro_log() {
        use crate::games::tictactoe::PRO_MOVE_LOG_LEN;
        use Position::*;

        let game = Game::replay(
            Mode::Pro,
            &[TopLeft, Center, TopCenter, BottomRight, MiddleRight, MiddleLeft, BottomLeft],
        )
        .unwrap();
        assert_eq!(game.moves().len(), PRO_MOVE_LOG_LEN);
        assert_eq!(game.moves()[0].player, Player::O);
        assert!(AlternatingTurnInvariant::holds(&game));
    }
}
