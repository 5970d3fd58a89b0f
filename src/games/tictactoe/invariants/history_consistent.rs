//! History consistency invariant: recorded pieces match the board.

use super::super::{Game, Mode, Player, Position};
use super::Invariant;

/// Invariant: what the game remembers agrees with what is on the board.
///
/// Basic rules never remove pieces, so the move count equals the number
/// of occupied squares. Pro rules track live pieces per player: every
/// history entry must be held by that player, every piece the player holds
/// must appear in their history, and no entry appears twice.
pub struct HistoryConsistentInvariant;

impl Invariant<Game> for HistoryConsistentInvariant {
    fn holds(game: &Game) -> bool {
        match game.mode() {
            Mode::Basic => game.move_count() == game.board().occupied(),
            Mode::Pro => [Player::X, Player::O].into_iter().all(|player| {
                let Some(history) = game.live_pieces(player) else {
                    return false;
                };
                let board = game.board();
                // Equal lengths plus coverage of every held cell rule out duplicates.
                history.len() == board.count(player)
                    && history.iter().all(|pos| board.is_held_by(pos, player))
                    && Position::ALL
                        .iter()
                        .filter(|pos| board.is_held_by(**pos, player))
                        .all(|pos| history.contains(*pos))
            }),
        }
    }

    fn description() -> &'static str {
        "Recorded pieces match the pieces on the board"
    }
}
