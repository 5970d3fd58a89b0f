//! Bounded history invariant: no player exceeds three live pieces.

use super::super::history::MAX_LIVE_PIECES;
use super::super::{Game, Player};
use super::Invariant;

/// Invariant: each Pro history holds at most [`MAX_LIVE_PIECES`] entries.
///
/// Trivially true under Basic rules, which keep no histories.
pub struct BoundedHistoryInvariant;

impl Invariant<Game> for BoundedHistoryInvariant {
    fn holds(game: &Game) -> bool {
        [Player::X, Player::O].into_iter().all(|player| {
            game.live_pieces(player)
                .is_none_or(|history| history.len() <= MAX_LIVE_PIECES)
        })
    }

    fn description() -> &'static str {
        "Each player has at most three live pieces"
    }
}
