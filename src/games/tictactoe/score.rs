//! Cumulative win counters.

use super::Player;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Wins per player across games in one session.
///
/// Board resets leave it alone; only [`ScoreBoard::reset`] zeroes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ScoreBoard {
    wins_x: u32,
    wins_o: u32,
}

impl ScoreBoard {
    /// Creates a zeroed score board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one win for `player`.
    #[instrument(skip(self))]
    pub fn record_win(&mut self, player: Player) {
        match player {
            Player::X => self.wins_x += 1,
            Player::O => self.wins_o += 1,
        }
        info!(wins_x = self.wins_x, wins_o = self.wins_o, "Score updated");
    }

    /// Wins for `player`.
    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::X => self.wins_x,
            Player::O => self.wins_o,
        }
    }

    /// Zeroes both counters.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
