//! Bounded per-player piece history for Pro mode.
//!
//! Each player may have at most [`MAX_LIVE_PIECES`] pieces on the board.
//! The history records them oldest first; pushing past capacity evicts
//! the front entry.

use super::{Player, Position};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, instrument};

/// Maximum live pieces per player in Pro mode.
pub const MAX_LIVE_PIECES: usize = 3;

/// Ordered record of one player's live pieces, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveHistory {
    entries: VecDeque<Position>,
}

impl MoveHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(MAX_LIVE_PIECES + 1),
        }
    }

    /// Appends a placement, returning the evicted oldest entry on overflow.
    ///
    /// A single push adds one entry, so at most one entry is evicted.
    #[instrument(skip(self))]
    pub fn push(&mut self, pos: Position) -> Option<Position> {
        self.entries.push_back(pos);
        if self.entries.len() > MAX_LIVE_PIECES {
            let evicted = self.entries.pop_front();
            debug!(?evicted, "History over capacity, evicted oldest");
            evicted
        } else {
            None
        }
    }

    /// Removes `pos` wherever it sits. Returns true if it was present.
    #[instrument(skip(self))]
    pub fn remove(&mut self, pos: Position) -> bool {
        match self.entries.iter().position(|p| *p == pos) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Returns true if `pos` is a live piece in this history.
    pub fn contains(&self, pos: Position) -> bool {
        self.entries.contains(&pos)
    }

    /// Oldest live piece (next to be evicted).
    pub fn oldest(&self) -> Option<Position> {
        self.entries.front().copied()
    }

    /// Most recently placed live piece.
    pub fn newest(&self) -> Option<Position> {
        self.entries.back().copied()
    }

    /// Number of live pieces.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no pieces are live.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Live pieces, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.entries.iter().copied()
    }

    /// Live pieces as a vector, oldest first.
    pub fn to_vec(&self) -> Vec<Position> {
        self.iter().collect()
    }
}

/// Move histories for both players.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LivePieces {
    histories: [MoveHistory; 2],
}

impl LivePieces {
    /// Creates empty histories for both players.
    pub fn new() -> Self {
        Self::default()
    }

    /// History for `player`.
    pub fn of(&self, player: Player) -> &MoveHistory {
        &self.histories[player.slot()]
    }

    /// Mutable history for `player`.
    pub fn of_mut(&mut self, player: Player) -> &mut MoveHistory {
        &mut self.histories[player.slot()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_under_capacity_keeps_order() {
        let mut history = MoveHistory::new();
        assert_eq!(history.push(Position::TopLeft), None);
        assert_eq!(history.push(Position::Center), None);
        assert_eq!(history.len(), 2);
        assert_eq!(history.oldest(), Some(Position::TopLeft));
        assert_eq!(history.newest(), Some(Position::Center));
    }

    #[test]
    fn test_fourth_push_evicts_oldest() {
        let mut history = MoveHistory::new();
        history.push(Position::TopLeft);
        history.push(Position::TopCenter);
        history.push(Position::TopRight);
        assert_eq!(history.push(Position::MiddleLeft), Some(Position::TopLeft));
        assert_eq!(
            history.to_vec(),
            vec![Position::TopCenter, Position::TopRight, Position::MiddleLeft]
        );
    }

    #[test]
    fn test_remove_from_middle() {
        let mut history = MoveHistory::new();
        history.push(Position::TopLeft);
        history.push(Position::Center);
        history.push(Position::BottomRight);
        assert!(history.remove(Position::Center));
        assert!(!history.remove(Position::Center));
        assert_eq!(
            history.to_vec(),
            vec![Position::TopLeft, Position::BottomRight]
        );
    }

    #[test]
    fn test_live_pieces_are_per_player() {
        let mut live = LivePieces::new();
        live.of_mut(Player::X).push(Position::Center);
        assert!(live.of(Player::X).contains(Position::Center));
        assert!(live.of(Player::O).is_empty());
    }
}
