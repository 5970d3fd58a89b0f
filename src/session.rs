//! Mode sessions: one game plus its running score.
//!
//! A session is what a board screen drives. A cell tap goes through the
//! game's placement rules, and a win is recorded on the score board before
//! the renderer sees the new state.

use crate::games::tictactoe::{
    Game, GameStatus, Mode, MoveError, Placement, Player, Position, ScoreBoard,
};
use crate::render::BoardView;
use tracing::{debug, error, info, instrument, warn};

/// A move that could not be applied during a replay.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ReplayError {
    /// Input is neither `row,col` nor a cell number 1-9.
    #[display("'{}' is not a cell", _0)]
    Unparsable(String),
    /// The game refused the move.
    #[display("'{}' rejected: {}", input, error)]
    Rejected {
        /// Move as given.
        input: String,
        /// Why the game refused it.
        error: MoveError,
    },
}

impl std::error::Error for ReplayError {}

/// A game and its cumulative score under one ruleset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeSession {
    game: Game,
    scores: ScoreBoard,
}

impl ModeSession {
    /// Creates a session with a fresh game and zeroed scores.
    #[instrument]
    pub fn new(mode: Mode) -> Self {
        info!(%mode, "Creating mode session");
        Self {
            game: Game::new(mode),
            scores: ScoreBoard::new(),
        }
    }

    /// Ruleset of this session.
    pub fn mode(&self) -> Mode {
        self.game.mode()
    }

    /// Current game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Running score.
    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    /// Handles a cell tap at (`row`, `col`).
    ///
    /// A winning move increments the winner's score. Rejected taps leave the
    /// session untouched.
    #[instrument(skip(self), fields(mode = %self.mode()))]
    pub fn tap(&mut self, row: usize, col: usize) -> Result<Placement, MoveError> {
        match self.game.place_at(row, col) {
            Ok(placement) => {
                debug!(?placement, "Tap applied");
                if let GameStatus::Won(player) = placement.status {
                    self.scores.record_win(player);
                }
                Ok(placement)
            }
            Err(e) if e.is_invalid_move() => {
                warn!(error = %e, "Tap rejected");
                Err(e)
            }
            Err(e) => {
                error!(error = %e, "Game state check failed");
                Err(e)
            }
        }
    }

    /// Applies textual moves in order, as `row,col` or `1`-`9`.
    ///
    /// A bad move is reported and skipped; the rest still run.
    #[instrument(skip(self, moves), fields(mode = %self.mode()))]
    pub fn replay<'a>(&mut self, moves: impl IntoIterator<Item = &'a str>) -> Vec<ReplayError> {
        let mut errors = Vec::new();
        for input in moves {
            let Some(pos) = Position::parse_move(input) else {
                warn!(input, "Unparsable move");
                errors.push(ReplayError::Unparsable(input.to_string()));
                continue;
            };
            if let Err(error) = self.tap(pos.row(), pos.col()) {
                errors.push(ReplayError::Rejected {
                    input: input.to_string(),
                    error,
                });
            }
        }
        errors
    }

    /// "Reset": fresh board, scores kept.
    #[instrument(skip(self), fields(mode = %self.mode()))]
    pub fn reset_board(&mut self) {
        info!("Resetting board");
        self.game.reset();
    }

    /// "New Game": fresh board and zeroed scores.
    #[instrument(skip(self), fields(mode = %self.mode()))]
    pub fn new_game(&mut self) {
        info!("Starting new game");
        self.game.reset();
        self.scores.reset();
    }

    /// Wins for `player` in this session.
    pub fn wins(&self, player: Player) -> u32 {
        self.scores.wins(player)
    }

    /// Snapshot for a board renderer.
    pub fn view(&self) -> BoardView {
        BoardView::from_session(&self.game, &self.scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(session: &mut ModeSession, taps: &[(usize, usize)]) {
        for (row, col) in taps {
            session.tap(*row, *col).unwrap();
        }
    }

    #[test]
    fn test_win_records_score_once() {
        let mut session = ModeSession::new(Mode::Basic);
        play(&mut session, &[(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)]);
        assert_eq!(session.wins(Player::X), 1);

        // Further taps are rejected and do not score again.
        assert_eq!(session.tap(2, 0), Err(MoveError::GameOver));
        assert_eq!(session.wins(Player::X), 1);
    }

    #[test]
    fn test_reset_board_keeps_scores() {
        let mut session = ModeSession::new(Mode::Basic);
        play(&mut session, &[(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)]);
        session.reset_board();
        assert!(session.game().is_active());
        assert_eq!(session.game().board().occupied(), 0);
        assert_eq!(session.wins(Player::X), 1);
    }

    #[test]
    fn test_replay_skips_bad_moves() {
        let mut session = ModeSession::new(Mode::Basic);
        let errors = session.replay(["5", "5", "banana", "0,0"]);
        assert_eq!(
            errors,
            vec![
                ReplayError::Rejected {
                    input: "5".to_string(),
                    error: MoveError::SquareOccupied(Position::Center),
                },
                ReplayError::Unparsable("banana".to_string()),
            ]
        );
        assert_eq!(session.game().board().occupied(), 2);
        assert_eq!(session.game().to_move(), Player::X);
    }

    #[test]
    fn test_new_game_zeroes_scores() {
        let mut session = ModeSession::new(Mode::Pro);
        play(&mut session, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        assert_eq!(session.wins(Player::X), 1);
        session.new_game();
        assert_eq!(session.wins(Player::X), 0);
        assert_eq!(session.game().to_move(), Player::X);
    }
}
