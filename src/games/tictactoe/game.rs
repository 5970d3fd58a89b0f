//! Game state machine for Basic and Pro tic-tac-toe.
//!
//! A [`Game`] owns the board, whose turn it is, the status and, under Pro
//! rules, each player's live-piece history. [`Game::place`] is the single
//! mutation path; it validates through [`PlacementContract`] and, in debug
//! builds, re-checks the invariant set afterwards.

use super::action::{Move, MoveError, Placement};
use super::contracts::{Contract, PlacementContract};
use super::history::{LivePieces, MAX_LIVE_PIECES, MoveHistory};
use super::rules::{self, Line};
use super::{Board, GameStatus, Mode, Player, Position, Square};
use tracing::{debug, info, instrument};

/// Moves kept in the Pro log: one full set of live pieces per player.
pub const PRO_MOVE_LOG_LEN: usize = 2 * MAX_LIVE_PIECES;

/// A single game under one ruleset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub(super) mode: Mode,
    pub(super) board: Board,
    pub(super) to_move: Player,
    pub(super) status: GameStatus,
    pub(super) winning_line: Option<Line>,
    pub(super) moves: Vec<Move>,
    pub(super) move_count: usize,
    pub(super) live: Option<LivePieces>,
}

impl Game {
    /// Creates a new game: empty board, X to move.
    #[instrument]
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            board: Board::new(),
            to_move: Player::X,
            status: GameStatus::InProgress,
            winning_line: None,
            moves: Vec::new(),
            move_count: 0,
            live: match mode {
                Mode::Basic => None,
                Mode::Pro => Some(LivePieces::new()),
            },
        }
    }

    /// Ruleset for this game.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move (the winner, once the game is won).
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns true while moves are accepted.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Line that decided the game, for highlighting.
    pub fn winning_line(&self) -> Option<Line> {
        self.winning_line
    }

    /// Accepted moves, oldest first.
    ///
    /// Basic games keep all of them. Pro games never fill the board, so only
    /// the last [`PRO_MOVE_LOG_LEN`] are kept.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Total moves accepted since the game started.
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Live-piece history for `player`. `None` under Basic rules.
    pub fn live_pieces(&self, player: Player) -> Option<&MoveHistory> {
        self.live.as_ref().map(|live| live.of(player))
    }

    /// Places the current player's mark at (`row`, `col`).
    #[instrument(skip(self), fields(mode = %self.mode, player = %self.to_move))]
    pub fn place_at(&mut self, row: usize, col: usize) -> Result<Placement, MoveError> {
        let pos = Position::from_row_col(row, col).ok_or(MoveError::OutOfBounds { row, col })?;
        self.place(pos)
    }

    /// Places the current player's mark at `pos`.
    ///
    /// On error the game is unchanged.
    #[instrument(skip(self), fields(mode = %self.mode, player = %self.to_move))]
    pub fn place(&mut self, pos: Position) -> Result<Placement, MoveError> {
        PlacementContract::pre(self, &pos)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let player = self.to_move;
        let (captured, evicted) = match self.mode {
            Mode::Basic => {
                self.board.set(pos, Square::Occupied(player));
                (None, None)
            }
            Mode::Pro => self.place_pro(pos, player),
        };
        self.moves.push(Move::new(player, pos));
        self.move_count += 1;
        if self.mode == Mode::Pro && self.moves.len() > PRO_MOVE_LOG_LEN {
            self.moves.remove(0);
        }

        if let Some(line) = rules::winning_line(&self.board, player) {
            info!(%player, ?line, "Game won");
            self.status = GameStatus::Won(player);
            self.winning_line = Some(line);
        } else if self.mode == Mode::Basic && rules::is_full(&self.board) {
            info!("Game drawn");
            self.status = GameStatus::Draw;
        } else {
            self.to_move = player.opponent();
        }

        #[cfg(debug_assertions)]
        if let Err(e) = PlacementContract::post(&before, self) {
            *self = before;
            return Err(e);
        }

        Ok(Placement {
            mov: Move::new(player, pos),
            captured,
            evicted,
            status: self.status,
        })
    }

    /// Pro placement: capture, append, evict, mark.
    fn place_pro(&mut self, pos: Position, player: Player) -> (Option<Position>, Option<Position>) {
        let opponent = player.opponent();
        let live = self.live.get_or_insert_with(LivePieces::new);

        let captured = if self.board.is_held_by(pos, opponent) {
            live.of_mut(opponent).remove(pos);
            self.board.clear(pos);
            debug!(?pos, %opponent, "Captured opponent piece");
            Some(pos)
        } else {
            None
        };

        let evicted = live.of_mut(player).push(pos);
        if let Some(old) = evicted {
            self.board.clear(old);
            debug!(?old, %player, "Evicted oldest piece");
        }

        self.board.set(pos, Square::Occupied(player));
        (captured, evicted)
    }

    /// Returns to the initial state under the same ruleset.
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub fn reset(&mut self) {
        *self = Self::new(self.mode);
    }

    /// Replays positions from a fresh game, stopping at the first error.
    #[instrument]
    pub fn replay(mode: Mode, positions: &[Position]) -> Result<Self, MoveError> {
        let mut game = Self::new(mode);
        for pos in positions {
            game.place(*pos)?;
        }
        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Position::*;

    #[test]
    fn test_new_game_initial_state() {
        let game = Game::new(Mode::Basic);
        assert_eq!(game.to_move(), Player::X);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert!(game.live_pieces(Player::X).is_none());

        let pro = Game::new(Mode::Pro);
        assert_eq!(pro.live_pieces(Player::O).map(MoveHistory::len), Some(0));
    }

    #[test]
    fn test_basic_rejects_occupied_without_change() {
        let mut game = Game::replay(Mode::Basic, &[Center]).unwrap();
        let snapshot = game.clone();
        assert_eq!(game.place(Center), Err(MoveError::SquareOccupied(Center)));
        assert_eq!(game, snapshot);
    }

    #[test]
    fn test_pro_rejects_own_piece() {
        // X at Center, O at TopLeft, X taps Center again.
        let mut game = Game::replay(Mode::Pro, &[Center, TopLeft]).unwrap();
        let snapshot = game.clone();
        assert_eq!(game.place(Center), Err(MoveError::OwnPiece(Center)));
        assert_eq!(game, snapshot);
    }

    #[test]
    fn test_moves_rejected_after_win() {
        let mut game =
            Game::replay(Mode::Basic, &[TopLeft, Center, TopCenter, BottomRight, TopRight])
                .unwrap();
        assert_eq!(game.status(), GameStatus::Won(Player::X));
        assert_eq!(game.place(BottomLeft), Err(MoveError::GameOver));
    }

    #[test]
    fn test_place_at_out_of_bounds() {
        let mut game = Game::new(Mode::Pro);
        assert_eq!(
            game.place_at(1, 3),
            Err(MoveError::OutOfBounds { row: 1, col: 3 })
        );
    }

    #[test]
    fn test_pro_capture_and_evict_in_one_move() {
        // X: TL, TC, TR would win, so use a non-winning spread.
        let mut game = Game::replay(
            Mode::Pro,
            &[TopLeft, Center, BottomRight, MiddleLeft, TopRight, BottomCenter],
        )
        .unwrap();
        assert_eq!(game.to_move(), Player::X);

        // X captures O's Center; X already has three, so TopLeft goes.
        let placement = game.place(Center).unwrap();
        assert_eq!(placement.captured, Some(Center));
        assert_eq!(placement.evicted, Some(TopLeft));
        assert!(game.board().is_empty(TopLeft));
        assert!(game.board().is_held_by(Center, Player::X));
        assert_eq!(
            game.live_pieces(Player::O).unwrap().to_vec(),
            vec![MiddleLeft, BottomCenter]
        );
    }

    #[test]
    fn test_pro_move_log_stays_bounded() {
        // X cycles TL, TC, MR, BL and O cycles C, BR, ML, BC: no line ever forms.
        let x_cells = [TopLeft, TopCenter, MiddleRight, BottomLeft];
        let o_cells = [Center, BottomRight, MiddleLeft, BottomCenter];
        let mut game = Game::new(Mode::Pro);
        for turn in 0..400 {
            let pos = if turn % 2 == 0 {
                x_cells[(turn / 2) % 4]
            } else {
                o_cells[(turn / 2) % 4]
            };
            game.place(pos).unwrap();
            assert!(game.moves().len() <= PRO_MOVE_LOG_LEN);
        }
        assert_eq!(game.move_count(), 400);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.moves().last(), Some(&Move::new(Player::O, BottomCenter)));
    }

    #[test]
    fn test_basic_keeps_full_log() {
        let game = Game::replay(Mode::Basic, &[Center, TopLeft, TopRight, BottomLeft]).unwrap();
        assert_eq!(game.moves().len(), 4);
        assert_eq!(game.move_count(), 4);
    }

    #[test]
    fn test_reset_keeps_mode() {
        let mut game = Game::replay(Mode::Pro, &[Center]).unwrap();
        game.reset();
        assert_eq!(game, Game::new(Mode::Pro));
    }
}
