//! Board renderer seam.
//!
//! The game core never touches a display. After every change it hands a
//! [`BoardView`] to whatever implements [`BoardRenderer`]: the terminal
//! board screen, or [`TextRenderer`] for headless replays.

use crate::games::tictactoe::{
    Board, Game, GameStatus, Line, MAX_LIVE_PIECES, Mode, Player, Position, ScoreBoard, Square,
};
use derive_getters::Getters;
use serde::Serialize;
use std::fmt::Write as _;
use tracing::instrument;

/// How a single cell should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CellHighlight {
    /// Empty cell.
    None,
    /// Occupied cell with no special role.
    Placed,
    /// The owner's most recent live piece (Pro only).
    Newest,
    /// Part of the winning line.
    Winning,
}

/// Everything a renderer needs to draw one board.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
pub struct BoardView {
    mode: Mode,
    board: Board,
    current_player: Player,
    active: bool,
    status: GameStatus,
    winning_line: Option<Line>,
    scores: ScoreBoard,
    /// Live piece counts for X and O (Pro only).
    live_counts: Option<[usize; 2]>,
    /// Newest live piece for X and O (Pro only).
    newest: [Option<Position>; 2],
}

impl BoardView {
    /// Builds a view from a game and its score board.
    pub fn from_session(game: &Game, scores: &ScoreBoard) -> Self {
        let history = |player| game.live_pieces(player);
        let live_counts = match (history(Player::X), history(Player::O)) {
            (Some(x), Some(o)) => Some([x.len(), o.len()]),
            _ => None,
        };
        let newest = [
            history(Player::X).and_then(|h| h.newest()),
            history(Player::O).and_then(|h| h.newest()),
        ];

        Self {
            mode: game.mode(),
            board: game.board().clone(),
            current_player: game.to_move(),
            active: game.is_active(),
            status: game.status(),
            winning_line: game.winning_line(),
            scores: *scores,
            live_counts,
            newest,
        }
    }

    /// Live pieces held by `player`, when the mode tracks them.
    pub fn live_count(&self, player: Player) -> Option<usize> {
        self.live_counts.map(|counts| counts[player.slot()])
    }

    /// Status line shown above the board.
    pub fn status_line(&self) -> String {
        match self.status {
            GameStatus::InProgress => match self.live_count(self.current_player) {
                Some(count) => format!(
                    "Player {}'s Turn ({}/{} pieces)",
                    self.current_player, count, MAX_LIVE_PIECES
                ),
                None => format!("Player {}'s Turn", self.current_player),
            },
            GameStatus::Won(player) => match self.mode {
                Mode::Basic => format!("Player {} Wins!", player),
                Mode::Pro => format!("🎉 Player {} Wins! 🎉", player),
            },
            GameStatus::Draw => "It's a Draw!".to_string(),
        }
    }

    /// Highlight for the cell at `pos`.
    pub fn cell_highlight(&self, pos: Position) -> CellHighlight {
        if self.winning_line.is_some_and(|line| line.contains(pos)) {
            return CellHighlight::Winning;
        }
        match self.board.get(pos) {
            Square::Empty => CellHighlight::None,
            Square::Occupied(owner) if self.newest[owner.slot()] == Some(pos) => {
                CellHighlight::Newest
            }
            Square::Occupied(_) => CellHighlight::Placed,
        }
    }
}

/// Error raised when a renderer cannot draw the board.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RenderError {
    /// A control the board depends on could not be placed on screen.
    #[display("Required control '{}' is missing", target)]
    TargetMissing {
        /// Name of the missing control.
        target: String,
    },
}

impl std::error::Error for RenderError {}

/// Pushes board state to a display surface.
pub trait BoardRenderer {
    /// Draws `view`. Called after every state change.
    fn render(&mut self, view: &BoardView) -> Result<(), RenderError>;
}

/// Renders boards as plain text into an in-memory buffer.
#[derive(Debug, Default)]
pub struct TextRenderer {
    output: String,
}

impl TextRenderer {
    /// Creates an empty renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text rendered so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Takes the rendered text, leaving the buffer empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

impl BoardRenderer for TextRenderer {
    #[instrument(skip_all)]
    fn render(&mut self, view: &BoardView) -> Result<(), RenderError> {
        let _ = writeln!(self.output, "[{}]", view.mode.label());
        let _ = writeln!(self.output, "{}", view.board.display());
        let _ = writeln!(self.output, "{}", view.status_line());
        if let Some(line) = view.winning_line {
            let cells = line
                .positions()
                .iter()
                .map(|p| format!("({}, {})", p.row(), p.col()))
                .collect::<Vec<_>>()
                .join(" ");
            let _ = writeln!(self.output, "Winning line: {}", cells);
        }
        let _ = writeln!(
            self.output,
            "Score  X: {}  O: {}",
            view.scores.wins_x(),
            view.scores.wins_o()
        );
        Ok(())
    }
}
