mod action;
mod contracts;
mod game;
mod history;
mod position;
mod score;
mod types;

pub mod invariants;
pub mod rules;

pub use action::{Move, MoveError, Placement};
pub use contracts::{Contract, GameActive, LegalPlacement, PlacementContract, SquareAvailable};
pub use game::{Game, PRO_MOVE_LOG_LEN};
pub use history::{LivePieces, MAX_LIVE_PIECES, MoveHistory};
pub use position::Position;
pub use rules::{LINES, Line};
pub use score::ScoreBoard;
pub use types::{Board, GameStatus, Mode, Player, Square};
