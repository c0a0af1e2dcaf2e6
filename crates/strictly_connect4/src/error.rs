//! Error taxonomy for board, session and engine operations.

use crate::registry::OpponentId;
use crate::types::{COLS, Side};

/// Error raised by a game operation.
///
/// Every failing operation leaves the board and session untouched.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum GameError {
    /// Column index outside `0..COLS`.
    #[display("Column {column} is out of range (must be 0-{})", COLS - 1)]
    ColumnOutOfRange {
        /// The requested column.
        column: i64,
    },

    /// The column has no empty cell left.
    #[display("Column {column} is full")]
    ColumnFull {
        /// The requested column.
        column: usize,
    },

    /// A human move arrived while the automated side is to move.
    #[display("Not your turn: waiting for {active}")]
    WrongTurn {
        /// Side that is actually to move.
        active: Side,
    },

    /// The game has already ended.
    #[display("Game is already over")]
    GameOver,

    /// An automated move was requested when none is due.
    #[display("Not the automated opponent's turn")]
    NotAutomatedTurn,

    /// Opponent selection after the first move.
    #[display("Cannot change opponent after the game has started")]
    GameAlreadyStarted,

    /// The engine was asked to move on a full board.
    #[display("No legal move available")]
    NoLegalMove,

    /// The opponent id is valid but not enabled in this registry.
    #[display("Opponent {id} is not available")]
    OpponentNotFound {
        /// The requested opponent.
        id: OpponentId,
    },

    /// The opponent id string is not recognised.
    #[display("Unknown opponent: {id}")]
    UnknownOpponent {
        /// The requested id.
        id: String,
    },

    /// A board grid violates encoding or gravity.
    #[display("Invalid board: {reason}")]
    InvalidBoard {
        /// What was wrong.
        reason: String,
    },
}

impl GameError {
    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

impl std::error::Error for GameError {}
