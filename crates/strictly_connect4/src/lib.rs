//! Strictly Connect4 - connect-four game logic
//!
//! Pure game logic with no I/O: the board, win detection, the session state
//! machine and the automated opponents.
//!
//! # Architecture
//!
//! - **Board**: 6x7 gravity grid, mutated only by dropping a piece
//! - **Rules**: win detection from the last placement, draw detection
//! - **Engine**: forced-move dispatcher plus pluggable strategies
//! - **Registry**: read-only catalogue of automated opponents
//! - **Session**: the authoritative game and its turn rules
//! - **Arena**: automated-vs-automated matches
//!
//! # Example
//!
//! ```
//! use strictly_connect4::{GameSession, Mode, OpponentId, OpponentRegistry};
//!
//! let registry = OpponentRegistry::default();
//! let mut session = GameSession::new(Mode::HumanVsAutomated(OpponentId::FixedOrder));
//! session.apply_move(3)?;
//! let reply = session.request_automated_move(&registry)?;
//! assert!(reply.column < 7);
//! # Ok::<(), strictly_connect4::GameError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod arena;
mod board;
mod engine;
mod error;
mod registry;
mod rules;
mod session;
mod types;

// Crate-level exports - Board and core types
pub use board::{Board, Grid};
pub use types::{
    Axis, CENTER_OUT, COLS, CONNECT, Cell, Coord, ROWS, Side, Status, WinningLine,
};

// Crate-level exports - Rules
pub use rules::{check_win, is_draw};

// Crate-level exports - Engine
pub use engine::{
    AlphaBeta, EngineConfig, FixedOrder, Minimax, MonteCarlo, RandomMove, Strategy, evaluate,
    select_move, winning_columns,
};

// Crate-level exports - Opponent registry
pub use registry::{
    HUMAN_DISPLAY_NAME, HUMAN_ID, OpponentDescriptor, OpponentId, OpponentRegistry,
};

// Crate-level exports - Session
pub use session::{AUTOMATED_SIDE, GameSession, HUMAN_SIDE, Mode, MoveOutcome, SessionSnapshot};

// Crate-level exports - Matches
pub use arena::{MatchReport, play_match};

// Crate-level exports - Errors
pub use error::GameError;
