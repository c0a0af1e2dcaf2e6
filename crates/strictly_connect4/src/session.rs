//! The authoritative game session and its state machine.

use crate::board::Board;
use crate::error::GameError;
use crate::registry::{OpponentId, OpponentRegistry};
use crate::rules::{check_win, is_draw};
use crate::types::{COLS, Cell, ROWS, Side, Status, WinningLine};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Side played by the human in human-vs-automated mode.
pub const HUMAN_SIDE: Side = Side::First;

/// Side played by the automated opponent in human-vs-automated mode.
pub const AUTOMATED_SIDE: Side = Side::Second;

/// Who is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// A human (side A) against a registered opponent (side B).
    HumanVsAutomated(OpponentId),
    /// Two humans sharing one client.
    HumanVsHuman,
}

impl Mode {
    /// True for local two-player mode.
    pub fn is_human_vs_human(self) -> bool {
        matches!(self, Mode::HumanVsHuman)
    }

    /// The automated opponent, if any.
    pub fn opponent(self) -> Option<OpponentId> {
        match self {
            Mode::HumanVsAutomated(id) => Some(id),
            Mode::HumanVsHuman => None,
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::HumanVsAutomated(OpponentId::AlphaBeta)
    }
}

/// An accepted placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Side that moved.
    pub side: Side,
    /// Column played.
    pub column: usize,
    /// Row the piece landed in.
    pub row: usize,
    /// Status after the move.
    pub status: Status,
}

/// Immutable view of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Board contents.
    pub board: Board,
    /// Side to move (the last mover once the game is over).
    pub active_side: Side,
    /// Game status.
    pub status: Status,
    /// Winning line, once a side has won.
    pub winning_line: Option<WinningLine>,
    /// Current mode.
    pub mode: Mode,
    /// True once the first move was accepted.
    pub started: bool,
}

/// One game of connect four.
#[derive(Debug, Clone, Getters)]
pub struct GameSession {
    /// Board contents.
    board: Board,
    /// Side to move.
    active_side: Side,
    /// Current mode.
    mode: Mode,
    /// True once the first move was accepted.
    started: bool,
    /// Game status.
    status: Status,
    /// Winning line, once a side has won.
    winning_line: Option<WinningLine>,
}

impl GameSession {
    /// Creates a fresh session with side A to move.
    #[instrument]
    pub fn new(mode: Mode) -> Self {
        info!("Creating new game session");
        Self {
            board: Board::new(),
            active_side: Side::First,
            mode,
            started: false,
            status: Status::InProgress,
            winning_line: None,
        }
    }

    /// Resumes play on an existing position.
    ///
    /// The side to move is inferred from the piece counts.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidBoard`] if the counts are impossible, if a side
    /// already has a line, or if the board is full.
    #[instrument(skip(board))]
    pub fn from_board(board: Board, mode: Mode) -> Result<Self, GameError> {
        let cells = board.snapshot();
        let count = |side: Side| cells.iter().flatten().filter(|c| c.is(side)).count();
        let (first, second) = (count(Side::First), count(Side::Second));
        let active_side = if first == second {
            Side::First
        } else if first == second + 1 {
            Side::Second
        } else {
            return Err(GameError::InvalidBoard {
                reason: format!("{first} pieces for player 1 against {second} for player 2"),
            });
        };

        for row in 0..ROWS {
            for col in 0..COLS {
                if let Cell::Occupied(side) = cells[row][col]
                    && check_win(&board, row, col, side).is_some()
                {
                    return Err(GameError::InvalidBoard {
                        reason: format!("{side} already has a line through ({row}, {col})"),
                    });
                }
            }
        }
        if board.is_full() {
            return Err(GameError::InvalidBoard {
                reason: "board is full".to_string(),
            });
        }

        Ok(Self {
            board,
            active_side,
            mode,
            started: first + second > 0,
            status: Status::InProgress,
            winning_line: None,
        })
    }

    /// Plays a human move in `column` for the active side.
    ///
    /// # Errors
    ///
    /// [`GameError::GameOver`] once the game has ended,
    /// [`GameError::WrongTurn`] if the automated side is to move, and the
    /// board errors for bad columns. Nothing changes on error.
    #[instrument(skip(self), fields(active = ?self.active_side))]
    pub fn apply_move(&mut self, column: usize) -> Result<MoveOutcome, GameError> {
        if self.status.is_over() {
            warn!("Move rejected, game over");
            return Err(GameError::GameOver);
        }
        if !self.mode.is_human_vs_human() && self.active_side == AUTOMATED_SIDE {
            warn!("Move rejected, automated side to move");
            return Err(GameError::WrongTurn {
                active: self.active_side,
            });
        }
        self.place(column)
    }

    /// Lets the automated opponent play its move.
    ///
    /// # Errors
    ///
    /// [`GameError::GameOver`] once the game has ended,
    /// [`GameError::NotAutomatedTurn`] in human-vs-human mode or when the
    /// human is to move, and registry or engine errors.
    #[instrument(skip(self, registry), fields(mode = ?self.mode))]
    pub fn request_automated_move(
        &mut self,
        registry: &OpponentRegistry,
    ) -> Result<MoveOutcome, GameError> {
        if self.status.is_over() {
            return Err(GameError::GameOver);
        }
        let opponent = match self.mode {
            Mode::HumanVsAutomated(id) if self.active_side == AUTOMATED_SIDE => id,
            _ => return Err(GameError::NotAutomatedTurn),
        };
        let column = registry.select_move(opponent, &self.board, self.active_side)?;
        info!(%opponent, column, "Automated opponent chose column");
        self.place(column)
    }

    /// Switches the mode before the first move.
    ///
    /// # Errors
    ///
    /// [`GameError::GameAlreadyStarted`] once a move was accepted.
    #[instrument(skip(self))]
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), GameError> {
        if self.started {
            warn!("Mode change rejected, game already started");
            return Err(GameError::GameAlreadyStarted);
        }
        self.mode = mode;
        self.active_side = Side::First;
        info!("Mode changed");
        Ok(())
    }

    /// Starts a new game in the same mode.
    #[instrument(skip(self), fields(mode = ?self.mode))]
    pub fn reset(&mut self) {
        *self = Self::new(self.mode);
    }

    /// Read-only copy of the session.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            board: self.board,
            active_side: self.active_side,
            status: self.status,
            winning_line: self.winning_line,
            mode: self.mode,
            started: self.started,
        }
    }

    /// Drops a piece for the active side and advances the state machine.
    fn place(&mut self, column: usize) -> Result<MoveOutcome, GameError> {
        let side = self.active_side;
        let row = self.board.drop(column, side)?;
        self.started = true;

        let line = check_win(&self.board, row, column, side);
        if let Some(line) = line {
            self.status = Status::Won(side);
            self.winning_line = Some(line);
            info!(%side, column, row, "Game won");
        } else if is_draw(&self.board, line.as_ref()) {
            self.status = Status::Drawn;
            info!(column, row, "Game drawn");
        } else {
            self.active_side = side.other();
            info!(%side, column, row, "Move accepted");
        }

        Ok(MoveOutcome {
            side,
            column,
            row,
            status: self.status,
        })
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_waits_for_side_a() {
        let session = GameSession::default();
        assert_eq!(*session.active_side(), Side::First);
        assert!(!session.started());
        assert_eq!(*session.status(), Status::InProgress);
    }

    #[test]
    fn test_failed_move_does_not_start_game() {
        let mut session = GameSession::default();
        assert!(session.apply_move(7).is_err());
        assert!(!session.started());
        assert!(session.set_mode(Mode::HumanVsHuman).is_ok());
    }

    #[test]
    fn test_from_board_infers_side_to_move() {
        let mut board = Board::new();
        board.drop(3, Side::First).unwrap();
        let session = GameSession::from_board(board, Mode::HumanVsHuman).unwrap();
        assert_eq!(*session.active_side(), Side::Second);
        assert!(session.started());
    }

    #[test]
    fn test_from_board_rejects_impossible_counts() {
        let mut board = Board::new();
        board.drop(3, Side::Second).unwrap();
        assert!(matches!(
            GameSession::from_board(board, Mode::HumanVsHuman),
            Err(GameError::InvalidBoard { .. })
        ));
    }

    #[test]
    fn test_from_board_rejects_decided_position() {
        let mut board = Board::new();
        for col in 0..4 {
            board.drop(col, Side::First).unwrap();
        }
        for col in 0..3 {
            board.drop(col, Side::Second).unwrap();
        }
        assert!(GameSession::from_board(board, Mode::HumanVsHuman).is_err());
    }

    #[test]
    fn test_mode_helpers() {
        assert!(Mode::HumanVsHuman.is_human_vs_human());
        assert_eq!(Mode::HumanVsHuman.opponent(), None);
        assert_eq!(Mode::default().opponent(), Some(OpponentId::AlphaBeta));
    }
}
