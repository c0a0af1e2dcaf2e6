//! Automated-vs-automated matches.

use crate::board::Board;
use crate::error::GameError;
use crate::registry::{OpponentId, OpponentRegistry};
use crate::rules::{check_win, is_draw};
use crate::types::{Side, Status, WinningLine};
use derive_getters::Getters;
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Result of a finished match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct MatchReport {
    /// Opponent playing side A.
    first: OpponentId,
    /// Opponent playing side B.
    second: OpponentId,
    /// Final position.
    board: Board,
    /// Columns in the order they were played.
    moves: Vec<usize>,
    /// Final status, never [`Status::InProgress`].
    status: Status,
    /// Winning line, if the match was won.
    winning_line: Option<WinningLine>,
}

impl MatchReport {
    /// Opponent that won, if any.
    pub fn winner(&self) -> Option<OpponentId> {
        match self.status {
            Status::Won(Side::First) => Some(self.first),
            Status::Won(Side::Second) => Some(self.second),
            _ => None,
        }
    }
}

/// Plays `first` (side A) against `second` (side B) from an empty board.
///
/// # Errors
///
/// [`GameError::OpponentNotFound`] if either opponent is not registered.
#[instrument(skip(registry))]
pub fn play_match(
    registry: &OpponentRegistry,
    first: OpponentId,
    second: OpponentId,
) -> Result<MatchReport, GameError> {
    registry.get(first)?;
    registry.get(second)?;

    let mut board = Board::new();
    let mut moves = Vec::new();
    let mut side = Side::First;
    loop {
        let opponent = match side {
            Side::First => first,
            Side::Second => second,
        };
        let column = registry.select_move(opponent, &board, side)?;
        let row = board.drop(column, side)?;
        moves.push(column);
        debug!(%opponent, column, row, "Match move");

        let line = check_win(&board, row, column, side);
        let status = if line.is_some() {
            Status::Won(side)
        } else if is_draw(&board, line.as_ref()) {
            Status::Drawn
        } else {
            side = side.other();
            continue;
        };

        info!(?status, moves = moves.len(), "Match finished");
        return Ok(MatchReport {
            first,
            second,
            board,
            moves,
            status,
            winning_line: line,
        });
    }
}
