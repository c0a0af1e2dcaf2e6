//! Draw detection for connect four.

use crate::board::Board;
use crate::types::WinningLine;
use tracing::instrument;

/// A full board whose last placement made no line is a draw.
#[instrument(skip(board, last_line))]
pub fn is_draw(board: &Board, last_line: Option<&WinningLine>) -> bool {
    last_line.is_none() && board.is_full()
}
