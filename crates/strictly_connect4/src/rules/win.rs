//! Win detection for connect four.

use crate::board::Board;
use crate::types::{Axis, CONNECT, Coord, Side, WinningLine};
use strum::IntoEnumIterator;
use tracing::instrument;

/// Checks whether the piece just placed at `(row, col)` completes a line.
///
/// Only the four axes through the placed cell are scanned, in the order
/// horizontal, vertical, diagonal, anti-diagonal. The first qualifying axis
/// wins and the line reported is the first four cells of the run, counted
/// from its end in the negative direction of the axis.
#[instrument(level = "trace", skip(board))]
pub fn check_win(board: &Board, row: usize, col: usize, side: Side) -> Option<WinningLine> {
    if !board.get(row, col).is(side) {
        return None;
    }

    Axis::iter().find_map(|axis| line_along(board, row, col, side, axis))
}

fn line_along(
    board: &Board,
    row: usize,
    col: usize,
    side: Side,
    axis: Axis,
) -> Option<WinningLine> {
    let (dr, dc) = axis.step();
    let same = |r: isize, c: isize| board.get_signed(r, c).is_some_and(|cell| cell.is(side));

    // Walk back to the start of the run.
    let (mut r, mut c) = (row as isize, col as isize);
    while same(r - dr, c - dc) {
        r -= dr;
        c -= dc;
    }

    let mut cells = [Coord::new(0, 0); CONNECT];
    for (i, cell) in cells.iter_mut().enumerate() {
        let (cr, cc) = (r + dr * i as isize, c + dc * i as isize);
        if !same(cr, cc) {
            return None;
        }
        *cell = Coord::new(cr as usize, cc as usize);
    }

    Some(WinningLine { axis, cells })
}
