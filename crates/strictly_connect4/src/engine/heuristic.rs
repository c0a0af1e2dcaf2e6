//! Static evaluation of non-terminal positions.

use crate::board::Board;
use crate::types::{CONNECT, COLS, Cell, ROWS, Side};

/// Bonus per own piece in the center column.
const CENTER_WEIGHT: i32 = 3;

/// Scores `board` from `side`'s point of view.
///
/// Every four-cell window on all four axes is scored by [`score_window`],
/// plus a bonus for holding the center column.
pub fn evaluate(board: &Board, side: Side) -> i32 {
    let center = COLS / 2;
    let mut score = (0..ROWS)
        .filter(|&row| board.get(row, center).is(side))
        .count() as i32
        * CENTER_WEIGHT;

    // (row step, col step, row range, col range) for each window direction.
    let directions: [(isize, isize, std::ops::Range<usize>, std::ops::Range<usize>); 4] = [
        (0, 1, 0..ROWS, 0..COLS - CONNECT + 1),
        (1, 0, 0..ROWS - CONNECT + 1, 0..COLS),
        (1, 1, 0..ROWS - CONNECT + 1, 0..COLS - CONNECT + 1),
        (1, -1, 0..ROWS - CONNECT + 1, CONNECT - 1..COLS),
    ];

    for (dr, dc, rows, cols) in directions {
        for row in rows {
            for col in cols.clone() {
                let mut own = 0;
                let mut opp = 0;
                for i in 0..CONNECT as isize {
                    let r = (row as isize + dr * i) as usize;
                    let c = (col as isize + dc * i) as usize;
                    match board.get(r, c) {
                        Cell::Occupied(s) if s == side => own += 1,
                        Cell::Occupied(_) => opp += 1,
                        Cell::Empty => {}
                    }
                }
                score += score_window(own, opp);
            }
        }
    }

    score
}

/// Scores one window given own and opposing piece counts.
fn score_window(own: usize, opp: usize) -> i32 {
    let empty = CONNECT - own - opp;
    let mut score = match (own, empty) {
        (4, _) => 100,
        (3, 1) => 5,
        (2, 2) => 2,
        _ => 0,
    };
    score -= match (opp, empty) {
        (3, 1) => 4,
        (2, 2) => 1,
        _ => 0,
    };
    score
}
