//! Adversarial search strategies.

use super::{Strategy, WIN_SCORE, center_out_columns, evaluate, ordered_moves};
use crate::board::Board;
use crate::error::GameError;
use crate::rules::check_win;
use crate::types::{COLS, Side};
use tracing::{debug, instrument};

/// Bound wider than any reachable score.
const INFINITY: i32 = WIN_SCORE + 1;

/// Result of placing `side` in `col` on a copy of `board`.
enum Placement {
    /// The placement completes a line.
    Win,
    /// The placement fills the board without a line.
    Draw,
    /// Play continues on the returned board.
    Open(Board),
}

fn place(board: &Board, col: usize, side: Side) -> Option<Placement> {
    let mut next = *board;
    let row = next.drop(col, side).ok()?;
    Some(if check_win(&next, row, col, side).is_some() {
        Placement::Win
    } else if next.is_full() {
        Placement::Draw
    } else {
        Placement::Open(next)
    })
}

/// Negamax search with alpha-beta pruning.
///
/// Interior nodes try winning moves, then blocking moves, then the
/// remaining columns center-out. At the root columns are visited
/// center-out and a later column must score strictly better to replace
/// an earlier one.
#[derive(Debug, Clone, Copy)]
pub struct AlphaBeta {
    depth: u8,
}

impl AlphaBeta {
    /// Creates a searcher looking `depth` plies ahead (at least one).
    pub fn new(depth: u8) -> Self {
        Self {
            depth: depth.max(1),
        }
    }

    fn negamax(
        &self,
        board: &Board,
        side: Side,
        depth: u8,
        ply: i32,
        mut alpha: i32,
        beta: i32,
    ) -> i32 {
        if depth == 0 {
            return evaluate(board, side);
        }

        let mut best = -INFINITY;
        for col in ordered_moves(board, side) {
            let score = match place(board, col, side) {
                Some(Placement::Win) => WIN_SCORE - ply,
                Some(Placement::Draw) => 0,
                Some(Placement::Open(next)) => {
                    -self.negamax(&next, side.other(), depth - 1, ply + 1, -beta, -alpha)
                }
                None => continue,
            };
            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }
        best
    }
}

impl Strategy for AlphaBeta {
    #[instrument(skip(self, board), fields(depth = self.depth))]
    fn choose(&self, board: &Board, side: Side) -> Result<usize, GameError> {
        if board.is_empty() {
            return Ok(COLS / 2);
        }

        let mut best: Option<(usize, i32)> = None;
        let mut alpha = -INFINITY;
        for col in center_out_columns(board) {
            let score = match place(board, col, side) {
                Some(Placement::Win) => WIN_SCORE,
                Some(Placement::Draw) => 0,
                Some(Placement::Open(next)) => {
                    -self.negamax(&next, side.other(), self.depth - 1, 1, -INFINITY, -alpha)
                }
                None => continue,
            };
            debug!(col, score, "Root move scored");
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((col, score));
                alpha = alpha.max(score);
            }
        }

        best.map(|(col, _)| col).ok_or(GameError::NoLegalMove)
    }
}

/// Plain minimax without pruning.
#[derive(Debug, Clone, Copy)]
pub struct Minimax {
    depth: u8,
}

impl Minimax {
    /// Creates a searcher looking `depth` plies ahead (at least one).
    pub fn new(depth: u8) -> Self {
        Self {
            depth: depth.max(1),
        }
    }

    /// Value of `board` for `me` with `to_move` about to play.
    fn minimax(&self, board: &Board, me: Side, to_move: Side, depth: u8, ply: i32) -> i32 {
        if depth == 0 {
            return evaluate(board, me);
        }

        let maximizing = to_move == me;
        let mut value = if maximizing { -INFINITY } else { INFINITY };
        for col in center_out_columns(board) {
            let score = match place(board, col, to_move) {
                Some(Placement::Win) if maximizing => WIN_SCORE - ply,
                Some(Placement::Win) => -(WIN_SCORE - ply),
                Some(Placement::Draw) => 0,
                Some(Placement::Open(next)) => {
                    self.minimax(&next, me, to_move.other(), depth - 1, ply + 1)
                }
                None => continue,
            };
            value = if maximizing { value.max(score) } else { value.min(score) };
        }
        value
    }
}

impl Strategy for Minimax {
    #[instrument(skip(self, board), fields(depth = self.depth))]
    fn choose(&self, board: &Board, side: Side) -> Result<usize, GameError> {
        if board.is_empty() {
            return Ok(COLS / 2);
        }

        let mut best: Option<(usize, i32)> = None;
        for col in center_out_columns(board) {
            let score = match place(board, col, side) {
                Some(Placement::Win) => WIN_SCORE,
                Some(Placement::Draw) => 0,
                Some(Placement::Open(next)) => {
                    self.minimax(&next, side, side.other(), self.depth - 1, 1)
                }
                None => continue,
            };
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((col, score));
            }
        }

        best.map(|(col, _)| col).ok_or(GameError::NoLegalMove)
    }
}
