//! Automated opponent engine.
//!
//! [`select_move`] applies the forced-move rules shared by every opponent
//! (take an immediate win, block a single immediate threat) and otherwise
//! delegates to a pluggable [`Strategy`].

mod fixed;
mod heuristic;
mod playout;
mod search;

pub use fixed::FixedOrder;
pub use heuristic::evaluate;
pub use playout::{MonteCarlo, RandomMove};
pub use search::{AlphaBeta, Minimax};

use crate::board::Board;
use crate::error::GameError;
use crate::rules::check_win;
use crate::types::{CENTER_OUT, Side};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Score of a won position, reduced by the ply it was reached at.
pub(crate) const WIN_SCORE: i32 = 1_000_000;

/// A move-selection algorithm.
///
/// Implementations never mutate the board they are given and are
/// deterministic for a fixed board, side and configuration.
pub trait Strategy: std::fmt::Debug + Send + Sync {
    /// Chooses a column for `side`. The board has at least one open column.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NoLegalMove`] if every column is full.
    fn choose(&self, board: &Board, side: Side) -> Result<usize, GameError>;
}

/// Tuning knobs for the built-in strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters, derive_new::new)]
#[serde(default)]
pub struct EngineConfig {
    /// Plies searched by the alpha-beta opponent.
    alpha_beta_depth: u8,
    /// Plies searched by the plain minimax opponent.
    minimax_depth: u8,
    /// Random playouts per Monte Carlo decision.
    monte_carlo_playouts: u32,
    /// Seed for the randomised opponents.
    seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            alpha_beta_depth: 6,
            minimax_depth: 4,
            monte_carlo_playouts: 1000,
            seed: 0,
        }
    }
}

/// Selects a column for `side` using `strategy`.
///
/// An immediately winning column is always taken. Otherwise a single
/// immediate threat by the opponent is blocked. Everything else is left to
/// the strategy.
///
/// # Errors
///
/// Returns [`GameError::NoLegalMove`] if the board is full.
#[instrument(skip(board, strategy), fields(pieces = board.piece_count()))]
pub fn select_move(board: &Board, side: Side, strategy: &dyn Strategy) -> Result<usize, GameError> {
    if board.is_full() {
        return Err(GameError::NoLegalMove);
    }

    if let Some(&column) = winning_columns(board, side).first() {
        debug!(column, "Taking immediate win");
        return Ok(column);
    }

    let threats = winning_columns(board, side.other());
    if let [column] = threats.as_slice() {
        debug!(column, "Blocking immediate threat");
        return Ok(*column);
    }

    let column = strategy.choose(board, side)?;
    debug!(column, ?strategy, "Strategy chose column");
    Ok(column)
}

/// Open columns in center-out order.
pub(crate) fn center_out_columns(board: &Board) -> impl Iterator<Item = usize> + '_ {
    CENTER_OUT
        .iter()
        .copied()
        .filter(|&col| !board.is_column_full(col))
}

/// Columns where `side` would complete a line right now, center-out.
pub fn winning_columns(board: &Board, side: Side) -> Vec<usize> {
    center_out_columns(board)
        .filter(|&col| {
            let mut next = *board;
            next.drop(col, side)
                .is_ok_and(|row| check_win(&next, row, col, side).is_some())
        })
        .collect()
}

/// Open columns ordered for search: wins, then blocks, then center-out.
pub(crate) fn ordered_moves(board: &Board, side: Side) -> Vec<usize> {
    let wins = winning_columns(board, side);
    let blocks = winning_columns(board, side.other());
    let mut moves: Vec<usize> = center_out_columns(board).collect();
    moves.sort_by_key(|col| {
        if wins.contains(col) {
            0
        } else if blocks.contains(col) {
            1
        } else {
            2
        }
    });
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{COLS, ROWS};

    #[derive(Debug)]
    struct Leftmost;

    impl Strategy for Leftmost {
        fn choose(&self, board: &Board, _side: Side) -> Result<usize, GameError> {
            board
                .legal_columns()
                .first()
                .copied()
                .ok_or(GameError::NoLegalMove)
        }
    }

    #[test]
    fn test_full_board_has_no_legal_move() {
        let mut board = Board::new();
        for col in 0..COLS {
            for row in 0..ROWS {
                let side = if (row + col / 2) % 2 == 0 { Side::First } else { Side::Second };
                board.drop(col, side).unwrap();
            }
        }
        assert_eq!(
            select_move(&board, Side::First, &Leftmost),
            Err(GameError::NoLegalMove)
        );
    }

    #[test]
    fn test_win_overrides_strategy() {
        let mut board = Board::new();
        for col in [4, 5, 6] {
            board.drop(col, Side::First).unwrap();
        }
        assert_eq!(select_move(&board, Side::First, &Leftmost), Ok(3));
    }

    #[test]
    fn test_single_threat_is_blocked() {
        let mut board = Board::new();
        for _ in 0..3 {
            board.drop(6, Side::First).unwrap();
        }
        assert_eq!(select_move(&board, Side::Second, &Leftmost), Ok(6));
    }

    #[test]
    fn test_double_threat_falls_through_to_strategy() {
        let mut board = Board::new();
        for col in [2, 3, 4] {
            board.drop(col, Side::First).unwrap();
        }
        assert_eq!(winning_columns(&board, Side::First), vec![1, 5]);
        assert_eq!(select_move(&board, Side::Second, &Leftmost), Ok(0));
    }

    #[test]
    fn test_ordered_moves_put_wins_then_blocks_first() {
        let mut board = Board::new();
        for _ in 0..3 {
            board.drop(0, Side::First).unwrap();
        }
        for _ in 0..3 {
            board.drop(6, Side::Second).unwrap();
        }
        assert_eq!(ordered_moves(&board, Side::Second), vec![6, 0, 3, 2, 4, 1, 5]);
    }
}
