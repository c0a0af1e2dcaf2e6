//! Fixed column preference strategy.

use super::Strategy;
use crate::board::Board;
use crate::error::GameError;
use crate::types::{COLS, Side};

/// Column preference of the fixed-order opponent.
pub const PREFERENCE: [usize; COLS] = [3, 2, 1, 5, 6, 0, 4];

/// Plays the first open column in a fixed preference order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedOrder;

impl Strategy for FixedOrder {
    fn choose(&self, board: &Board, _side: Side) -> Result<usize, GameError> {
        PREFERENCE
            .iter()
            .copied()
            .find(|&col| !board.is_column_full(col))
            .ok_or(GameError::NoLegalMove)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ROWS;

    #[test]
    fn test_follows_preference_as_columns_fill() {
        let mut board = Board::new();
        assert_eq!(FixedOrder.choose(&board, Side::First), Ok(3));
        for _ in 0..ROWS {
            board.drop(3, Side::First).unwrap();
        }
        assert_eq!(FixedOrder.choose(&board, Side::First), Ok(2));
        for col in [2, 1, 5, 6, 0] {
            for _ in 0..ROWS {
                board.drop(col, Side::Second).unwrap();
            }
        }
        assert_eq!(FixedOrder.choose(&board, Side::First), Ok(4));
    }
}
