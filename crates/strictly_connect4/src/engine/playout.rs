//! Randomised strategies.

use super::{Strategy, center_out_columns};
use crate::board::Board;
use crate::error::GameError;
use crate::rules::check_win;
use crate::types::{COLS, Side};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// Seeds an RNG from the configured seed and the position.
///
/// Mixing in the piece count keeps successive decisions in one game from
/// replaying the same random stream.
fn position_rng(seed: u64, board: &Board) -> StdRng {
    let pieces = board.piece_count() as u64;
    StdRng::seed_from_u64(seed ^ pieces.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Plays uniformly random moves from `board` with `to_move` on turn.
///
/// Returns the winner, or `None` if the board fills without a line.
fn random_playout(mut board: Board, mut to_move: Side, rng: &mut StdRng) -> Option<Side> {
    loop {
        let legal = board.legal_columns();
        let &col = legal.choose(rng)?;
        let row = board.drop(col, to_move).ok()?;
        if check_win(&board, row, col, to_move).is_some() {
            return Some(to_move);
        }
        to_move = to_move.other();
    }
}

/// Monte Carlo playouts.
///
/// Each playout picks a random first move and plays both sides randomly to
/// the end. The first move earns +1 for a win and -1 for a loss. The column
/// with the best tally is played, ties going to the more central column.
#[derive(Debug, Clone, Copy)]
pub struct MonteCarlo {
    playouts: u32,
    seed: u64,
}

impl MonteCarlo {
    /// Creates a strategy running `playouts` games (at least one) per decision.
    pub fn new(playouts: u32, seed: u64) -> Self {
        Self {
            playouts: playouts.max(1),
            seed,
        }
    }
}

impl Strategy for MonteCarlo {
    #[instrument(skip(self, board), fields(playouts = self.playouts))]
    fn choose(&self, board: &Board, side: Side) -> Result<usize, GameError> {
        let legal = board.legal_columns();
        if legal.is_empty() {
            return Err(GameError::NoLegalMove);
        }

        let mut rng = position_rng(self.seed, board);
        let mut tally = [0i64; COLS];
        for _ in 0..self.playouts {
            let Some(&first) = legal.choose(&mut rng) else {
                break;
            };
            let mut next = *board;
            let row = next.drop(first, side)?;
            let winner = if check_win(&next, row, first, side).is_some() {
                Some(side)
            } else {
                random_playout(next, side.other(), &mut rng)
            };
            match winner {
                Some(w) if w == side => tally[first] += 1,
                Some(_) => tally[first] -= 1,
                None => {}
            }
        }
        debug!(?tally, "Playouts finished");

        let mut best: Option<(usize, i64)> = None;
        for col in center_out_columns(board) {
            if best.is_none_or(|(_, top)| tally[col] > top) {
                best = Some((col, tally[col]));
            }
        }
        best.map(|(col, _)| col).ok_or(GameError::NoLegalMove)
    }
}

/// Uniformly random legal column.
#[derive(Debug, Clone, Copy)]
pub struct RandomMove {
    seed: u64,
}

impl RandomMove {
    /// Creates a random strategy.
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl Strategy for RandomMove {
    fn choose(&self, board: &Board, _side: Side) -> Result<usize, GameError> {
        let mut rng = position_rng(self.seed, board);
        board
            .legal_columns()
            .choose(&mut rng)
            .copied()
            .ok_or(GameError::NoLegalMove)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ROWS;

    #[test]
    fn test_random_move_is_legal_and_repeatable() {
        let mut board = Board::new();
        for _ in 0..ROWS {
            board.drop(0, Side::First).unwrap();
        }
        let strategy = RandomMove::new(7);
        let col = strategy.choose(&board, Side::Second).unwrap();
        assert_ne!(col, 0);
        assert!(col < COLS);
        assert_eq!(strategy.choose(&board, Side::Second), Ok(col));
    }

    #[test]
    fn test_random_move_single_open_column() {
        let mut board = Board::new();
        for col in 0..COLS - 1 {
            for row in 0..ROWS {
                let side = if (row + col / 2) % 2 == 0 { Side::First } else { Side::Second };
                board.drop(col, side).unwrap();
            }
        }
        assert_eq!(RandomMove::new(1).choose(&board, Side::First), Ok(COLS - 1));
    }

    #[test]
    fn test_monte_carlo_is_deterministic_for_seed() {
        let mut board = Board::new();
        board.drop(3, Side::First).unwrap();
        board.drop(3, Side::Second).unwrap();
        let strategy = MonteCarlo::new(200, 42);
        let first = strategy.choose(&board, Side::First).unwrap();
        assert_eq!(strategy.choose(&board, Side::First), Ok(first));
    }

    #[test]
    fn test_monte_carlo_prefers_immediate_win() {
        let mut board = Board::new();
        for col in [0, 1, 2] {
            board.drop(col, Side::First).unwrap();
        }
        for _ in 0..2 {
            board.drop(6, Side::Second).unwrap();
        }
        // Every playout starting in column 3 wins on the spot.
        assert_eq!(MonteCarlo::new(500, 3).choose(&board, Side::First), Ok(3));
    }
}
