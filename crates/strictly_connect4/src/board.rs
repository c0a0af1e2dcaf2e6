//! The 6x7 gravity board.

use crate::error::GameError;
use crate::types::{COLS, Cell, ROWS, Side};
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

/// Wire grid: row-major, row 0 on top, 0 = empty, 1/2 = side.
pub type Grid = [[u8; COLS]; ROWS];

/// Connect-four board.
///
/// Occupied cells of a column are always contiguous from the bottom row
/// upward. The only mutation is [`Board::drop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Builds a board from a wire grid.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidBoard`] for values other than 0/1/2 or
    /// for a piece floating above an empty cell.
    #[instrument(skip(grid))]
    pub fn from_grid(grid: &Grid) -> Result<Self, GameError> {
        let mut board = Self::new();
        for (row, values) in grid.iter().enumerate() {
            for (col, value) in values.iter().enumerate() {
                board.cells[row][col] =
                    Cell::from_wire(*value).ok_or_else(|| GameError::InvalidBoard {
                        reason: format!("cell ({row}, {col}) holds {value}"),
                    })?;
            }
        }

        for col in 0..COLS {
            for row in 0..ROWS - 1 {
                if board.cells[row][col] != Cell::Empty
                    && board.cells[row + 1][col] == Cell::Empty
                {
                    return Err(GameError::InvalidBoard {
                        reason: format!("piece at ({row}, {col}) is floating"),
                    });
                }
            }
        }

        Ok(board)
    }

    /// Returns the cell at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is off the board.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Returns the cell at a signed coordinate, or `None` off the board.
    pub(crate) fn get_signed(&self, row: isize, col: isize) -> Option<Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        self.cells
            .get(row as usize)
            .and_then(|cells| cells.get(col as usize))
            .copied()
    }

    /// Drops a piece for `side` into `column`, returning the row it landed in.
    ///
    /// # Errors
    ///
    /// [`GameError::ColumnOutOfRange`] if `column >= COLS`,
    /// [`GameError::ColumnFull`] if the top cell is occupied. The board is
    /// unchanged on error.
    pub fn drop(&mut self, column: usize, side: Side) -> Result<usize, GameError> {
        if column >= COLS {
            return Err(GameError::ColumnOutOfRange {
                column: column as i64,
            });
        }
        let row = self
            .landing_row(column)
            .ok_or(GameError::ColumnFull { column })?;
        self.cells[row][column] = Cell::Occupied(side);
        trace!(column, row, ?side, "Piece dropped");
        Ok(row)
    }

    /// Row a piece dropped into `column` would land in, if the column is open.
    pub fn landing_row(&self, column: usize) -> Option<usize> {
        if column >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][column] == Cell::Empty)
    }

    /// True if `column` has no empty cell (or is off the board).
    pub fn is_column_full(&self, column: usize) -> bool {
        column >= COLS || self.cells[0][column] != Cell::Empty
    }

    /// True iff no column has an empty cell.
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// True if no piece has been placed.
    pub fn is_empty(&self) -> bool {
        self.cells[ROWS - 1].iter().all(|cell| *cell == Cell::Empty)
    }

    /// Open columns in ascending order.
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// Number of pieces on the board.
    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell != Cell::Empty)
            .count()
    }

    /// Read-only copy of the cells.
    pub fn snapshot(&self) -> [[Cell; COLS]; ROWS] {
        self.cells
    }

    /// Wire grid copy of the cells.
    pub fn to_grid(&self) -> Grid {
        let mut grid = [[0; COLS]; ROWS];
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                grid[row][col] = cell.to_wire();
            }
        }
        grid
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for cells in &self.cells {
            let line: Vec<&str> = cells
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => ".",
                    Cell::Occupied(Side::First) => "X",
                    Cell::Occupied(Side::Second) => "O",
                })
                .collect();
            writeln!(f, "|{}|", line.join(" "))?;
        }
        let footer: Vec<String> = (0..COLS).map(|col| col.to_string()).collect();
        write!(f, " {} ", footer.join(" "))
    }
}
