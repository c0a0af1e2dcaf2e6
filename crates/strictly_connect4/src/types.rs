//! Core domain types for connect four.

use serde::{Deserialize, Serialize};

/// Number of rows on the board.
pub const ROWS: usize = 6;

/// Number of columns on the board.
pub const COLS: usize = 7;

/// Pieces in a row needed to win.
pub const CONNECT: usize = 4;

/// Column visiting order used for tie-breaks: center first, then outward.
pub const CENTER_OUT: [usize; COLS] = [3, 2, 4, 1, 5, 0, 6];

/// One of the two competing sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Side A, always moves first.
    First,
    /// Side B.
    Second,
}

impl Side {
    /// Returns the opposing side.
    pub fn other(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    /// Wire encoding (1 or 2).
    pub fn to_wire(self) -> u8 {
        match self {
            Side::First => 1,
            Side::Second => 2,
        }
    }

    /// Decodes the wire encoding.
    pub fn from_wire(value: u8) -> Option<Self> {
        match value {
            1 => Some(Side::First),
            2 => Some(Side::Second),
            _ => None,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::First => write!(f, "player 1"),
            Side::Second => write!(f, "player 2"),
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell holding a side's piece.
    Occupied(Side),
}

impl Cell {
    /// Wire encoding: 0 = empty, 1/2 = side.
    pub fn to_wire(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Occupied(side) => side.to_wire(),
        }
    }

    /// Decodes the wire encoding.
    pub fn from_wire(value: u8) -> Option<Self> {
        match value {
            0 => Some(Cell::Empty),
            other => Side::from_wire(other).map(Cell::Occupied),
        }
    }

    /// True if the cell holds a piece of `side`.
    pub fn is(self, side: Side) -> bool {
        self == Cell::Occupied(side)
    }
}

/// A board coordinate, row 0 being the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// Row index (0 = top).
    pub row: usize,
    /// Column index.
    pub col: usize,
}

impl Coord {
    /// Creates a coordinate.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Wire encoding `[row, col]`.
    pub fn to_pair(self) -> [usize; 2] {
        [self.row, self.col]
    }
}

/// An axis through a cell, in the order the win detector examines them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Axis {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
    /// Top-left to bottom-right (↘).
    Diagonal,
    /// Top-right to bottom-left (↙).
    AntiDiagonal,
}

impl Axis {
    /// Positive step `(row, col)` along the axis.
    pub fn step(self) -> (isize, isize) {
        match self {
            Axis::Horizontal => (0, 1),
            Axis::Vertical => (1, 0),
            Axis::Diagonal => (1, 1),
            Axis::AntiDiagonal => (1, -1),
        }
    }
}

/// Four coordinates forming a winning line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningLine {
    /// Axis the line lies on.
    pub axis: Axis,
    /// Coordinates in order along the axis.
    pub cells: [Coord; CONNECT],
}

impl WinningLine {
    /// True if the line passes through `coord`.
    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }
}

/// Status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Game is ongoing.
    InProgress,
    /// Game ended with a four-in-a-row.
    Won(Side),
    /// Board filled with no line.
    Drawn,
}

impl Status {
    /// True once the game has ended.
    pub fn is_over(self) -> bool {
        !matches!(self, Status::InProgress)
    }

    /// Wire winner encoding: `None` in progress, 0 for a draw, 1/2 for a side.
    pub fn winner_wire(self) -> Option<u8> {
        match self {
            Status::InProgress => None,
            Status::Drawn => Some(0),
            Status::Won(side) => Some(side.to_wire()),
        }
    }
}
