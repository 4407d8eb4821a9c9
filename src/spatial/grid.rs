//! Board cell addressing and the position rules for categories and border orientations
//!
//! Every cell's category follows from its position alone: the four corner cells
//! take corner tiles, the rest of the outer ring takes edge tiles and the 14x14
//! interior takes mid tiles. Border tiles have exactly one legal orientation,
//! the one that turns their grey sides to face off the board.

use std::fmt;

use crate::io::configuration::{BOARD_SIZE, LAST_INDEX, NUM_CELLS};
use crate::spatial::geometry::{Compass, Orientation};
use crate::spatial::tiles::Category;

/// A board cell addressed by row and column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    /// Row in `0..16`, row 0 at the top
    pub row: usize,
    /// Column in `0..16`, column 0 at the left
    pub col: usize,
}

impl Cell {
    /// Create a cell without bounds checking
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Cell for a row-major index, if on the board
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < NUM_CELLS {
            Some(Self::new(index / BOARD_SIZE, index % BOARD_SIZE))
        } else {
            None
        }
    }

    /// Row-major index of the cell
    pub const fn index(self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    /// Whether the cell lies on the board
    pub const fn is_on_board(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Whether the cell lies on the outer ring
    pub const fn is_border(self) -> bool {
        self.row == 0 || self.row == LAST_INDEX || self.col == 0 || self.col == LAST_INDEX
    }

    /// Tile category this cell accepts
    pub const fn category(self) -> Category {
        let vertical = self.row == 0 || self.row == LAST_INDEX;
        let horizontal = self.col == 0 || self.col == LAST_INDEX;
        match (vertical, horizontal) {
            (true, true) => Category::Corner,
            (true, false) | (false, true) => Category::Edge,
            (false, false) => Category::Mid,
        }
    }

    /// The only legal orientation for a border cell, `None` for interior cells
    pub const fn border_orientation(self) -> Option<Orientation> {
        match (self.row, self.col) {
            (0, 0) => Some(Orientation::Clockwise90),
            (0, LAST_INDEX) => Some(Orientation::Half),
            (LAST_INDEX, 0) => Some(Orientation::Base),
            (LAST_INDEX, LAST_INDEX) => Some(Orientation::Anticlockwise90),
            (0, _) => Some(Orientation::Half),
            (LAST_INDEX, _) => Some(Orientation::Base),
            (_, 0) => Some(Orientation::Clockwise90),
            (_, LAST_INDEX) => Some(Orientation::Anticlockwise90),
            _ => None,
        }
    }

    /// Adjacent cell in a direction, if it is on the board
    pub const fn neighbour(self, compass: Compass) -> Option<Self> {
        match compass {
            Compass::North if self.row > 0 => Some(Self::new(self.row - 1, self.col)),
            Compass::East if self.col < LAST_INDEX => Some(Self::new(self.row, self.col + 1)),
            Compass::South if self.row < LAST_INDEX => Some(Self::new(self.row + 1, self.col)),
            Compass::West if self.col > 0 => Some(Self::new(self.row, self.col - 1)),
            _ => None,
        }
    }

    /// Whether the side facing `compass` is shared with another cell
    pub const fn has_neighbour(self, compass: Compass) -> bool {
        self.neighbour(compass).is_some()
    }

    /// Whether the side facing `compass` runs along the outer ring
    ///
    /// Such sides join two border tiles and carry a border colour; every
    /// other shared side carries an interior colour.
    pub const fn is_border_side(self, compass: Compass) -> bool {
        match self.neighbour(compass) {
            Some(other) => self.is_border() && other.is_border(),
            None => false,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// All cells in row-major order
pub fn cells() -> impl Iterator<Item = Cell> {
    (0..NUM_CELLS).map(|index| Cell::new(index / BOARD_SIZE, index % BOARD_SIZE))
}

/// Interior cells in row-major order
pub fn interior_cells() -> impl Iterator<Item = Cell> {
    cells().filter(|cell| !cell.is_border())
}
