//! Rotation states and compass directions
//!
//! A tile's sides are stored in canonical order North, East, South, West at
//! orientation [`Orientation::Base`]. Rotating the tile anticlockwise by a
//! quarter turn brings its canonical East side to face North, so the side
//! facing compass direction `c` at orientation `o` is canonical side `(o + c) mod 4`.

use std::fmt;

/// One of the four rotation states of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Orientation {
    /// Unrotated
    Base = 0,
    /// Rotated a quarter turn anticlockwise
    Anticlockwise90 = 1,
    /// Rotated half a turn
    Half = 2,
    /// Rotated a quarter turn clockwise
    Clockwise90 = 3,
}

impl Orientation {
    /// All orientations in ascending index order
    pub const ALL: [Self; 4] = [
        Self::Base,
        Self::Anticlockwise90,
        Self::Half,
        Self::Clockwise90,
    ];

    /// Dense index in `0..4`
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Orientation for an index, reduced modulo 4
    pub const fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Self::Base,
            1 => Self::Anticlockwise90,
            2 => Self::Half,
            _ => Self::Clockwise90,
        }
    }

    /// Parse the short names used on the command line and in exports
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "0" | "base" => Some(Self::Base),
            "1" | "ac90" | "anticlockwise90" => Some(Self::Anticlockwise90),
            "2" | "half" => Some(Self::Half),
            "3" | "cw90" | "clockwise90" => Some(Self::Clockwise90),
            _ => None,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Base => "BASE",
            Self::Anticlockwise90 => "AC90",
            Self::Half => "HALF",
            Self::Clockwise90 => "CW90",
        };
        f.write_str(name)
    }
}

/// A side of a board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Compass {
    /// Towards row 0
    North = 0,
    /// Towards the last column
    East = 1,
    /// Towards the last row
    South = 2,
    /// Towards column 0
    West = 3,
}

impl Compass {
    /// All directions in ascending index order
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Dense index in `0..4`
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The direction facing back across a shared side
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }
}

/// Canonical side index that faces `compass` when the tile sits at `orientation`
pub const fn to_side(orientation: Orientation, compass: Compass) -> usize {
    (orientation.index() + compass.index()) % 4
}
