//! Board geometry constants and runtime configuration defaults

use std::time::Duration;

use crate::spatial::geometry::Orientation;

// Board geometry
/// Number of rows and columns on the board
pub const BOARD_SIZE: usize = 16;
/// Number of cells on the board
pub const NUM_CELLS: usize = BOARD_SIZE * BOARD_SIZE;
/// Index of the last row or column
pub const LAST_INDEX: usize = BOARD_SIZE - 1;

// Tile counts per category, fixed by the board geometry
/// Number of corner tiles
pub const NUM_CORNERS: usize = 4;
/// Number of border tiles that are not corners
pub const NUM_EDGES: usize = 4 * (BOARD_SIZE - 2);
/// Number of interior tiles
pub const NUM_MIDS: usize = (BOARD_SIZE - 2) * (BOARD_SIZE - 2);
/// Number of tiles in a complete set
pub const NUM_TILES: usize = NUM_CORNERS + NUM_EDGES + NUM_MIDS;

// Search limits
/// Shallowest depth a backtracker accepts
pub const MIN_SEARCH_DEPTH: usize = 2;

// The clock is only read once per this many placements; must be a power of two minus one
/// Mask applied to the placement counter before checking the clock
pub const CLOCK_CHECK_MASK: u64 = 0xFFFF;

/// Wall-clock interval between search progress reports
pub const PROGRESS_INTERVAL: Duration = Duration::from_secs(10);

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
/// Spinner redraw interval
pub const SPINNER_TICK: Duration = Duration::from_millis(120);

// Default values for configurable parameters
/// Fixed seed for reproducible shuffling and generation
pub const DEFAULT_SEED: u64 = 42;

/// Default pieces file read by the command line tool
pub const DEFAULT_PIECES_PATH: &str = "e2pieces.txt";

/// Default number of border colours for generated puzzles
pub const DEFAULT_BORDER_COLOURS: usize = 5;
/// Default number of interior colours for generated puzzles
pub const DEFAULT_INTERIOR_COLOURS: usize = 17;

/// Row, column, interior tile id and orientation of a published clue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clue {
    /// Board row of the clue
    pub row: usize,
    /// Board column of the clue
    pub col: usize,
    /// Interior tile id as numbered by the published pieces file
    pub mid_id: usize,
    /// Required orientation
    pub orientation: Orientation,
}

// The mandatory centre tile followed by the four hint tiles
/// Clue tiles published with the puzzle
pub const KNOWN_CLUES: [Clue; 5] = [
    Clue {
        row: 8,
        col: 7,
        mid_id: 78,
        orientation: Orientation::Half,
    },
    Clue {
        row: 2,
        col: 2,
        mid_id: 147,
        orientation: Orientation::Anticlockwise90,
    },
    Clue {
        row: 2,
        col: 13,
        mid_id: 194,
        orientation: Orientation::Anticlockwise90,
    },
    Clue {
        row: 13,
        col: 2,
        mid_id: 120,
        orientation: Orientation::Anticlockwise90,
    },
    Clue {
        row: 13,
        col: 13,
        mid_id: 188,
        orientation: Orientation::Base,
    },
];
