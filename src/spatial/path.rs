//! Placement paths: the order in which a backtracker visits board cells
//!
//! A path is an injective list of cells. For each visitation index it records
//! the cell's category, its fixed orientation (border cells only) and the
//! visitation index of every neighbour that was visited earlier.

use clap::ValueEnum;

use crate::io::configuration::{BOARD_SIZE, LAST_INDEX, NUM_CELLS};
use crate::io::error::{Result, invalid_path};
use crate::spatial::geometry::{Compass, Orientation};
use crate::spatial::grid::{self, Cell};
use crate::spatial::tiles::Category;

/// Everything the search needs to know about one visitation index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStep {
    /// Cell visited at this index
    pub cell: Cell,
    /// Category the cell accepts
    pub category: Category,
    /// Fixed orientation for border cells, `None` inside
    pub orientation: Option<Orientation>,
    /// Earlier visitation index of the neighbour in each compass direction
    neighbours: [Option<usize>; 4],
}

impl PathStep {
    /// Visitation index of the neighbour facing `compass`, if visited earlier
    pub fn neighbour(&self, compass: Compass) -> Option<usize> {
        self.neighbours.get(compass.index()).copied().flatten()
    }

    /// Visitation index of the north neighbour, if visited earlier
    pub fn north(&self) -> Option<usize> {
        self.neighbour(Compass::North)
    }

    /// Visitation index of the west neighbour, if visited earlier
    pub fn west(&self) -> Option<usize> {
        self.neighbour(Compass::West)
    }
}

/// An ordered visitation of distinct board cells
#[derive(Debug, Clone)]
pub struct PlacementPath {
    steps: Vec<PathStep>,
    /// Visitation index for each row-major cell index
    fill_order: Vec<Option<usize>>,
}

impl PlacementPath {
    /// Build a path covering the whole board
    ///
    /// # Errors
    ///
    /// Returns an error if the permutation does not hold exactly 256 distinct on-board cells
    pub fn from_permutation(cells: &[Cell]) -> Result<Self> {
        if cells.len() != NUM_CELLS {
            return Err(invalid_path(&format!(
                "a full path needs {NUM_CELLS} cells, got {}",
                cells.len()
            )));
        }
        Self::from_cells(cells)
    }

    /// Build a path over any non-empty set of distinct cells
    ///
    /// Cells missing from the path are treated as never placed.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty, leaves the board or repeats a cell
    pub fn from_cells(cells: &[Cell]) -> Result<Self> {
        if cells.is_empty() {
            return Err(invalid_path(&"path is empty"));
        }

        let mut fill_order = vec![None; NUM_CELLS];
        for (visit, cell) in cells.iter().enumerate() {
            if !cell.is_on_board() {
                return Err(invalid_path(&format!("cell {cell} is off the board")));
            }
            let Some(slot) = fill_order.get_mut(cell.index()) else {
                return Err(invalid_path(&format!("cell {cell} is off the board")));
            };
            if slot.is_some() {
                return Err(invalid_path(&format!("cell {cell} is visited twice")));
            }
            *slot = Some(visit);
        }

        let steps = cells
            .iter()
            .enumerate()
            .map(|(visit, &cell)| {
                let neighbours = Compass::ALL.map(|compass| {
                    cell.neighbour(compass)
                        .and_then(|other| fill_order.get(other.index()).copied().flatten())
                        .filter(|&earlier| earlier < visit)
                });
                PathStep {
                    cell,
                    category: cell.category(),
                    orientation: cell.border_orientation(),
                    neighbours,
                }
            })
            .collect();

        Ok(Self { steps, fill_order })
    }

    /// Number of cells on the path
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the path is empty; never true for a constructed path
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step data for a visitation index
    pub fn step(&self, visit: usize) -> Option<&PathStep> {
        self.steps.get(visit)
    }

    /// All steps in visitation order
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Visitation index of a cell, `None` if the cell is not on the path
    pub fn visit_index(&self, cell: Cell) -> Option<usize> {
        self.fill_order.get(cell.index()).copied().flatten()
    }

    /// Visitation index for every row-major cell index
    pub fn fill_order(&self) -> &[Option<usize>] {
        &self.fill_order
    }

    /// Whether any step visits an interior cell
    pub fn contains_mids(&self) -> bool {
        self.steps.iter().any(|step| step.category == Category::Mid)
    }
}

/// Named visitation orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PathKind {
    /// Row by row, left to right
    Scanrow,
    /// Expanding squares anchored at the top-left corner
    Squares,
    /// Anti-diagonals from the top-left corner, top to bottom within each
    Diagonal,
    /// Border only, growing clockwise and anticlockwise from the top-left corner
    EdgeAlternating,
    /// Border only, clockwise from the top-left corner
    EdgeClockwise,
    /// Border only, anticlockwise from the top-left corner
    EdgeAnticlockwise,
    /// Interior cells only, row by row
    MidsOnly,
}

impl PathKind {
    /// Visitation order as a list of cells
    pub fn cells(self) -> Vec<Cell> {
        match self {
            Self::Scanrow => grid::cells().collect(),
            Self::Squares => {
                let mut cells: Vec<Cell> = grid::cells().collect();
                cells.sort_by_key(|cell| squares_rank(*cell));
                cells
            }
            Self::Diagonal => {
                let mut cells: Vec<Cell> = grid::cells().collect();
                cells.sort_by_key(|cell| (cell.row + cell.col, cell.row));
                cells
            }
            Self::EdgeAlternating => edge_alternating(),
            Self::EdgeClockwise => edge_clockwise(),
            Self::EdgeAnticlockwise => {
                let mut cells = edge_clockwise();
                // Keep the start corner, walk the ring the other way
                if let Some(rest) = cells.get_mut(1..) {
                    rest.reverse();
                }
                cells
            }
            Self::MidsOnly => grid::interior_cells().collect(),
        }
    }

    /// Whether the order covers the whole board
    pub const fn is_full(self) -> bool {
        matches!(self, Self::Scanrow | Self::Squares | Self::Diagonal)
    }

    /// Build the placement path for this order
    ///
    /// # Errors
    ///
    /// Returns an error only if the generated order is inconsistent
    pub fn build(self) -> Result<PlacementPath> {
        let cells = self.cells();
        if self.is_full() {
            PlacementPath::from_permutation(&cells)
        } else {
            PlacementPath::from_cells(&cells)
        }
    }
}

/// Visit rank in the expanding-squares order
fn squares_rank(cell: Cell) -> usize {
    let Cell { row, col } = cell;
    if col > row {
        col * col + row
    } else {
        row * row + row + col
    }
}

fn edge_alternating() -> Vec<Cell> {
    let mut cells = Vec::with_capacity(4 * LAST_INDEX);
    cells.push(Cell::new(0, 0));
    for k in 1..BOARD_SIZE {
        cells.push(Cell::new(0, k));
        cells.push(Cell::new(k, 0));
    }
    for k in 1..LAST_INDEX {
        cells.push(Cell::new(k, LAST_INDEX));
        cells.push(Cell::new(LAST_INDEX, k));
    }
    cells.push(Cell::new(LAST_INDEX, LAST_INDEX));
    cells
}

fn edge_clockwise() -> Vec<Cell> {
    let top = (0..BOARD_SIZE).map(|col| Cell::new(0, col));
    let right = (1..BOARD_SIZE).map(|row| Cell::new(row, LAST_INDEX));
    let bottom = (0..LAST_INDEX).rev().map(|col| Cell::new(LAST_INDEX, col));
    let left = (1..LAST_INDEX).rev().map(|row| Cell::new(row, 0));
    top.chain(right).chain(bottom).chain(left).collect()
}
