//! Board-wide constraint propagation over cell options and shared-side colours
//!
//! The board holds a [`CellConstraint`] per cell plus, for every pair of
//! adjacent cells, the set of colours that could still appear on the shared
//! side. Fixing a tile eliminates it everywhere else through a worklist;
//! [`Constraints::recalculate_all`] alternates colour-set and option
//! narrowing one round at a time so callers can iterate to a fixed point.

use std::collections::VecDeque;
use std::fmt;

use ndarray::Array2;

use crate::algorithm::bitset::ColourSet;
use crate::algorithm::constraint::{CellConstraint, Elimination};
use crate::io::configuration::{BOARD_SIZE, LAST_INDEX};
use crate::io::error::{PuzzleError, Result, invalid_placement};
use crate::spatial::geometry::{Compass, Orientation};
use crate::spatial::grid::{self, Cell};
use crate::spatial::tiles::{Category, PlacedTile, TileCatalog, TileRef};

/// A tile that must be removed from every cell except one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingElimination {
    /// Tile to remove
    pub tile: TileRef,
    /// The cell that keeps the tile
    pub keep: Cell,
}

/// Worklist of eliminations triggered by cells collapsing to a single tile
#[derive(Debug, Default, Clone)]
pub struct EliminationQueue {
    /// Pending eliminations in discovery order
    pub queue: VecDeque<PendingElimination>,
}

impl EliminationQueue {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Queue an elimination, skipping exact duplicates
    pub fn push(&mut self, elimination: PendingElimination) {
        if !self.queue.contains(&elimination) {
            self.queue.push_back(elimination);
        }
    }

    /// Remove and return the next elimination
    pub fn take_next(&mut self) -> Option<PendingElimination> {
        self.queue.pop_front()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Get the number of pending eliminations
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Drop every pending elimination
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

/// Progress measure for a constraint board
///
/// Every component is non-increasing while tiles are fixed and the board is
/// recalculated, so an unchanged score means no progress was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintsScore {
    /// Remaining (id, orientation) options over all cells, solved cells counting zero
    pub options: usize,
    /// Remaining colours over all shared sides
    pub colour_options: usize,
    /// Sum over tiles of admissible cells minus one
    pub cell_slack: usize,
    /// Whether the board has not been proven infeasible
    pub solvable: bool,
}

impl ConstraintsScore {
    /// Product of the three counts
    pub const fn value(&self) -> u64 {
        (self.options as u64)
            .saturating_mul(self.colour_options as u64)
            .saturating_mul(self.cell_slack as u64)
    }
}

impl fmt::Display for ConstraintsScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Score({}  {}  {}  {}  {})",
            self.value(),
            self.options,
            self.colour_options,
            self.cell_slack,
            self.solvable
        )
    }
}

/// Constraint board for one catalog
#[derive(Debug, Clone)]
pub struct Constraints<'a> {
    catalog: &'a TileCatalog,
    cells: Array2<CellConstraint>,
    /// `horizontal[[row, col]]` joins cells (row, col) and (row, col + 1)
    horizontal: Array2<ColourSet>,
    /// `vertical[[row, col]]` joins cells (row, col) and (row + 1, col)
    vertical: Array2<ColourSet>,
    /// Admissible cell count per tile, by category
    occupancy: [Vec<usize>; 3],
    colour_capacity: usize,
    solvable: bool,
    pending: EliminationQueue,
}

impl<'a> Constraints<'a> {
    /// Fresh board: border cells admit every tile of their category in the
    /// fixed orientation, interior cells every mid in every orientation
    pub fn new(catalog: &'a TileCatalog) -> Self {
        let colour_capacity = catalog
            .num_border_colours()
            .max(catalog.num_interior_colours());

        let cells = Array2::from_shape_fn((BOARD_SIZE, BOARD_SIZE), |(row, col)| {
            let cell = Cell::new(row, col);
            let category = cell.category();
            let count = catalog.count(category);
            match cell.border_orientation() {
                Some(orientation) => CellConstraint::all_ids(category, count, orientation),
                None => CellConstraint::all_options(category, count),
            }
        });

        let mut constraints = Self {
            catalog,
            cells,
            horizontal: Array2::from_elem(
                (BOARD_SIZE, LAST_INDEX),
                ColourSet::new(colour_capacity),
            ),
            vertical: Array2::from_elem((LAST_INDEX, BOARD_SIZE), ColourSet::new(colour_capacity)),
            occupancy: Category::ALL.map(|category| vec![0; catalog.count(category)]),
            colour_capacity,
            solvable: true,
            pending: EliminationQueue::new(),
        };
        constraints.recalculate_occupancy();
        constraints.recalculate_edge_colours();
        constraints
    }

    /// Constraint held by a cell
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellConstraint> {
        self.cells.get([row, col])
    }

    /// Colours possible between (row, col) and (row, col + 1)
    pub fn horizontal(&self, row: usize, col: usize) -> Option<&ColourSet> {
        self.horizontal.get([row, col])
    }

    /// Colours possible between (row, col) and (row + 1, col)
    pub fn vertical(&self, row: usize, col: usize) -> Option<&ColourSet> {
        self.vertical.get([row, col])
    }

    /// Number of cells that could still hold a tile, as of the last recalculation
    pub fn occupancy(&self, category: Category, id: usize) -> usize {
        self.occupancy
            .get(category as usize)
            .and_then(|counts| counts.get(id))
            .copied()
            .unwrap_or(0)
    }

    /// Whether the board has not been proven infeasible
    pub const fn is_solvable(&self) -> bool {
        self.solvable
    }

    /// Every solved cell in row-major order
    pub fn solved_cells(&self) -> Vec<(Cell, PlacedTile)> {
        grid::cells()
            .filter_map(|cell| {
                self.cell(cell.row, cell.col)
                    .and_then(CellConstraint::solved)
                    .map(|placed| (cell, placed))
            })
            .collect()
    }

    /// Fix a tile in a cell and eliminate it from every other cell
    ///
    /// Cells that collapse to a single tile as a result eliminate that tile in
    /// turn. Fixing a pair the cell no longer admits proves the board infeasible
    /// without being an error.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The cell is off the board, the id is out of range, the category does not
    ///   match the cell or a border cell is given the wrong orientation
    /// - Another cell already requires the tile (a contradiction)
    pub fn fix_tile(
        &mut self,
        category: Category,
        id: usize,
        orientation: Orientation,
        row: usize,
        col: usize,
    ) -> Result<()> {
        let cell = Cell::new(row, col);
        if !cell.is_on_board() {
            return Err(invalid_placement(&format!("cell {cell} is off the board")));
        }
        if category != cell.category() {
            return Err(invalid_placement(&format!(
                "cell {cell} takes a {} tile, not a {category}",
                cell.category()
            )));
        }
        if id >= self.catalog.count(category) {
            return Err(invalid_placement(&format!("{category} {id} does not exist")));
        }
        if let Some(required) = cell.border_orientation() {
            if required != orientation {
                return Err(invalid_placement(&format!(
                    "cell {cell} requires orientation {required}, got {orientation}"
                )));
            }
        }

        let solved = CellConstraint::Solved {
            category,
            id,
            orientation,
        };
        let Some(current) = self.cells.get_mut([row, col]) else {
            return Err(invalid_placement(&format!("cell {cell} is off the board")));
        };
        if *current == solved {
            return Ok(());
        }
        if !current.admits(category, id, orientation) {
            log::debug!("Fixing {category} {id} at {cell} which no longer admits it");
            self.solvable = false;
        }
        *current = solved;

        self.pending.push(PendingElimination {
            tile: TileRef::new(category, id),
            keep: cell,
        });
        self.drain_eliminations()
    }

    /// Run one round of propagation
    ///
    /// Recomputes tile occupancy and shared-side colours, then drops every
    /// option whose sides fall outside the adjoining colour sets, cascading any
    /// resulting collapses. Returns `false` once the board is proven infeasible.
    pub fn recalculate_all(&mut self) -> bool {
        if !self.solvable {
            return false;
        }

        self.recalculate_occupancy();
        if self.occupancy.iter().flatten().any(|&count| count == 0) {
            log::debug!("A tile has no admissible cell left");
            self.solvable = false;
            return false;
        }

        self.recalculate_edge_colours();
        if self
            .horizontal
            .iter()
            .chain(self.vertical.iter())
            .any(ColourSet::is_empty)
        {
            log::debug!("A shared side has no possible colour left");
            self.solvable = false;
            return false;
        }

        self.constrain_from_edge_colours();

        // Block feasibility over adjacent cells would narrow further; not yet done
        self.solvable
    }

    /// Current progress measure
    pub fn score(&self) -> ConstraintsScore {
        let options = self.cells.iter().map(CellConstraint::num_options).sum();
        let colour_options = self
            .horizontal
            .iter()
            .chain(self.vertical.iter())
            .map(ColourSet::count)
            .sum();
        let cell_slack = self
            .occupancy
            .iter()
            .flatten()
            .map(|count| count.saturating_sub(1))
            .sum();
        ConstraintsScore {
            options,
            colour_options,
            cell_slack,
            solvable: self.solvable,
        }
    }

    fn recalculate_occupancy(&mut self) {
        for counts in &mut self.occupancy {
            counts.fill(0);
        }
        for constraint in &self.cells {
            let category = constraint.category();
            let Some(counts) = self.occupancy.get_mut(category as usize) else {
                continue;
            };
            let mut seen = None;
            for (id, _) in constraint.options() {
                // Options list each id's orientations together
                if seen == Some(id) {
                    continue;
                }
                seen = Some(id);
                if let Some(count) = counts.get_mut(id) {
                    *count += 1;
                }
            }
        }
    }

    fn recalculate_edge_colours(&mut self) {
        let catalog = self.catalog;
        let capacity = self.colour_capacity;
        let possible = |constraint: Option<&CellConstraint>, compass: Compass| {
            constraint.map_or_else(
                || ColourSet::new(capacity),
                |constraint| constraint.possible_colours(catalog, compass, capacity),
            )
        };

        for ((row, col), colours) in self.horizontal.indexed_iter_mut() {
            let west = possible(self.cells.get([row, col]), Compass::East);
            let east = possible(self.cells.get([row, col + 1]), Compass::West);
            *colours = west.intersection(&east);
        }
        for ((row, col), colours) in self.vertical.indexed_iter_mut() {
            let north = possible(self.cells.get([row, col]), Compass::South);
            let south = possible(self.cells.get([row + 1, col]), Compass::North);
            *colours = north.intersection(&south);
        }
    }

    fn constrain_from_edge_colours(&mut self) {
        let catalog = self.catalog;
        let horizontal = &self.horizontal;
        let vertical = &self.vertical;

        for ((row, col), constraint) in self.cells.indexed_iter_mut() {
            let cell = Cell::new(row, col);
            let category = constraint.category();
            let sides = Compass::ALL.map(|compass| match compass {
                Compass::North => row.checked_sub(1).and_then(|r| vertical.get([r, col])),
                Compass::East => horizontal.get([row, col]),
                Compass::South => vertical.get([row, col]),
                Compass::West => col.checked_sub(1).and_then(|c| horizontal.get([row, c])),
            });

            let reduced = constraint.retain(|id, orientation| {
                Compass::ALL.into_iter().zip(&sides).all(|(compass, side)| {
                    side.is_none_or(|colours| {
                        colours.contains(catalog.colour(category, id, orientation, compass))
                    })
                })
            });
            if !reduced {
                continue;
            }

            if constraint.is_empty() {
                self.solvable = false;
                continue;
            }
            if let Some(id) = constraint.normalize() {
                log::trace!("Cell {cell} collapsed to {category} {id}");
                self.pending.push(PendingElimination {
                    tile: TileRef::new(category, id),
                    keep: cell,
                });
            }
        }

        if let Err(error) = self.drain_eliminations() {
            log::debug!("Propagation hit {error}");
            self.solvable = false;
        }
    }

    /// Apply queued eliminations until none remain
    fn drain_eliminations(&mut self) -> Result<()> {
        while let Some(PendingElimination { tile, keep }) = self.pending.take_next() {
            for ((row, col), constraint) in self.cells.indexed_iter_mut() {
                let cell = Cell::new(row, col);
                if cell == keep {
                    continue;
                }
                match constraint.eliminate(tile.category, tile.id) {
                    Elimination::Unaffected => {}
                    Elimination::Conflict => {
                        self.pending.clear();
                        return Err(PuzzleError::Contradiction {
                            category: tile.category,
                            id: tile.id,
                            row,
                            col,
                        });
                    }
                    Elimination::Reduced => {
                        if constraint.is_empty() {
                            self.solvable = false;
                        } else if let Some(id) = constraint.normalize() {
                            log::trace!("Cell {cell} collapsed to {} {id}", tile.category);
                            self.pending.push(PendingElimination {
                                tile: TileRef::new(constraint.category(), id),
                                keep: cell,
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
