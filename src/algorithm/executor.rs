//! Task-queue driver for the constraint board and parallel corner trials
//!
//! A trial fixes the clue tiles and three corners, then keeps recalculating
//! until the score stops moving or the board is proven infeasible. The 24
//! ordered choices of three distinct corners are independent trials, run in
//! parallel over a shared catalog.

use std::collections::VecDeque;
use std::fmt;

use rayon::prelude::*;

use crate::algorithm::propagation::{Constraints, ConstraintsScore};
use crate::io::configuration::{Clue, LAST_INDEX, NUM_CORNERS};
use crate::io::error::{Result, invalid_placement};
use crate::io::visualization;
use crate::spatial::geometry::Orientation;
use crate::spatial::grid::Cell;
use crate::spatial::tiles::{Category, PlacedTile, TileCatalog};

/// A unit of work for the solver loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Log the board state
    Print,
    /// Fix the clue at an index of the solver's clue list
    FixClue(usize),
    /// Fix a tile in a cell
    FixTile {
        /// Tile and orientation to fix
        placed: PlacedTile,
        /// Target cell
        cell: Cell,
    },
    /// Run one propagation round
    RecalculateAll,
    /// Stop: the board was proven infeasible
    Unsolvable,
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Print => f.write_str("Print"),
            Self::FixClue(index) => write!(f, "Fix clue {index}"),
            Self::FixTile { placed, cell } => {
                write!(f, "Fix tile {} {} at {cell}", placed.tile, placed.orientation)
            }
            Self::RecalculateAll => f.write_str("Recalculate all"),
            Self::Unsolvable => f.write_str("Unsolvable"),
        }
    }
}

/// How a corner trial ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrialOutcome {
    /// Propagation reached a fixed point without proving infeasibility
    Completed(ConstraintsScore),
    /// Propagation proved the board infeasible
    Infeasible(ConstraintsScore),
    /// A fix was rejected, either as a contradiction or an invalid placement
    Aborted(String),
}

/// Result of one corner trial
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialResult {
    /// Corner ids fixed at top-left, top-right and bottom-left
    pub corners: [usize; 3],
    /// How the trial ended
    pub outcome: TrialOutcome,
}

/// Drives a constraint board through a queue of tasks
pub struct ConstraintSolver<'a> {
    catalog: &'a TileCatalog,
    clues: Vec<Clue>,
    extra_fixes: Vec<(Cell, PlacedTile)>,
}

impl<'a> ConstraintSolver<'a> {
    /// Create a solver with the clues to fix at the start of every trial
    pub const fn new(catalog: &'a TileCatalog, clues: Vec<Clue>) -> Self {
        Self {
            catalog,
            clues,
            extra_fixes: Vec::new(),
        }
    }

    /// Add tiles to fix after the clues and corners in every trial
    #[must_use]
    pub fn with_extra_fixes(mut self, fixes: Vec<(Cell, PlacedTile)>) -> Self {
        self.extra_fixes = fixes;
        self
    }

    /// Run one trial and return the final board
    ///
    /// With `corners` set, fixes those corner ids at top-left, top-right and
    /// bottom-left; the fourth follows from propagation.
    ///
    /// # Errors
    ///
    /// Returns an error if a clue or fix is invalid for its cell, or if fixing
    /// it contradicts a tile already required elsewhere
    pub fn solve_trial(&self, corners: Option<[usize; 3]>) -> Result<Constraints<'a>> {
        let mut constraints = Constraints::new(self.catalog);
        let mut tasks = VecDeque::new();

        tasks.push_back(Task::Print);
        tasks.extend((0..self.clues.len()).map(Task::FixClue));
        if let Some([top_left, top_right, bottom_left]) = corners {
            for (id, orientation, row, col) in [
                (top_left, Orientation::Clockwise90, 0, 0),
                (top_right, Orientation::Half, 0, LAST_INDEX),
                (bottom_left, Orientation::Base, LAST_INDEX, 0),
            ] {
                tasks.push_back(Task::FixTile {
                    placed: PlacedTile::new(Category::Corner, id, orientation),
                    cell: Cell::new(row, col),
                });
            }
        }
        tasks.extend(
            self.extra_fixes
                .iter()
                .map(|&(cell, placed)| Task::FixTile { placed, cell }),
        );
        tasks.push_back(Task::RecalculateAll);
        tasks.push_back(Task::Print);

        let mut last_task = None;
        while let Some(task) = tasks.pop_front() {
            let score = constraints.score();
            log::debug!("Process task {score}: {task}");

            match task {
                Task::Print => {
                    if last_task != Some(Task::Print) && log::log_enabled!(log::Level::Debug) {
                        log::debug!("{}", visualization::render_cell_grid(&constraints));
                        log::debug!("{}", visualization::render_edge_grid(&constraints));
                    }
                }
                Task::FixClue(index) => {
                    if let Some(fix) = self.resolve_clue(index)? {
                        tasks.push_front(fix);
                    }
                }
                Task::FixTile { placed, cell } => {
                    constraints.fix_tile(
                        placed.tile.category,
                        placed.tile.id,
                        placed.orientation,
                        cell.row,
                        cell.col,
                    )?;
                }
                Task::RecalculateAll => {
                    if !constraints.recalculate_all() {
                        tasks.push_front(Task::Unsolvable);
                        tasks.push_front(Task::Print);
                    } else if constraints.score() != score {
                        tasks.push_back(Task::RecalculateAll);
                        tasks.push_back(Task::Print);
                    }
                }
                Task::Unsolvable => break,
            }
            last_task = Some(task);
        }

        log::debug!("Nothing left to do {}", constraints.score());
        Ok(constraints)
    }

    /// Run every ordered choice of three distinct corners as a separate trial
    pub fn solve_all_corner_permutations(&self) -> Vec<TrialResult> {
        self.solve_all_corner_permutations_with(|_| {})
    }

    /// As [`Self::solve_all_corner_permutations`], reporting each finished trial
    pub fn solve_all_corner_permutations_with(
        &self,
        on_done: impl Fn(&TrialResult) + Sync,
    ) -> Vec<TrialResult> {
        corner_permutations()
            .into_par_iter()
            .map(|corners| {
                let outcome = match self.solve_trial(Some(corners)) {
                    Ok(constraints) if constraints.is_solvable() => {
                        TrialOutcome::Completed(constraints.score())
                    }
                    Ok(constraints) => TrialOutcome::Infeasible(constraints.score()),
                    Err(error) => {
                        log::info!("Corners {corners:?} aborted: {error}");
                        TrialOutcome::Aborted(error.to_string())
                    }
                };
                let result = TrialResult { corners, outcome };
                on_done(&result);
                result
            })
            .collect()
    }

    /// Fix task for a clue, translating its published id into a catalog id
    fn resolve_clue(&self, index: usize) -> Result<Option<Task>> {
        let Some(clue) = self.clues.get(index) else {
            return Ok(None);
        };
        let id = self
            .catalog
            .id_for_input_rank(Category::Mid, clue.mid_id)
            .ok_or_else(|| invalid_placement(&format!("clue mid {} does not exist", clue.mid_id)))?;
        Ok(Some(Task::FixTile {
            placed: PlacedTile::new(Category::Mid, id, clue.orientation),
            cell: Cell::new(clue.row, clue.col),
        }))
    }
}

/// Every ordered triple of distinct corner ids
pub fn corner_permutations() -> Vec<[usize; 3]> {
    let mut permutations = Vec::new();
    for a in 0..NUM_CORNERS {
        for b in 0..NUM_CORNERS {
            for c in 0..NUM_CORNERS {
                if a != b && a != c && b != c {
                    permutations.push([a, b, c]);
                }
            }
        }
    }
    permutations
}
