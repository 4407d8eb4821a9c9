//! Depth-first search over a placement path
//!
//! Each depth places one tile in the path's cell for that visitation index.
//! Candidates come from the colour-keyed indices using the already-placed
//! neighbours, and every other placed neighbour is checked directly, so any
//! visitation order yields fully matching placements.

use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use bitvec::prelude::*;

use crate::analysis::indices::{BorderSide, CandidateIndices};
use crate::io::configuration::{CLOCK_CHECK_MASK, MIN_SEARCH_DEPTH, PROGRESS_INTERVAL};
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::geometry::{Compass, Orientation, to_side};
use crate::spatial::grid::Cell;
use crate::spatial::path::{PathStep, PlacementPath};
use crate::spatial::tiles::{Category, Colour, PlacedTile, TileCatalog, TileRef, WILDCARD};

/// What the search does with complete placements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Count every placement reaching the depth limit
    Count,
    /// Count every placement and hand each to the reporter
    Display,
    /// Stop at the first placement reaching the depth limit
    FirstSolution,
}

/// Tiles placed along a path prefix, in visitation order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    entries: Vec<(Cell, PlacedTile)>,
    /// Visitation index for each row-major cell index, `None` if unplaced
    fill_order: Vec<Option<usize>>,
}

impl Placement {
    /// Build from the placed tiles of a path prefix
    pub fn from_path(path: &PlacementPath, placed: &[PlacedTile]) -> Self {
        let entries: Vec<(Cell, PlacedTile)> = path
            .steps()
            .iter()
            .zip(placed)
            .map(|(step, &tile)| (step.cell, tile))
            .collect();
        let fill_order = path
            .fill_order()
            .iter()
            .map(|visit| visit.filter(|&v| v < entries.len()))
            .collect();
        Self {
            entries,
            fill_order,
        }
    }

    /// Placed tiles in visitation order, with their cells
    pub fn entries(&self) -> &[(Cell, PlacedTile)] {
        &self.entries
    }

    /// Number of placed tiles
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is placed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Visitation index for every row-major cell index
    pub fn fill_order(&self) -> &[Option<usize>] {
        &self.fill_order
    }

    /// Tile placed at a cell, if any
    pub fn at(&self, cell: Cell) -> Option<PlacedTile> {
        let visit = self.fill_order.get(cell.index()).copied().flatten()?;
        self.entries.get(visit).map(|&(_, placed)| placed)
    }

    /// Replace the tile at a visitation index, keeping its orientation
    pub(crate) fn set_tile(&mut self, visit: usize, tile: TileRef) {
        if let Some((_, placed)) = self.entries.get_mut(visit) {
            placed.tile = tile;
        }
    }

    /// Number of shared sides between placed cells whose colours differ
    pub fn mismatches(&self, catalog: &TileCatalog) -> usize {
        let colour = |placed: PlacedTile, compass: Compass| {
            catalog.colour(placed.tile.category, placed.tile.id, placed.orientation, compass)
        };
        let mut mismatches = 0;
        for &(cell, placed) in &self.entries {
            for compass in [Compass::East, Compass::South] {
                let Some(other) = cell.neighbour(compass).and_then(|n| self.at(n)) else {
                    continue;
                };
                if colour(placed, compass) != colour(other, compass.opposite()) {
                    mismatches += 1;
                }
            }
        }
        mismatches
    }
}

/// How a search ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// First-solution mode found a placement reaching the depth limit
    Found(Placement),
    /// The whole tree was explored
    Exhausted {
        /// Placements reaching the depth limit
        solutions: u64,
    },
}

/// Snapshot handed to a reporter
#[derive(Debug, Clone, Copy)]
pub struct SearchProgress<'s> {
    /// Placements reaching the depth limit so far
    pub solutions: u64,
    /// Candidates accepted at each depth so far
    pub per_depth: &'s [u64],
    /// Time since the search started
    pub elapsed: Duration,
    /// Depth limit of the search
    pub max_depth: usize,
}

impl SearchProgress<'_> {
    /// Solutions per whole second elapsed
    pub fn rate(&self) -> u64 {
        match self.elapsed.as_secs() {
            0 => 0,
            seconds => self.solutions / seconds,
        }
    }
}

/// Receives progress and solutions from a running search
pub trait SearchReporter {
    /// Called on the progress interval and once when the search ends
    fn progress(&mut self, progress: &SearchProgress<'_>);

    /// Called for each solution in [`SearchMode::Display`]
    fn solution(&mut self, _placement: &Placement) {}
}

/// Reporter that logs progress through the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl SearchReporter for LogReporter {
    fn progress(&mut self, progress: &SearchProgress<'_>) {
        for (depth, count) in progress.per_depth.iter().enumerate() {
            log::debug!("    {} -> {count}", depth + 1);
        }
        log::info!(
            "Num solutions: {} for depth {} in {} seconds, {} per second",
            progress.solutions,
            progress.max_depth,
            progress.elapsed.as_secs(),
            progress.rate()
        );
    }

    fn solution(&mut self, placement: &Placement) {
        log::info!("Solution with {} tiles", placement.len());
    }
}

/// Reporter that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl SearchReporter for SilentReporter {
    fn progress(&mut self, _progress: &SearchProgress<'_>) {}
}

/// Counters and wall clock shared by the search engines
#[derive(Debug)]
pub(crate) struct SearchClock {
    started: Instant,
    last_report: Instant,
    placements: u64,
    pub(crate) solutions: u64,
    pub(crate) per_depth: Vec<u64>,
    max_depth: usize,
}

impl SearchClock {
    pub(crate) fn new(max_depth: usize) -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_report: now,
            placements: 0,
            solutions: 0,
            per_depth: vec![0; max_depth],
            max_depth,
        }
    }

    pub(crate) fn accept(&mut self, depth: usize) {
        if let Some(count) = self.per_depth.get_mut(depth) {
            *count += 1;
        }
    }

    /// Count a placement, reporting if the interval has passed
    pub(crate) fn tick(&mut self, reporter: &mut dyn SearchReporter) {
        self.placements = self.placements.wrapping_add(1);
        if self.placements & CLOCK_CHECK_MASK != 0 {
            return;
        }
        if self.last_report.elapsed() >= PROGRESS_INTERVAL {
            self.last_report = Instant::now();
            self.report(reporter);
        }
    }

    pub(crate) fn report(&self, reporter: &mut dyn SearchReporter) {
        reporter.progress(&SearchProgress {
            solutions: self.solutions,
            per_depth: &self.per_depth,
            elapsed: self.started.elapsed(),
            max_depth: self.max_depth,
        });
    }
}

/// Check a search depth against a path
pub(crate) fn validate_depth(max_depth: usize, path: &PlacementPath) -> Result<()> {
    if max_depth < MIN_SEARCH_DEPTH {
        return Err(invalid_parameter(
            "max_depth",
            &max_depth,
            &format!("depth less than {MIN_SEARCH_DEPTH} is not supported"),
        ));
    }
    if max_depth > path.len() {
        return Err(invalid_parameter(
            "max_depth",
            &max_depth,
            &format!("path only has {} cells", path.len()),
        ));
    }
    Ok(())
}

/// Exhaustive depth-first search over a placement path
pub struct Backtracker<'a> {
    indices: &'a CandidateIndices,
    path: &'a PlacementPath,
    max_depth: usize,
    mode: SearchMode,
    used: [BitVec; 3],
    placed: Vec<PlacedTile>,
    clock: SearchClock,
}

impl<'a> Backtracker<'a> {
    /// Create a search placing the first `max_depth` cells of `path`
    ///
    /// # Errors
    ///
    /// Returns an error if `max_depth` is less than 2 or longer than the path
    pub fn new(
        indices: &'a CandidateIndices,
        path: &'a PlacementPath,
        max_depth: usize,
        mode: SearchMode,
    ) -> Result<Self> {
        validate_depth(max_depth, path)?;
        let catalog = indices.catalog();
        Ok(Self {
            indices,
            path,
            max_depth,
            mode,
            used: Category::ALL.map(|category| bitvec![0; catalog.count(category)]),
            placed: vec![PlacedTile::new(Category::Mid, 0, Orientation::Base); max_depth],
            clock: SearchClock::new(max_depth),
        })
    }

    /// Depth limit of the search
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Candidates accepted at each depth by the last search
    pub fn per_depth(&self) -> &[u64] {
        &self.clock.per_depth
    }

    /// Run the search to completion or to the first solution
    pub fn solve(&mut self, reporter: &mut dyn SearchReporter) -> SearchOutcome {
        log::info!("Backtracker: depth {}", self.max_depth);
        self.clock = SearchClock::new(self.max_depth);
        for bits in &mut self.used {
            bits.fill(false);
        }

        let flow = self.place(0, reporter);
        self.clock.report(reporter);

        match flow {
            ControlFlow::Break(placement) => SearchOutcome::Found(placement),
            ControlFlow::Continue(()) => SearchOutcome::Exhausted {
                solutions: self.clock.solutions,
            },
        }
    }

    fn place(&mut self, depth: usize, reporter: &mut dyn SearchReporter) -> ControlFlow<Placement> {
        let Some(step) = self.path.step(depth).copied() else {
            return ControlFlow::Continue(());
        };
        let indices = self.indices;
        let catalog = indices.catalog();

        match step.category {
            Category::Mid => {
                let north = colour_from(catalog, &self.placed, step.north(), Compass::South);
                let west = colour_from(catalog, &self.placed, step.west(), Compass::East);
                for candidate in indices.mids_with(north, west) {
                    let placed =
                        PlacedTile::new(Category::Mid, candidate.id, candidate.orientation);
                    if self.is_used(placed.tile) || !fits(catalog, &self.placed, &step, placed) {
                        continue;
                    }
                    self.try_candidate(depth, placed, reporter)?;
                }
            }
            category @ (Category::Corner | Category::Edge) => {
                let orientation = step.orientation.unwrap_or(Orientation::Base);
                for &id in border_candidates(indices, &self.placed, &step, orientation, false) {
                    let placed = PlacedTile::new(category, id, orientation);
                    if self.is_used(placed.tile) || !fits(catalog, &self.placed, &step, placed) {
                        continue;
                    }
                    self.try_candidate(depth, placed, reporter)?;
                }
            }
        }

        ControlFlow::Continue(())
    }

    fn try_candidate(
        &mut self,
        depth: usize,
        placed: PlacedTile,
        reporter: &mut dyn SearchReporter,
    ) -> ControlFlow<Placement> {
        self.clock.accept(depth);
        if let Some(slot) = self.placed.get_mut(depth) {
            *slot = placed;
        }

        if depth + 1 == self.max_depth {
            self.clock.solutions += 1;
            match self.mode {
                SearchMode::FirstSolution => {
                    return ControlFlow::Break(Placement::from_path(self.path, &self.placed));
                }
                SearchMode::Display => {
                    reporter.solution(&Placement::from_path(self.path, &self.placed));
                }
                SearchMode::Count => {}
            }
            return ControlFlow::Continue(());
        }

        self.set_used(placed.tile, true);
        self.clock.tick(reporter);
        let flow = self.place(depth + 1, reporter);
        self.set_used(placed.tile, false);
        flow
    }

    fn is_used(&self, tile: TileRef) -> bool {
        self.used
            .get(tile.category as usize)
            .and_then(|bits| bits.get(tile.id).map(|bit| *bit))
            .unwrap_or(true)
    }

    fn set_used(&mut self, tile: TileRef, value: bool) {
        if let Some(bits) = self.used.get_mut(tile.category as usize) {
            if tile.id < bits.len() {
                bits.set(tile.id, value);
            }
        }
    }
}

/// Candidate ids for a border cell, keyed on a placed neighbour along the border
///
/// With `reduced`, edges are looked up among class representatives only.
pub(crate) fn border_candidates<'i>(
    indices: &'i CandidateIndices,
    placed: &[PlacedTile],
    step: &PathStep,
    orientation: Orientation,
    reduced: bool,
) -> &'i [usize] {
    let catalog = indices.catalog();
    let category = step.category;

    if !reduced && category == Category::Edge && orientation == Orientation::Anticlockwise90 {
        if let (Some(north), Some(west)) = (step.north(), step.west()) {
            return indices.rhs_edges_with(
                placed_colour(catalog, placed, north, Compass::South),
                placed_colour(catalog, placed, west, Compass::East),
            );
        }
    }

    for compass in Compass::ALL {
        if !step.cell.is_border_side(compass) {
            continue;
        }
        let Some(neighbour) = step.neighbour(compass) else {
            continue;
        };
        let side = to_side(orientation, compass);
        if let Some(border_side) = BorderSide::from_side(category, side) {
            let colour = placed_colour(catalog, placed, neighbour, compass.opposite());
            return match (reduced, category) {
                (true, Category::Edge) => indices.reduced_edges_with(border_side, colour),
                _ => indices.border_with(category, border_side, colour),
            };
        }
    }

    match (reduced, category) {
        (true, Category::Edge) => indices.edge_representatives(),
        _ => indices.all(category),
    }
}

/// Whether the tile matches every placed neighbour of the step
pub(crate) fn fits(
    catalog: &TileCatalog,
    placed: &[PlacedTile],
    step: &PathStep,
    tile: PlacedTile,
) -> bool {
    Compass::ALL.into_iter().all(|compass| {
        step.neighbour(compass).is_none_or(|neighbour| {
            catalog.colour(tile.tile.category, tile.tile.id, tile.orientation, compass)
                == placed_colour(catalog, placed, neighbour, compass.opposite())
        })
    })
}

/// Colour a placed tile shows towards `compass`, or the wildcard if not placed
fn colour_from(
    catalog: &TileCatalog,
    placed: &[PlacedTile],
    visit: Option<usize>,
    compass: Compass,
) -> Colour {
    visit.map_or(WILDCARD, |visit| placed_colour(catalog, placed, visit, compass))
}

fn placed_colour(
    catalog: &TileCatalog,
    placed: &[PlacedTile],
    visit: usize,
    compass: Compass,
) -> Colour {
    placed.get(visit).map_or(WILDCARD, |tile| {
        catalog.colour(tile.tile.category, tile.tile.id, tile.orientation, compass)
    })
}
