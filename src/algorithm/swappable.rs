//! Border-only search that treats interchangeable edges as one tile
//!
//! Edges whose two border colours agree differ only in the colour they show
//! towards the interior, which a border-only path never checks. The search
//! places one representative per class with a multiplicity counter, and a
//! repair step hands out real ids once a placement is complete.

use std::ops::ControlFlow;

use bitvec::prelude::*;

use crate::algorithm::backtracker::{
    Placement, SearchClock, SearchMode, SearchOutcome, SearchReporter, border_candidates, fits,
    validate_depth,
};
use crate::analysis::indices::CandidateIndices;
use crate::io::error::{Result, invalid_path};
use crate::spatial::geometry::Orientation;
use crate::spatial::path::PlacementPath;
use crate::spatial::tiles::{Category, PlacedTile, TileRef};

/// Depth-first border search over edge class representatives
pub struct SwappableEdgeBacktracker<'a> {
    indices: &'a CandidateIndices,
    path: &'a PlacementPath,
    max_depth: usize,
    mode: SearchMode,
    used_corners: BitVec,
    /// Remaining copies of each class, indexed by representative id
    remaining: Vec<usize>,
    placed: Vec<PlacedTile>,
    clock: SearchClock,
}

impl<'a> SwappableEdgeBacktracker<'a> {
    /// Create a search placing the first `max_depth` cells of a border-only path
    ///
    /// # Errors
    ///
    /// Returns an error if the path visits interior cells, or if `max_depth`
    /// is less than 2 or longer than the path
    pub fn new(
        indices: &'a CandidateIndices,
        path: &'a PlacementPath,
        max_depth: usize,
        mode: SearchMode,
    ) -> Result<Self> {
        if path.contains_mids() {
            return Err(invalid_path(&"swappable edge search only supports border cells"));
        }
        validate_depth(max_depth, path)?;

        let catalog = indices.catalog();
        Ok(Self {
            indices,
            path,
            max_depth,
            mode,
            used_corners: bitvec![0; catalog.count(Category::Corner)],
            remaining: class_sizes(indices),
            placed: vec![PlacedTile::new(Category::Edge, 0, Orientation::Base); max_depth],
            clock: SearchClock::new(max_depth),
        })
    }

    /// Candidates accepted at each depth by the last search
    pub fn per_depth(&self) -> &[u64] {
        &self.clock.per_depth
    }

    /// Run the search; found placements carry real, distinct edge ids
    pub fn solve(&mut self, reporter: &mut dyn SearchReporter) -> SearchOutcome {
        log::info!("Swappable edge backtracker: depth {}", self.max_depth);
        self.clock = SearchClock::new(self.max_depth);
        self.used_corners.fill(false);
        self.remaining = class_sizes(self.indices);

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
        let orientation = step.orientation.unwrap_or(Orientation::Base);

        for &id in border_candidates(indices, &self.placed, &step, orientation, true) {
            let placed = PlacedTile::new(step.category, id, orientation);
            if !self.is_available(placed.tile) || !fits(catalog, &self.placed, &step, placed) {
                continue;
            }
            self.try_candidate(depth, placed, reporter)?;
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
                    return ControlFlow::Break(self.repaired());
                }
                SearchMode::Display => reporter.solution(&self.repaired()),
                SearchMode::Count => {}
            }
            return ControlFlow::Continue(());
        }

        self.take(placed.tile);
        self.clock.tick(reporter);
        let flow = self.place(depth + 1, reporter);
        self.give_back(placed.tile);
        flow
    }

    fn repaired(&self) -> Placement {
        repair(self.indices, &Placement::from_path(self.path, &self.placed))
    }

    fn is_available(&self, tile: TileRef) -> bool {
        match tile.category {
            Category::Corner => self.used_corners.get(tile.id).is_some_and(|bit| !*bit),
            Category::Edge => self.remaining.get(tile.id).is_some_and(|&count| count > 0),
            Category::Mid => false,
        }
    }

    fn take(&mut self, tile: TileRef) {
        match tile.category {
            Category::Corner if tile.id < self.used_corners.len() => {
                self.used_corners.set(tile.id, true);
            }
            Category::Edge => {
                if let Some(count) = self.remaining.get_mut(tile.id) {
                    *count = count.saturating_sub(1);
                }
            }
            _ => {}
        }
    }

    fn give_back(&mut self, tile: TileRef) {
        match tile.category {
            Category::Corner if tile.id < self.used_corners.len() => {
                self.used_corners.set(tile.id, false);
            }
            Category::Edge => {
                if let Some(count) = self.remaining.get_mut(tile.id) {
                    *count += 1;
                }
            }
            _ => {}
        }
    }
}

/// Class size for each representative edge id, zero for every other id
fn class_sizes(indices: &CandidateIndices) -> Vec<usize> {
    let mut sizes = vec![0; indices.catalog().count(Category::Edge)];
    for &representative in indices.edge_representatives() {
        if let Some(size) = sizes.get_mut(representative) {
            *size = indices.edge_class_of(representative).len();
        }
    }
    sizes
}

/// Replace each edge representative with the next unused real id of its class
///
/// Ids are handed out in visitation order, lowest first.
pub fn repair(indices: &CandidateIndices, representatives: &Placement) -> Placement {
    let mut repaired = representatives.clone();
    let mut handed_out = vec![0_usize; indices.catalog().count(Category::Edge)];

    for (visit, &(_, placed)) in representatives.entries().iter().enumerate() {
        if placed.tile.category != Category::Edge {
            continue;
        }
        let class = indices.edge_class_of(placed.tile.id);
        let Some(cursor) = class.first().and_then(|&rep| handed_out.get_mut(rep)) else {
            continue;
        };
        if let Some(&id) = class.get(*cursor) {
            repaired.set_tile(visit, TileRef::new(Category::Edge, id));
        }
        *cursor += 1;
    }

    repaired
}

/// Replace each edge with the representative of its class
pub fn collapse(indices: &CandidateIndices, placement: &Placement) -> Placement {
    let mut collapsed = placement.clone();
    for (visit, &(_, placed)) in placement.entries().iter().enumerate() {
        if placed.tile.category != Category::Edge {
            continue;
        }
        if let Some(&representative) = indices.edge_class_of(placed.tile.id).first() {
            collapsed.set_tile(visit, TileRef::new(Category::Edge, representative));
        }
    }
    collapsed
}
