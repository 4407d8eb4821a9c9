//! Per-cell sets of admissible (tile, orientation) pairs
//!
//! A cell starts as [`CellConstraint::Options`] (interior) or
//! [`CellConstraint::FixedOrientation`] (border) and only ever narrows toward
//! [`CellConstraint::Solved`]. An empty option list proves the board infeasible.

use std::fmt;

use crate::algorithm::bitset::ColourSet;
use crate::spatial::geometry::{Compass, Orientation};
use crate::spatial::tiles::{Category, PlacedTile, TileCatalog};

/// What is still possible in one board cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellConstraint {
    /// Several (id, orientation) pairs, stored as parallel lists
    Options {
        /// Category the cell accepts
        category: Category,
        /// Candidate ids
        ids: Vec<usize>,
        /// Orientation paired with each id
        orientations: Vec<Orientation>,
    },
    /// One id, several orientations
    FixedTileId {
        /// Category the cell accepts
        category: Category,
        /// The only possible id
        id: usize,
        /// Remaining orientations
        orientations: Vec<Orientation>,
    },
    /// One orientation, several ids
    FixedOrientation {
        /// Category the cell accepts
        category: Category,
        /// Remaining ids
        ids: Vec<usize>,
        /// The only possible orientation
        orientation: Orientation,
    },
    /// Exactly one tile in exactly one orientation
    Solved {
        /// Category of the tile
        category: Category,
        /// Tile id
        id: usize,
        /// Tile orientation
        orientation: Orientation,
    },
}

/// Outcome of removing a tile from a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elimination {
    /// The cell never admitted the tile
    Unaffected,
    /// The tile was removed from the cell's options
    Reduced,
    /// The cell requires the tile, so it cannot be removed
    Conflict,
}

impl CellConstraint {
    /// Every orientation of every id, for an interior cell
    pub fn all_options(category: Category, count: usize) -> Self {
        let mut ids = Vec::with_capacity(count * 4);
        let mut orientations = Vec::with_capacity(count * 4);
        for id in 0..count {
            for orientation in Orientation::ALL {
                ids.push(id);
                orientations.push(orientation);
            }
        }
        Self::Options {
            category,
            ids,
            orientations,
        }
    }

    /// Every id in one orientation, for a border cell
    pub fn all_ids(category: Category, count: usize, orientation: Orientation) -> Self {
        Self::FixedOrientation {
            category,
            ids: (0..count).collect(),
            orientation,
        }
    }

    /// Category the cell accepts
    pub const fn category(&self) -> Category {
        match self {
            Self::Options { category, .. }
            | Self::FixedTileId { category, .. }
            | Self::FixedOrientation { category, .. }
            | Self::Solved { category, .. } => *category,
        }
    }

    /// Remaining options; a solved cell counts as zero
    pub fn num_options(&self) -> usize {
        match self {
            Self::Solved { .. } => 0,
            other => other.len(),
        }
    }

    /// Number of (id, orientation) pairs held, one for a solved cell
    pub fn len(&self) -> usize {
        match self {
            Self::Options { ids, .. } | Self::FixedOrientation { ids, .. } => ids.len(),
            Self::FixedTileId { orientations, .. } => orientations.len(),
            Self::Solved { .. } => 1,
        }
    }

    /// Whether no option remains
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The (id, orientation) pair at a position in the option list
    pub fn option_at(&self, index: usize) -> Option<(usize, Orientation)> {
        match self {
            Self::Options {
                ids, orientations, ..
            } => ids.get(index).copied().zip(orientations.get(index).copied()),
            Self::FixedTileId {
                id, orientations, ..
            } => orientations.get(index).map(|&orientation| (*id, orientation)),
            Self::FixedOrientation {
                ids, orientation, ..
            } => ids.get(index).map(|&id| (id, *orientation)),
            Self::Solved {
                id, orientation, ..
            } => (index == 0).then_some((*id, *orientation)),
        }
    }

    /// Iterate the (id, orientation) pairs held
    pub fn options(&self) -> impl Iterator<Item = (usize, Orientation)> + '_ {
        (0..self.len()).filter_map(|index| self.option_at(index))
    }

    /// Whether the pair is admissible
    pub fn admits(&self, category: Category, id: usize, orientation: Orientation) -> bool {
        category == self.category() && self.options().any(|option| option == (id, orientation))
    }

    /// Whether any option uses the tile
    pub fn contains_tile(&self, category: Category, id: usize) -> bool {
        if category != self.category() {
            return false;
        }
        match self {
            Self::Options { ids, .. } | Self::FixedOrientation { ids, .. } => ids.contains(&id),
            Self::FixedTileId { id: fixed, .. } | Self::Solved { id: fixed, .. } => *fixed == id,
        }
    }

    /// The id every option uses, if there is only one
    pub const fn single_id(&self) -> Option<usize> {
        match self {
            Self::FixedTileId { id, .. } | Self::Solved { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// The placed tile if solved
    pub const fn solved(&self) -> Option<PlacedTile> {
        match self {
            Self::Solved {
                category,
                id,
                orientation,
            } => Some(PlacedTile::new(*category, *id, *orientation)),
            _ => None,
        }
    }

    /// Colours the cell could show towards `compass`
    pub fn possible_colours(
        &self,
        catalog: &TileCatalog,
        compass: Compass,
        capacity: usize,
    ) -> ColourSet {
        let category = self.category();
        ColourSet::from_colours(
            self.options()
                .map(|(id, orientation)| catalog.colour(category, id, orientation, compass)),
            capacity,
        )
    }

    /// Remove every option using the tile
    pub fn eliminate(&mut self, category: Category, id: usize) -> Elimination {
        if !self.contains_tile(category, id) {
            return Elimination::Unaffected;
        }
        match self {
            Self::FixedTileId { .. } | Self::Solved { .. } => Elimination::Conflict,
            Self::Options {
                ids, orientations, ..
            } => {
                let mut keep = ids.iter().map(|&candidate| candidate != id);
                orientations.retain(|_| keep.next().unwrap_or(true));
                ids.retain(|&candidate| candidate != id);
                Elimination::Reduced
            }
            Self::FixedOrientation { ids, .. } => {
                ids.retain(|&candidate| candidate != id);
                Elimination::Reduced
            }
        }
    }

    /// Keep only options accepted by `accept`, returning whether any were dropped
    ///
    /// Solved cells are left untouched.
    pub fn retain(&mut self, mut accept: impl FnMut(usize, Orientation) -> bool) -> bool {
        let before = self.len();
        match self {
            Self::Solved { .. } => {}
            Self::Options {
                ids, orientations, ..
            } => {
                let verdicts: Vec<bool> = ids
                    .iter()
                    .zip(orientations.iter())
                    .map(|(&id, &orientation)| accept(id, orientation))
                    .collect();
                let mut keep = verdicts.iter();
                ids.retain(|_| keep.next().copied().unwrap_or(true));
                let mut keep = verdicts.iter();
                orientations.retain(|_| keep.next().copied().unwrap_or(true));
            }
            Self::FixedTileId {
                id, orientations, ..
            } => {
                let fixed = *id;
                orientations.retain(|&orientation| accept(fixed, orientation));
            }
            Self::FixedOrientation {
                ids, orientation, ..
            } => {
                let fixed = *orientation;
                ids.retain(|&id| accept(id, fixed));
            }
        }
        self.len() != before
    }

    /// Move to the narrowest variant that still holds every remaining option
    ///
    /// Returns the id that became the cell's only id, if this call made it so.
    pub fn normalize(&mut self) -> Option<usize> {
        let had_single_id = self.single_id().is_some();
        let category = self.category();

        let narrowed = match self {
            Self::Options {
                ids, orientations, ..
            } => {
                let single_id = ids
                    .first()
                    .copied()
                    .filter(|first| ids.iter().all(|id| id == first));
                let single_orientation = orientations
                    .first()
                    .copied()
                    .filter(|first| orientations.iter().all(|o| o == first));
                match (single_id, single_orientation) {
                    (Some(id), Some(orientation)) => Some(Self::Solved {
                        category,
                        id,
                        orientation,
                    }),
                    (Some(id), None) => Some(Self::FixedTileId {
                        category,
                        id,
                        orientations: std::mem::take(orientations),
                    }),
                    (None, Some(orientation)) => Some(Self::FixedOrientation {
                        category,
                        ids: std::mem::take(ids),
                        orientation,
                    }),
                    (None, None) => None,
                }
            }
            Self::FixedTileId {
                id, orientations, ..
            } => match orientations.as_slice() {
                [orientation] => Some(Self::Solved {
                    category,
                    id: *id,
                    orientation: *orientation,
                }),
                _ => None,
            },
            Self::FixedOrientation {
                ids, orientation, ..
            } => match ids.as_slice() {
                [id] => Some(Self::Solved {
                    category,
                    id: *id,
                    orientation: *orientation,
                }),
                _ => None,
            },
            Self::Solved { .. } => None,
        };

        if let Some(narrowed) = narrowed {
            *self = narrowed;
        }

        if had_single_id {
            None
        } else {
            self.single_id()
        }
    }
}

impl fmt::Display for CellConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Options { ids, .. } => write!(f, "Options ({})", ids.len()),
            Self::FixedTileId {
                id, orientations, ..
            } => write!(f, "Fixed id: {id}, orientations: {orientations:?}"),
            Self::FixedOrientation {
                ids, orientation, ..
            } => write!(f, "Fixed orientation: {orientation}, ids ({}): {ids:?}", ids.len()),
            Self::Solved {
                category,
                id,
                orientation,
            } => write!(f, "Solved: {category} {id}, {orientation}"),
        }
    }
}
