//! Precomputed candidate lookups keyed by required colours
//!
//! Every index is a flat vector addressed by a dense key, so a lookup is a
//! single bounds-checked slice access. Candidate lists are ordered by
//! ascending tile id and then ascending orientation, which fixes the
//! tie-break order of every search built on them.

use crate::spatial::geometry::{Compass, Orientation, to_side};
use crate::spatial::tiles::{Category, Colour, TileCatalog, WILDCARD};

/// A candidate interior tile in a specific orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Candidate {
    /// Mid tile id
    pub id: usize,
    /// Orientation that produces the looked-up colours
    pub orientation: Orientation,
}

/// Which border-facing side of a corner or edge tile a lookup refers to
///
/// Walking the border clockwise, a tile's clockwise side faces the next
/// cell and its anticlockwise side faces the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderSide {
    /// Canonical side 0 of a corner, side 3 of an edge
    Clockwise,
    /// Canonical side 1 of a corner, side 1 of an edge
    Anticlockwise,
}

impl BorderSide {
    /// Canonical side index for a category
    pub const fn side(self, category: Category) -> Option<usize> {
        match (category, self) {
            (Category::Corner, Self::Clockwise) => Some(0),
            (Category::Corner, Self::Anticlockwise) | (Category::Edge, Self::Anticlockwise) => {
                Some(1)
            }
            (Category::Edge, Self::Clockwise) => Some(3),
            (Category::Mid, _) => None,
        }
    }

    /// Border side a canonical side index refers to, if it is border-facing
    pub const fn from_side(category: Category, side: usize) -> Option<Self> {
        match (category, side) {
            (Category::Corner, 0) | (Category::Edge, 3) => Some(Self::Clockwise),
            (Category::Corner | Category::Edge, 1) => Some(Self::Anticlockwise),
            _ => None,
        }
    }
}

/// All candidate indices for one catalog
#[derive(Debug, Clone)]
pub struct CandidateIndices {
    catalog: TileCatalog,
    border_colours: usize,
    interior_colours: usize,

    corners_clockwise: Vec<Vec<usize>>,
    corners_anticlockwise: Vec<Vec<usize>>,
    edges_clockwise: Vec<Vec<usize>>,
    edges_anticlockwise: Vec<Vec<usize>>,
    reduced_edges_clockwise: Vec<Vec<usize>>,
    reduced_edges_anticlockwise: Vec<Vec<usize>>,
    edge_representatives: Vec<usize>,

    /// Keyed by (anticlockwise, clockwise) border colours
    edge_classes: Vec<Vec<usize>>,
    /// Keyed by (clockwise, anticlockwise) border colours
    corner_pairs: Vec<Vec<usize>>,
    /// Right-column edges keyed by (north border colour, west interior colour or wildcard)
    rhs_edges: Vec<Vec<usize>>,
    /// Keyed by (north, west) interior colours, each with a trailing wildcard slot
    mid_pairs: Vec<Vec<Candidate>>,

    all_ids: [Vec<usize>; 3],
}

impl CandidateIndices {
    /// Build every index from a catalog
    pub fn new(catalog: TileCatalog) -> Self {
        let border_colours = catalog.num_border_colours();
        let interior_colours = catalog.num_interior_colours();
        let interior_slots = interior_colours + 1;

        let single_index = |category: Category, side: usize| {
            let mut index = vec![Vec::new(); border_colours];
            for id in 0..catalog.count(category) {
                let colour = usize::from(catalog.side(category, id, side));
                if let Some(bucket) = index.get_mut(colour) {
                    bucket.push(id);
                }
            }
            index
        };

        let corners_clockwise = single_index(Category::Corner, 0);
        let corners_anticlockwise = single_index(Category::Corner, 1);
        let edges_clockwise = single_index(Category::Edge, 3);
        let edges_anticlockwise = single_index(Category::Edge, 1);

        let mut edge_classes = vec![Vec::new(); border_colours * border_colours];
        for id in 0..catalog.count(Category::Edge) {
            let anticlockwise = usize::from(catalog.side(Category::Edge, id, 1));
            let clockwise = usize::from(catalog.side(Category::Edge, id, 3));
            if let Some(bucket) = edge_classes.get_mut(anticlockwise * border_colours + clockwise)
            {
                bucket.push(id);
            }
        }

        let mut corner_pairs = vec![Vec::new(); border_colours * border_colours];
        for id in 0..catalog.count(Category::Corner) {
            let clockwise = usize::from(catalog.side(Category::Corner, id, 0));
            let anticlockwise = usize::from(catalog.side(Category::Corner, id, 1));
            if let Some(bucket) = corner_pairs.get_mut(clockwise * border_colours + anticlockwise)
            {
                bucket.push(id);
            }
        }

        // One representative per class: the lowest id sharing both border colours
        let is_representative = |id: usize| {
            let anticlockwise = usize::from(catalog.side(Category::Edge, id, 1));
            let clockwise = usize::from(catalog.side(Category::Edge, id, 3));
            edge_classes
                .get(anticlockwise * border_colours + clockwise)
                .and_then(|class| class.first())
                == Some(&id)
        };
        let reduce = |index: &[Vec<usize>]| -> Vec<Vec<usize>> {
            index
                .iter()
                .map(|bucket| {
                    bucket
                        .iter()
                        .copied()
                        .filter(|&id| is_representative(id))
                        .collect()
                })
                .collect()
        };
        let reduced_edges_clockwise = reduce(&edges_clockwise);
        let reduced_edges_anticlockwise = reduce(&edges_anticlockwise);
        let edge_representatives = (0..catalog.count(Category::Edge))
            .filter(|&id| is_representative(id))
            .collect();

        let mut rhs_edges = vec![Vec::new(); border_colours * interior_slots];
        for id in 0..catalog.count(Category::Edge) {
            let north = usize::from(catalog.colour(
                Category::Edge,
                id,
                Orientation::Anticlockwise90,
                Compass::North,
            ));
            let west = usize::from(catalog.colour(
                Category::Edge,
                id,
                Orientation::Anticlockwise90,
                Compass::West,
            ));
            for key in [
                north * interior_slots + west,
                north * interior_slots + interior_colours,
            ] {
                if let Some(bucket) = rhs_edges.get_mut(key) {
                    bucket.push(id);
                }
            }
        }

        let mut mid_pairs = vec![Vec::new(); interior_slots * interior_slots];
        for id in 0..catalog.count(Category::Mid) {
            for orientation in Orientation::ALL {
                let north = usize::from(catalog.side(
                    Category::Mid,
                    id,
                    to_side(orientation, Compass::North),
                ));
                let west = usize::from(catalog.side(
                    Category::Mid,
                    id,
                    to_side(orientation, Compass::West),
                ));
                let candidate = Candidate { id, orientation };
                for (n, w) in [
                    (north, west),
                    (interior_colours, west),
                    (north, interior_colours),
                    (interior_colours, interior_colours),
                ] {
                    if let Some(bucket) = mid_pairs.get_mut(n * interior_slots + w) {
                        bucket.push(candidate);
                    }
                }
            }
        }

        let all_ids: [Vec<usize>; 3] =
            Category::ALL.map(|category| (0..catalog.count(category)).collect());

        log::debug!(
            "Indices built: {} edge classes, {} non-empty mid pairs",
            edge_classes.iter().filter(|class| !class.is_empty()).count(),
            mid_pairs.iter().filter(|bucket| !bucket.is_empty()).count()
        );

        Self {
            catalog,
            border_colours,
            interior_colours,
            corners_clockwise,
            corners_anticlockwise,
            edges_clockwise,
            edges_anticlockwise,
            reduced_edges_clockwise,
            reduced_edges_anticlockwise,
            edge_representatives,
            edge_classes,
            corner_pairs,
            rhs_edges,
            mid_pairs,
            all_ids,
        }
    }

    /// The catalog the indices were built from
    pub const fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    /// Number of border colours
    pub const fn border_colours(&self) -> usize {
        self.border_colours
    }

    /// Number of interior colours, excluding the wildcard
    pub const fn interior_colours(&self) -> usize {
        self.interior_colours
    }

    /// Every id of a category in ascending order
    pub fn all(&self, category: Category) -> &[usize] {
        self.all_ids
            .get(category as usize)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Corner ids whose given border side shows `colour`
    pub fn corners_with(&self, side: BorderSide, colour: Colour) -> &[usize] {
        let index = match side {
            BorderSide::Clockwise => &self.corners_clockwise,
            BorderSide::Anticlockwise => &self.corners_anticlockwise,
        };
        bucket(index, usize::from(colour))
    }

    /// Edge ids whose given border side shows `colour`
    pub fn edges_with(&self, side: BorderSide, colour: Colour) -> &[usize] {
        let index = match side {
            BorderSide::Clockwise => &self.edges_clockwise,
            BorderSide::Anticlockwise => &self.edges_anticlockwise,
        };
        bucket(index, usize::from(colour))
    }

    /// Class representatives whose given border side shows `colour`
    pub fn reduced_edges_with(&self, side: BorderSide, colour: Colour) -> &[usize] {
        let index = match side {
            BorderSide::Clockwise => &self.reduced_edges_clockwise,
            BorderSide::Anticlockwise => &self.reduced_edges_anticlockwise,
        };
        bucket(index, usize::from(colour))
    }

    /// Single-colour lookup for either border category
    pub fn border_with(&self, category: Category, side: BorderSide, colour: Colour) -> &[usize] {
        match category {
            Category::Corner => self.corners_with(side, colour),
            Category::Edge => self.edges_with(side, colour),
            Category::Mid => &[],
        }
    }

    /// Lowest edge id of every class, ascending
    pub fn edge_representatives(&self) -> &[usize] {
        &self.edge_representatives
    }

    /// Edge ids sharing both border colours, keyed (anticlockwise, clockwise)
    pub fn edge_class(&self, anticlockwise: Colour, clockwise: Colour) -> &[usize] {
        let (a, c) = (usize::from(anticlockwise), usize::from(clockwise));
        if a >= self.border_colours || c >= self.border_colours {
            return &[];
        }
        bucket(&self.edge_classes, a * self.border_colours + c)
    }

    /// Class of edges that differ from `id` only in their interior colour
    pub fn edge_class_of(&self, id: usize) -> &[usize] {
        self.edge_class(
            self.catalog.side(Category::Edge, id, 1),
            self.catalog.side(Category::Edge, id, 3),
        )
    }

    /// Every non-empty edge class in key order
    pub fn edge_classes(&self) -> impl Iterator<Item = &[usize]> {
        self.edge_classes
            .iter()
            .filter(|class| !class.is_empty())
            .map(Vec::as_slice)
    }

    /// Corner ids with both border colours, keyed (clockwise, anticlockwise)
    pub fn corners_with_pair(&self, clockwise: Colour, anticlockwise: Colour) -> &[usize] {
        let (c, a) = (usize::from(clockwise), usize::from(anticlockwise));
        if c >= self.border_colours || a >= self.border_colours {
            return &[];
        }
        bucket(&self.corner_pairs, c * self.border_colours + a)
    }

    /// Right-column edges whose north and west sides show the given colours
    ///
    /// `west` may be [`WILDCARD`].
    pub fn rhs_edges_with(&self, north: Colour, west: Colour) -> &[usize] {
        let slots = self.interior_colours + 1;
        let Some(west) = self.interior_slot(west) else {
            return &[];
        };
        if usize::from(north) >= self.border_colours {
            return &[];
        }
        bucket(&self.rhs_edges, usize::from(north) * slots + west)
    }

    /// Mid candidates whose north and west sides show the given colours
    ///
    /// Either colour may be [`WILDCARD`].
    pub fn mids_with(&self, north: Colour, west: Colour) -> &[Candidate] {
        let slots = self.interior_colours + 1;
        match (self.interior_slot(north), self.interior_slot(west)) {
            (Some(n), Some(w)) => self
                .mid_pairs
                .get(n * slots + w)
                .map(Vec::as_slice)
                .unwrap_or_default(),
            _ => &[],
        }
    }

    /// Dense slot of an interior colour, the wildcard mapping to the last slot
    fn interior_slot(&self, colour: Colour) -> Option<usize> {
        if colour == WILDCARD {
            Some(self.interior_colours)
        } else if usize::from(colour) < self.interior_colours {
            Some(usize::from(colour))
        } else {
            None
        }
    }
}

fn bucket(index: &[Vec<usize>], key: usize) -> &[usize] {
    index.get(key).map(Vec::as_slice).unwrap_or_default()
}
