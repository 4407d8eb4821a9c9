//! Colour sets backing the shared-side feasibility grids

use bitvec::prelude::*;
use std::fmt;

use crate::spatial::tiles::Colour;

/// Fixed-size bitset of dense colours that may appear on a shared side
///
/// Provides O(1) membership testing and in-place intersection. Colours
/// outside the capacity (grey, wildcard) are never members.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColourSet {
    bits: BitVec,
}

impl ColourSet {
    /// Create a set with no colours present
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
        }
    }

    /// Create a set containing every colour below `capacity`
    pub fn all(capacity: usize) -> Self {
        Self {
            bits: bitvec![1; capacity],
        }
    }

    /// Insert a colour, ignoring colours beyond the capacity
    pub fn insert(&mut self, colour: Colour) {
        let index = usize::from(colour);
        if index < self.bits.len() {
            self.bits.set(index, true);
        }
    }

    /// Test colour membership
    pub fn contains(&self, colour: Colour) -> bool {
        self.bits.get(usize::from(colour)).as_deref() == Some(&true)
    }

    /// Intersect this set with another in-place
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Create a new set containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Test if no colours are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count colours in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Build a set from any colours, ignoring those beyond the capacity
    pub fn from_colours(colours: impl IntoIterator<Item = Colour>, capacity: usize) -> Self {
        let mut set = Self::new(capacity);
        for colour in colours {
            set.insert(colour);
        }
        set
    }

    /// Extract all colours in ascending order
    pub fn to_vec(&self) -> Vec<Colour> {
        self.bits.iter_ones().map(|index| index as Colour).collect()
    }
}

impl fmt::Display for ColourSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ColourSet({} colours: {:?})", self.count(), self.to_vec())
    }
}
