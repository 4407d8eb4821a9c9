//! Distribution summaries of the candidate indices
//!
//! These numbers explain why some search orders are faster than others: how
//! many mids each (north, west) pair admits, how evenly interior colours are
//! spread along the border, and how many edges are interchangeable.

use std::fmt;

use ndarray::Array2;

use crate::analysis::indices::{BorderSide, CandidateIndices};
use crate::spatial::tiles::{Category, Colour};

/// Summary of a catalog's candidate index distributions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexStatistics {
    /// Number of mid candidates for each concrete (north, west) colour pair
    pub pair_counts: Array2<usize>,
    /// Number of concrete pairs admitting each candidate count
    pub pair_histogram: Vec<usize>,
    /// Number of edges showing each interior colour towards the board
    pub edge_interior_colours: Vec<usize>,
    /// Number of edge classes of each size
    pub edge_class_histogram: Vec<usize>,
    /// Corner and edge counts per border colour, clockwise side then anticlockwise
    pub border_counts: Vec<[usize; 4]>,
}

impl IndexStatistics {
    /// Gather every summary from built indices
    pub fn gather(indices: &CandidateIndices) -> Self {
        let catalog = indices.catalog();
        let interior = indices.interior_colours();

        let mut pair_counts = Array2::zeros((interior, interior));
        for ((north, west), count) in pair_counts.indexed_iter_mut() {
            *count = indices.mids_with(to_colour(north), to_colour(west)).len();
        }
        let pair_histogram = histogram(pair_counts.iter().copied());

        let mut edge_interior_colours = vec![0; interior];
        for id in 0..catalog.count(Category::Edge) {
            let colour = usize::from(catalog.side(Category::Edge, id, 0));
            if let Some(count) = edge_interior_colours.get_mut(colour) {
                *count += 1;
            }
        }

        let edge_class_histogram = histogram(indices.edge_classes().map(<[usize]>::len));

        let border_counts = (0..indices.border_colours())
            .map(|colour| {
                let colour = to_colour(colour);
                [
                    indices.corners_with(BorderSide::Clockwise, colour).len(),
                    indices.corners_with(BorderSide::Anticlockwise, colour).len(),
                    indices.edges_with(BorderSide::Clockwise, colour).len(),
                    indices.edges_with(BorderSide::Anticlockwise, colour).len(),
                ]
            })
            .collect();

        Self {
            pair_counts,
            pair_histogram,
            edge_interior_colours,
            edge_class_histogram,
            border_counts,
        }
    }

    /// Candidates summed over every concrete pair, four per mid
    pub fn total_pair_candidates(&self) -> usize {
        self.pair_counts.sum()
    }

    /// Edges beyond the first of their class
    pub fn duplicate_edges(&self) -> usize {
        self.edge_class_histogram
            .iter()
            .enumerate()
            .map(|(size, classes)| size.saturating_sub(1) * classes)
            .sum()
    }

    /// Number of edge classes
    pub fn edge_classes(&self) -> usize {
        self.edge_class_histogram.iter().sum()
    }
}

impl fmt::Display for IndexStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Border colours (corner cw, corner acw, edge cw, edge acw):")?;
        for (colour, counts) in self.border_counts.iter().enumerate() {
            writeln!(f, "    {colour} -> {counts:?}")?;
        }

        writeln!(
            f,
            "Of the {} possible colour pairs, frequency of number of mids per pair:",
            self.pair_counts.len()
        )?;
        for (count, pairs) in self.pair_histogram.iter().enumerate() {
            writeln!(f, "    {count} -> {pairs}")?;
        }

        writeln!(f, "Edge tiles, distribution of interior colours:")?;
        for (colour, count) in self.edge_interior_colours.iter().enumerate() {
            writeln!(f, "    {colour} -> {count}")?;
        }

        writeln!(
            f,
            "Edge classes: {} ({} interchangeable edges)",
            self.edge_classes(),
            self.duplicate_edges()
        )?;
        for (size, classes) in self.edge_class_histogram.iter().enumerate().skip(1) {
            writeln!(f, "    size {size} -> {classes}")?;
        }
        Ok(())
    }
}

fn histogram(values: impl Iterator<Item = usize>) -> Vec<usize> {
    let mut counts = Vec::new();
    for value in values {
        if value >= counts.len() {
            counts.resize(value + 1, 0);
        }
        if let Some(count) = counts.get_mut(value) {
            *count += 1;
        }
    }
    counts
}

// Allow truncation: dense colour indices stay below the reserved values
#[allow(clippy::cast_possible_truncation)]
const fn to_colour(index: usize) -> Colour {
    index as Colour
}
