//! Plain-text export of placements and index tables
//!
//! Everything is whitespace-separated so it can be consumed by external
//! renderers and block builders without a parser of their own.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::algorithm::backtracker::Placement;
use crate::analysis::indices::CandidateIndices;
use crate::io::configuration::BOARD_SIZE;
use crate::io::error::{Result, WithPath};
use crate::spatial::geometry::Orientation;
use crate::spatial::grid::Cell;
use crate::spatial::tiles::{Category, Colour, GREY, TileCatalog, WILDCARD};

/// Placement as one row per visit followed by the fill-order grid
///
/// Each row holds the visitation index, cell, category, catalog id, input
/// position, orientation and the orientation relative to the input sides.
pub fn format_placement(catalog: &TileCatalog, placement: &Placement) -> String {
    let mut text = String::new();
    let _ = writeln!(
        text,
        "# visit row col category id source orientation input_orientation"
    );

    for (visit, &(cell, placed)) in placement.entries().iter().enumerate() {
        let category = placed.tile.category;
        let id = placed.tile.id;
        let _ = writeln!(
            text,
            "{visit} {} {} {category} {id} {} {} {}",
            cell.row,
            cell.col,
            catalog.source_index(category, id),
            placed.orientation,
            catalog.input_orientation(category, id, placed.orientation)
        );
    }

    let _ = writeln!(text, "# fill order");
    for row in 0..BOARD_SIZE {
        let line: Vec<String> = (0..BOARD_SIZE)
            .map(|col| {
                placement
                    .fill_order()
                    .get(Cell::new(row, col).index())
                    .copied()
                    .flatten()
                    .map_or_else(|| ".".to_string(), |visit| visit.to_string())
            })
            .collect();
        let _ = writeln!(text, "{}", line.join(" "));
    }

    text
}

/// Write a placement to a file
///
/// # Errors
///
/// Returns an error if the file cannot be written
pub fn write_placement(path: &Path, catalog: &TileCatalog, placement: &Placement) -> Result<()> {
    fs::write(path, format_placement(catalog, placement)).with_path(path, "write placement")
}

/// Every tile in every orientation, then every non-empty mid pair bucket
///
/// Grey sides are written as `-` and the wildcard as `*`.
pub fn format_tables(indices: &CandidateIndices) -> String {
    let catalog = indices.catalog();
    let mut text = String::new();

    let _ = writeln!(text, "# category id orientation north east south west");
    for category in Category::ALL {
        for id in 0..catalog.count(category) {
            for orientation in Orientation::ALL {
                let [north, east, south, west] = catalog.colours_at(category, id, orientation);
                let _ = writeln!(
                    text,
                    "{category} {id} {} {} {} {} {}",
                    orientation.index(),
                    colour_label(north),
                    colour_label(east),
                    colour_label(south),
                    colour_label(west)
                );
            }
        }
    }

    let _ = writeln!(text, "# north west count id:orientation...");
    let slots = indices.interior_colours() + 1;
    for north in 0..slots {
        for west in 0..slots {
            let (north, west) = (slot_colour(indices, north), slot_colour(indices, west));
            let candidates = indices.mids_with(north, west);
            if candidates.is_empty() {
                continue;
            }
            let listed: Vec<String> = candidates
                .iter()
                .map(|candidate| format!("{}:{}", candidate.id, candidate.orientation.index()))
                .collect();
            let _ = writeln!(
                text,
                "{} {} {} {}",
                colour_label(north),
                colour_label(west),
                candidates.len(),
                listed.join(" ")
            );
        }
    }

    text
}

/// Write the index tables to a file
///
/// # Errors
///
/// Returns an error if the file cannot be written
pub fn write_tables(path: &Path, indices: &CandidateIndices) -> Result<()> {
    fs::write(path, format_tables(indices)).with_path(path, "write tables")
}

fn colour_label(colour: Colour) -> String {
    match colour {
        GREY => "-".to_string(),
        WILDCARD => "*".to_string(),
        other => other.to_string(),
    }
}

// Allow truncation: slots stop one past the interior colours, well below the reserved values
#[allow(clippy::cast_possible_truncation)]
const fn slot_colour(indices: &CandidateIndices, slot: usize) -> Colour {
    if slot == indices.interior_colours() {
        WILDCARD
    } else {
        slot as Colour
    }
}
