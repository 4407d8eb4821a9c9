//! Text rendering of constraint boards and placements for logs

use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::algorithm::backtracker::Placement;
use crate::algorithm::constraint::CellConstraint;
use crate::algorithm::propagation::Constraints;
use crate::io::configuration::{BOARD_SIZE, LAST_INDEX};
use crate::spatial::grid::Cell;

const BLANK: &str = "     |";

/// Grid of cell states, three text lines per board row
///
/// The first line names the variant (`FT` fixed tile, `FO` fixed orientation,
/// `OPT` options, blank when solved), the second the number of options and the
/// third the number of distinct ids or orientations left.
pub fn render_cell_grid(constraints: &Constraints<'_>) -> String {
    let mut out = String::from("Cell Grid:");

    for row in 0..BOARD_SIZE {
        push_rule(&mut out);

        out.push_str("\n|");
        for col in 0..BOARD_SIZE {
            out.push_str(match constraints.cell(row, col) {
                Some(CellConstraint::FixedTileId { .. }) => "  FT |",
                Some(CellConstraint::FixedOrientation { .. }) => "  FO |",
                Some(CellConstraint::Options { .. }) => " OPT |",
                Some(CellConstraint::Solved { .. }) | None => BLANK,
            });
        }

        out.push_str("\n|");
        for col in 0..BOARD_SIZE {
            match constraints.cell(row, col) {
                Some(CellConstraint::Options { ids, .. }) => push_count(&mut out, ids.len()),
                _ => out.push_str(BLANK),
            }
        }

        out.push_str("\n|");
        for col in 0..BOARD_SIZE {
            match constraints.cell(row, col) {
                Some(CellConstraint::FixedTileId { orientations, .. }) => {
                    push_count(&mut out, orientations.len());
                }
                Some(CellConstraint::FixedOrientation { ids, .. }) => {
                    push_count(&mut out, ids.len());
                }
                Some(CellConstraint::Options { ids, .. }) => {
                    push_count(&mut out, ids.iter().collect::<BTreeSet<_>>().len());
                }
                Some(CellConstraint::Solved { .. }) | None => out.push_str(BLANK),
            }
        }
    }
    push_rule(&mut out);

    out
}

/// Grid of feasible colour counts on every shared side
///
/// A side with a single feasible colour is left blank.
pub fn render_edge_grid(constraints: &Constraints<'_>) -> String {
    let mut out = String::from("Edge Grid:");
    push_rule(&mut out);

    for row in 0..BOARD_SIZE {
        push_blank_row(&mut out);

        out.push_str("\n|");
        for col in 0..LAST_INDEX {
            let count = constraints.horizontal(row, col).map_or(0, |set| set.count());
            if count == 1 {
                out.push_str("      ");
            } else {
                let _ = write!(out, "    {count:>2}");
            }
        }
        out.push_str(BLANK);

        push_blank_row(&mut out);

        if row != LAST_INDEX {
            out.push_str("\n+");
            for col in 0..BOARD_SIZE {
                let count = constraints.vertical(row, col).map_or(0, |set| set.count());
                match count {
                    1 => out.push_str("-   -+"),
                    2..10 => {
                        let _ = write!(out, "- {count} -+");
                    }
                    _ => {
                        let _ = write!(out, "- {count:>2}-+");
                    }
                }
            }
        }
    }
    push_rule(&mut out);

    out
}

/// Board of placed ids and orientations, `.` for empty cells
pub fn render_placement(placement: &Placement) -> String {
    let mut out = String::new();
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            match placement.at(Cell::new(row, col)) {
                Some(placed) => {
                    let _ = write!(out, " {:>3}/{}", placed.tile.id, placed.orientation.index());
                }
                None => out.push_str("     ."),
            }
        }
        out.push('\n');
    }
    out
}

fn push_rule(out: &mut String) {
    out.push_str("\n+");
    for _ in 0..BOARD_SIZE {
        out.push_str("-----+");
    }
}

fn push_blank_row(out: &mut String) {
    out.push_str("\n|");
    for _ in 0..BOARD_SIZE {
        out.push_str(BLANK);
    }
}

fn push_count(out: &mut String, count: usize) {
    let _ = write!(out, " {count:>3} |");
}
