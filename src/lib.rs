//! Backtracking and constraint propagation solvers for 16x16 edge-matching tile puzzles
//!
//! Raw tiles are classified, rotated into canonical form and indexed by the
//! colours a cell can require. Two engines build on the indices: a depth-first
//! search along a pluggable visitation order, and a propagation solver that
//! narrows per-cell options and shared-side colours to a fixed point.

#![forbid(unsafe_code)]

/// Search engines, per-cell constraints and the propagation solver
pub mod algorithm;
/// Candidate indices and their distribution statistics
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Board geometry, tiles, visitation paths and puzzle generation
pub mod spatial;

pub use io::error::{PuzzleError, Result};
