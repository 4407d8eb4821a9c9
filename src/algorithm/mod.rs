/// Depth-first search along a placement path
pub mod backtracker;
/// Bit sets of colours for shared-side feasibility
pub mod bitset;
/// Per-cell sets of admissible tile placements
pub mod constraint;
/// Task-queue constraint solver and parallel corner trials
pub mod executor;
/// Board-wide constraint propagation to a fixed point
pub mod propagation;
/// Border-only search over interchangeable edge classes
pub mod swappable;
