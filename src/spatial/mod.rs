//! Spatial data structures and board geometry
//!
//! This module contains spatial-related functionality including:
//! - Orientations, compass directions and side mapping
//! - Board cells and their categories
//! - Tile catalogs and visitation paths

/// Seeded generation of puzzles with a planted solution
pub mod generator;
/// Orientations and compass directions
pub mod geometry;
/// Board cells and position-derived properties
pub mod grid;
/// Placement paths and named visitation orders
pub mod path;
/// Tile classification and the tile catalog
pub mod tiles;
