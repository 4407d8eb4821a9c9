/// Command-line interface and subcommand orchestration
pub mod cli;
/// Board constants, clues and defaults
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// Placement and table export
pub mod export;
/// Piece file reading and writing
pub mod pieces;
/// Terminal progress display
pub mod progress;
/// Text rendering of boards
pub mod visualization;
