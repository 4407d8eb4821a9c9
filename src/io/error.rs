//! Error types and context management for puzzle loading, search and propagation

use std::fmt;
use std::path::PathBuf;

use crate::spatial::tiles::Category;

/// Main error type for all solver operations
#[derive(Debug)]
pub enum PuzzleError {
    /// Failed to read the pieces file from the filesystem
    PiecesLoad {
        /// Path to the pieces file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A line of the pieces file could not be parsed
    MalformedPiece {
        /// One-based line number in the source text
        line: usize,
        /// Description of what's wrong with the line
        reason: String,
    },

    /// The parsed tiles do not form a valid 16x16 tile set
    ///
    /// Occurs when:
    /// - Category counts differ from 4 corners, 56 edges and 196 mids
    /// - A corner's grey sides are not adjacent
    /// - A colour appears on both border-facing and interior-facing sides
    InvalidCatalog {
        /// Description of the inconsistency
        reason: String,
    },

    /// Solver parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A visitation order is not a valid placement path
    InvalidPath {
        /// Description of the problem with the permutation
        reason: String,
    },

    /// A tile was fixed into a cell it can never occupy
    InvalidPlacement {
        /// Description of the mismatch
        reason: String,
    },

    /// A tile was fixed while another cell already requires it
    Contradiction {
        /// Category of the contested tile
        category: Category,
        /// Id of the contested tile within its category
        id: usize,
        /// Row of the cell that already requires the tile
        row: usize,
        /// Column of the cell that already requires the tile
        col: usize,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PiecesLoad { path, source } => {
                write!(f, "Failed to load pieces '{}': {source}", path.display())
            }
            Self::MalformedPiece { line, reason } => {
                write!(f, "Malformed piece on line {line}: {reason}")
            }
            Self::InvalidCatalog { reason } => {
                write!(f, "Invalid tile catalog: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidPath { reason } => {
                write!(f, "Invalid placement path: {reason}")
            }
            Self::InvalidPlacement { reason } => {
                write!(f, "Invalid placement: {reason}")
            }
            Self::Contradiction {
                category,
                id,
                row,
                col,
            } => {
                write!(
                    f,
                    "Contradiction: {category} {id} is already required at ({row},{col})"
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for PuzzleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::PiecesLoad { source, .. } | Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, PuzzleError>;

/// Attaches a path and operation to I/O failures
pub trait WithPath<T> {
    /// Wrap an I/O error as a [`PuzzleError::FileSystem`]
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path and operation applied
    fn with_path(self, path: impl Into<PathBuf>, operation: &'static str) -> Result<T>;
}

impl<T> WithPath<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: impl Into<PathBuf>, operation: &'static str) -> Result<T> {
        self.map_err(|source| PuzzleError::FileSystem {
            path: path.into(),
            operation,
            source,
        })
    }
}

impl From<std::io::Error> for PuzzleError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> PuzzleError {
    PuzzleError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid catalog error
pub fn invalid_catalog(reason: &impl ToString) -> PuzzleError {
    PuzzleError::InvalidCatalog {
        reason: reason.to_string(),
    }
}

/// Create an invalid path error
pub fn invalid_path(reason: &impl ToString) -> PuzzleError {
    PuzzleError::InvalidPath {
        reason: reason.to_string(),
    }
}

/// Create an invalid placement error
pub fn invalid_placement(reason: &impl ToString) -> PuzzleError {
    PuzzleError::InvalidPlacement {
        reason: reason.to_string(),
    }
}
