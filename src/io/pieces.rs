//! Reading and writing piece files
//!
//! One tile per line as four whitespace-separated colour codes in North,
//! East, South, West order. Blank lines are skipped.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::io::error::{PuzzleError, Result, WithPath};
use crate::spatial::tiles::RawTile;

/// Parse piece text into raw tiles
///
/// # Errors
///
/// Returns [`PuzzleError::MalformedPiece`] for the first line that does not
/// hold exactly four non-negative integers
pub fn parse_pieces(text: &str) -> Result<Vec<RawTile>> {
    let mut tiles = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let mut sides = [0_u32; 4];
        let mut fields = line.split_whitespace();
        for side in &mut sides {
            let field = fields.next().ok_or_else(|| PuzzleError::MalformedPiece {
                line: line_number,
                reason: "expected four colours".to_string(),
            })?;
            *side = field
                .parse()
                .map_err(|error| PuzzleError::MalformedPiece {
                    line: line_number,
                    reason: format!("'{field}' is not a colour code: {error}"),
                })?;
        }
        if let Some(extra) = fields.next() {
            return Err(PuzzleError::MalformedPiece {
                line: line_number,
                reason: format!("unexpected field '{extra}' after four colours"),
            });
        }

        tiles.push(RawTile::new(sides));
    }

    log::debug!("Parsed {} pieces", tiles.len());
    Ok(tiles)
}

/// Load raw tiles from a piece file
///
/// # Errors
///
/// Returns [`PuzzleError::PiecesLoad`] if the file cannot be read, or a
/// parse error for malformed content
pub fn load_pieces(path: &Path) -> Result<Vec<RawTile>> {
    let text = fs::read_to_string(path).map_err(|source| PuzzleError::PiecesLoad {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Loading pieces from {}", path.display());
    parse_pieces(&text)
}

/// Format raw tiles in piece file layout
pub fn format_pieces(tiles: &[RawTile]) -> String {
    let mut text = String::with_capacity(tiles.len() * 12);
    for tile in tiles {
        let [north, east, south, west] = tile.sides;
        let _ = writeln!(text, "{north} {east} {south} {west}");
    }
    text
}

/// Write raw tiles to a piece file
///
/// # Errors
///
/// Returns [`PuzzleError::FileSystem`] if the file cannot be written
pub fn write_pieces(path: &Path, tiles: &[RawTile]) -> Result<()> {
    fs::write(path, format_pieces(tiles)).with_path(path, "write pieces")
}
