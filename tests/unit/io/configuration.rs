//! Tests for board dimensions, search constants and published clues

#[cfg(test)]
mod tests {
    use eternity_solver::io::configuration::{
        BOARD_SIZE, CLOCK_CHECK_MASK, DEFAULT_BORDER_COLOURS, DEFAULT_INTERIOR_COLOURS,
        DEFAULT_SEED, KNOWN_CLUES, LAST_INDEX, MIN_SEARCH_DEPTH, NUM_CELLS, NUM_CORNERS,
        NUM_EDGES, NUM_MIDS, NUM_TILES,
    };
    use eternity_solver::spatial::geometry::Orientation;
    use std::collections::HashSet;

    // Tests category counts add up to the board
    // Verified by counting the corners as edges
    #[test]
    fn test_board_dimensions() {
        assert_eq!(BOARD_SIZE, 16);
        assert_eq!(LAST_INDEX, 15);
        assert_eq!((NUM_CORNERS, NUM_EDGES, NUM_MIDS), (4, 56, 196));
        assert_eq!(NUM_TILES, NUM_CELLS);
    }

    // Tests search constants
    // Verified by allowing single-cell searches
    #[test]
    fn test_search_constants() {
        assert_eq!(MIN_SEARCH_DEPTH, 2);
        assert_eq!(CLOCK_CHECK_MASK.count_ones(), 16);
        assert_eq!(DEFAULT_SEED, 42);
        assert_eq!((DEFAULT_BORDER_COLOURS, DEFAULT_INTERIOR_COLOURS), (5, 17));
    }

    // Tests the clues sit on distinct interior cells with distinct tiles
    // Verified by moving a clue onto the border
    #[test]
    fn test_known_clues() {
        let cells: HashSet<(usize, usize)> =
            KNOWN_CLUES.iter().map(|clue| (clue.row, clue.col)).collect();
        let ids: HashSet<usize> = KNOWN_CLUES.iter().map(|clue| clue.mid_id).collect();

        assert_eq!(cells.len(), 5);
        assert_eq!(ids.len(), 5);
        assert!(cells.contains(&(8, 7)));
        for clue in KNOWN_CLUES {
            assert!((1..LAST_INDEX).contains(&clue.row));
            assert!((1..LAST_INDEX).contains(&clue.col));
            assert!(clue.mid_id < NUM_MIDS);
        }
        assert_eq!(KNOWN_CLUES[0].orientation, Orientation::Half);
    }
}
