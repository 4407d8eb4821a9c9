//! Tests for board cells and position-derived properties

#[cfg(test)]
mod tests {
    use eternity_solver::spatial::geometry::{Compass, Orientation};
    use eternity_solver::spatial::grid::{Cell, cells, interior_cells};
    use eternity_solver::spatial::tiles::Category;

    // Tests the four corners get their fixed orientations
    // Verified by swapping the top-right and bottom-left orientations
    #[test]
    fn test_corner_orientations() {
        let expected = [
            (Cell::new(0, 0), Orientation::Clockwise90),
            (Cell::new(0, 15), Orientation::Half),
            (Cell::new(15, 0), Orientation::Base),
            (Cell::new(15, 15), Orientation::Anticlockwise90),
        ];
        for (cell, orientation) in expected {
            assert_eq!(cell.category(), Category::Corner);
            assert_eq!(cell.border_orientation(), Some(orientation), "{cell}");
        }
    }

    // Tests edge cells take the orientation of their side and mids have none
    // Verified by giving the left column the right column's orientation
    #[test]
    fn test_edge_and_mid_orientations() {
        assert_eq!(Cell::new(0, 7).border_orientation(), Some(Orientation::Half));
        assert_eq!(Cell::new(15, 7).border_orientation(), Some(Orientation::Base));
        assert_eq!(Cell::new(7, 0).border_orientation(), Some(Orientation::Clockwise90));
        assert_eq!(Cell::new(7, 15).border_orientation(), Some(Orientation::Anticlockwise90));
        assert_eq!(Cell::new(7, 0).category(), Category::Edge);
        assert_eq!(Cell::new(7, 7).category(), Category::Mid);
        assert_eq!(Cell::new(7, 7).border_orientation(), None);
    }

    // Tests category counts over the whole board
    // Verified by treating row 1 as border
    #[test]
    fn test_category_counts() {
        let count = |category| cells().filter(|cell| cell.category() == category).count();
        assert_eq!(count(Category::Corner), 4);
        assert_eq!(count(Category::Edge), 56);
        assert_eq!(count(Category::Mid), 196);
        assert_eq!(interior_cells().count(), 196);
    }

    // Tests neighbours stop at the board edge
    // Verified by removing the bounds check on East
    #[test]
    fn test_neighbours_at_board_edge() {
        let corner = Cell::new(0, 15);
        assert_eq!(corner.neighbour(Compass::North), None);
        assert_eq!(corner.neighbour(Compass::East), None);
        assert_eq!(corner.neighbour(Compass::South), Some(Cell::new(1, 15)));
        assert_eq!(corner.neighbour(Compass::West), Some(Cell::new(0, 14)));
        assert!(!corner.has_neighbour(Compass::North));
    }

    // Tests border sides are exactly those joining two ring cells
    // Verified by returning is_border alone
    #[test]
    fn test_is_border_side() {
        assert!(Cell::new(0, 3).is_border_side(Compass::East));
        assert!(!Cell::new(0, 3).is_border_side(Compass::South));
        assert!(Cell::new(14, 0).is_border_side(Compass::South));
        assert!(!Cell::new(5, 5).is_border_side(Compass::North));
        assert!(!Cell::new(0, 0).is_border_side(Compass::North));
    }

    // Tests row-major index round trip and off-board rejection
    // Verified by swapping row and col in from_index
    #[test]
    fn test_index_conversion() {
        let cell = Cell::new(3, 9);
        assert_eq!(cell.index(), 3 * 16 + 9);
        assert_eq!(Cell::from_index(cell.index()), Some(cell));
        assert_eq!(Cell::from_index(256), None);
        assert!(!Cell::new(16, 0).is_on_board());
        assert_eq!(cells().next(), Some(Cell::new(0, 0)));
    }
}
