//! Tests for the constraint board: fixing tiles, elimination cascades and recalculation

#[cfg(test)]
mod tests {
    use eternity_solver::PuzzleError;
    use eternity_solver::algorithm::propagation::{
        Constraints, ConstraintsScore, EliminationQueue, PendingElimination,
    };
    use eternity_solver::spatial::generator::PlantedPuzzle;
    use eternity_solver::spatial::geometry::Orientation;
    use eternity_solver::spatial::grid::{Cell, cells};
    use eternity_solver::spatial::tiles::{Category, PlacedTile, TileCatalog, TileRef};

    fn planted(seed: u64) -> (PlantedPuzzle, TileCatalog) {
        let puzzle = PlantedPuzzle::generate(seed, 5, 17).unwrap();
        let catalog = TileCatalog::from_raw(&puzzle.tiles).unwrap();
        (puzzle, catalog)
    }

    fn fix(constraints: &mut Constraints<'_>, placed: PlacedTile, cell: Cell) {
        constraints
            .fix_tile(
                placed.tile.category,
                placed.tile.id,
                placed.orientation,
                cell.row,
                cell.col,
            )
            .unwrap();
    }

    // Tests duplicate eliminations are queued once, in discovery order
    // Verified by removing the contains check in push
    #[test]
    fn test_elimination_queue_deduplication() {
        let mut queue = EliminationQueue::new();
        let first = PendingElimination {
            tile: TileRef::new(Category::Mid, 3),
            keep: Cell::new(4, 4),
        };
        let second = PendingElimination {
            tile: TileRef::new(Category::Mid, 3),
            keep: Cell::new(5, 4),
        };

        queue.push(first);
        queue.push(second);
        queue.push(first);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.take_next(), Some(first));

        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.take_next(), None);
    }

    // Tests score value and display format
    // Verified by adding the counts instead of multiplying
    #[test]
    fn test_score_value() {
        let score = ConstraintsScore {
            options: 2,
            colour_options: 3,
            cell_slack: 4,
            solvable: true,
        };
        assert_eq!(score.value(), 24);
        assert_eq!(score.to_string(), "Score(24  2  3  4  true)");
    }

    // Tests a fresh board holds every tile in every cell of its category
    // Verified by counting each orientation as a separate cell
    #[test]
    fn test_fresh_board() {
        let (_, catalog) = planted(1);
        let constraints = Constraints::new(&catalog);

        assert!(constraints.is_solvable());
        assert_eq!(constraints.occupancy(Category::Corner, 0), 4);
        assert_eq!(constraints.occupancy(Category::Edge, 10), 56);
        assert_eq!(constraints.occupancy(Category::Mid, 100), 196);
        assert_eq!(constraints.occupancy(Category::Mid, 500), 0);
        assert_eq!(constraints.cell(7, 7).unwrap().num_options(), 784);
        assert_eq!(constraints.cell(0, 7).unwrap().num_options(), 56);
        assert!(constraints.horizontal(0, 15).is_none());
        assert!(constraints.vertical(15, 0).is_none());
        assert!(constraints.solved_cells().is_empty());
    }

    // Tests fixes off the board, in the wrong category, orientation or id range are rejected
    // Verified by skipping the border orientation check
    #[test]
    fn test_fix_tile_rejects_invalid_placements() {
        let (_, catalog) = planted(2);
        let mut constraints = Constraints::new(&catalog);

        let attempts = [
            (Category::Mid, 0, Orientation::Base, 16, 3),
            (Category::Edge, 0, Orientation::Half, 5, 5),
            (Category::Edge, 0, Orientation::Base, 0, 5),
            (Category::Corner, 4, Orientation::Clockwise90, 0, 0),
        ];
        for (category, id, orientation, row, col) in attempts {
            let result = constraints.fix_tile(category, id, orientation, row, col);
            assert!(
                matches!(result, Err(PuzzleError::InvalidPlacement { .. })),
                "{category} {id} at ({row},{col}) was accepted"
            );
        }
        assert!(constraints.is_solvable());
    }

    // Tests fixing three corners collapses the fourth cell by elimination
    // Verified by not queueing collapsed cells for elimination
    #[test]
    fn test_fix_tile_cascades() {
        let (_, catalog) = planted(3);
        let mut constraints = Constraints::new(&catalog);

        fix(
            &mut constraints,
            PlacedTile::new(Category::Corner, 0, Orientation::Clockwise90),
            Cell::new(0, 0),
        );
        fix(
            &mut constraints,
            PlacedTile::new(Category::Corner, 1, Orientation::Half),
            Cell::new(0, 15),
        );
        fix(
            &mut constraints,
            PlacedTile::new(Category::Corner, 2, Orientation::Base),
            Cell::new(15, 0),
        );

        assert_eq!(
            constraints.cell(15, 15).unwrap().solved(),
            Some(PlacedTile::new(Category::Corner, 3, Orientation::Anticlockwise90))
        );
        let solved: Vec<Cell> = constraints.solved_cells().iter().map(|(cell, _)| *cell).collect();
        assert_eq!(
            solved,
            vec![Cell::new(0, 0), Cell::new(0, 15), Cell::new(15, 0), Cell::new(15, 15)]
        );
        assert!(constraints.is_solvable());
    }

    // Tests fixing a tile already required elsewhere is a contradiction at that cell
    // Verified by skipping solved cells during elimination
    #[test]
    fn test_fix_tile_contradiction() {
        let (_, catalog) = planted(4);
        let mut constraints = Constraints::new(&catalog);

        fix(
            &mut constraints,
            PlacedTile::new(Category::Corner, 0, Orientation::Clockwise90),
            Cell::new(0, 0),
        );
        let result = constraints.fix_tile(Category::Corner, 0, Orientation::Half, 0, 15);

        match result {
            Err(PuzzleError::Contradiction {
                category,
                id,
                row,
                col,
            }) => {
                assert_eq!((category, id, row, col), (Category::Corner, 0, 0, 0));
            }
            other => panic!("expected a contradiction, got {other:?}"),
        }
    }

    // Tests refixing the same pair is a no-op and fixing a pair the cell lost proves infeasibility
    // Verified by leaving solvable set when the cell does not admit the pair
    #[test]
    fn test_fix_tile_not_admitted() {
        let (_, catalog) = planted(5);
        let mut constraints = Constraints::new(&catalog);
        let first = PlacedTile::new(Category::Mid, 1, Orientation::Base);

        fix(&mut constraints, first, Cell::new(5, 5));
        fix(&mut constraints, first, Cell::new(5, 5));
        assert!(constraints.is_solvable());

        fix(
            &mut constraints,
            PlacedTile::new(Category::Mid, 2, Orientation::Half),
            Cell::new(5, 5),
        );
        assert!(!constraints.is_solvable());
        assert!(!constraints.recalculate_all());
    }

    // Tests recalculation never removes the planted solution and keeps the board feasible
    // Verified by intersecting colour sets with the wrong neighbour side
    #[test]
    fn test_recalculate_keeps_planted_solution() {
        let (puzzle, catalog) = planted(6);
        let mut constraints = Constraints::new(&catalog);

        for cell in [Cell::new(0, 0), Cell::new(8, 7), Cell::new(2, 13)] {
            fix(&mut constraints, puzzle.solution_at(cell).unwrap(), cell);
        }
        assert!(constraints.recalculate_all());
        assert!(constraints.recalculate_all());

        for cell in cells() {
            let planted = puzzle.solution_at(cell).unwrap();
            let constraint = constraints.cell(cell.row, cell.col).unwrap();
            assert!(
                constraint.admits(planted.tile.category, planted.tile.id, planted.orientation),
                "planted {} lost at {cell}",
                planted.tile
            );
        }
        let corner = puzzle.solution_at(Cell::new(0, 0)).unwrap().tile.id;
        assert_eq!(constraints.occupancy(Category::Corner, corner), 1);
    }

    // Tests every score component is non-increasing as fixes and recalculations accumulate
    // Verified by resetting occupancy counts to the catalog size on recalculation
    #[test]
    fn test_score_is_monotone() {
        let (puzzle, catalog) = planted(7);
        let mut constraints = Constraints::new(&catalog);
        let mut previous = constraints.score();

        for cell in [Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 1), Cell::new(8, 8)] {
            fix(&mut constraints, puzzle.solution_at(cell).unwrap(), cell);
            assert!(constraints.recalculate_all());

            let score = constraints.score();
            assert!(score.options <= previous.options);
            assert!(score.colour_options <= previous.colour_options);
            assert!(score.cell_slack <= previous.cell_slack);
            previous = score;
        }
    }
}
