//! Tests for the task-queue solver and corner trials

#[cfg(test)]
mod tests {
    use eternity_solver::PuzzleError;
    use eternity_solver::algorithm::executor::{
        ConstraintSolver, Task, TrialOutcome, corner_permutations,
    };
    use eternity_solver::io::configuration::{Clue, KNOWN_CLUES};
    use eternity_solver::spatial::generator::PlantedPuzzle;
    use eternity_solver::spatial::geometry::Orientation;
    use eternity_solver::spatial::grid::{Cell, cells};
    use eternity_solver::spatial::tiles::{Category, PlacedTile, TileCatalog};
    use std::collections::HashSet;

    fn planted_clues(puzzle: &PlantedPuzzle) -> Vec<Clue> {
        KNOWN_CLUES
            .iter()
            .map(|clue| {
                let planted = puzzle.solution_at(Cell::new(clue.row, clue.col)).unwrap();
                Clue {
                    row: clue.row,
                    col: clue.col,
                    mid_id: planted.tile.id,
                    orientation: planted.orientation,
                }
            })
            .collect()
    }

    fn planted_corners(puzzle: &PlantedPuzzle) -> [usize; 3] {
        [Cell::new(0, 0), Cell::new(0, 15), Cell::new(15, 0)]
            .map(|cell| puzzle.solution_at(cell).unwrap().tile.id)
    }

    // Tests every ordered triple of distinct corners appears once
    // Verified by allowing repeated corners in a triple
    #[test]
    fn test_corner_permutations() {
        let permutations = corner_permutations();
        let distinct: HashSet<[usize; 3]> = permutations.iter().copied().collect();

        assert_eq!(permutations.len(), 24);
        assert_eq!(distinct.len(), 24);
        assert!(
            permutations
                .iter()
                .all(|[a, b, c]| a != b && a != c && b != c && *a < 4 && *b < 4 && *c < 4)
        );
    }

    // Tests task display names
    // Verified by printing the debug form
    #[test]
    fn test_task_display() {
        let task = Task::FixTile {
            placed: PlacedTile::new(Category::Mid, 3, Orientation::Half),
            cell: Cell::new(8, 7),
        };
        assert_eq!(task.to_string(), "Fix tile mid 3 HALF at (8,7)");
        assert_eq!(Task::FixClue(2).to_string(), "Fix clue 2");
        assert_eq!(Task::RecalculateAll.to_string(), "Recalculate all");
    }

    // Tests a trial with planted clues and corners stays feasible and keeps the planted tiles
    // Verified by fixing the top-right corner at orientation Base
    #[test]
    fn test_trial_with_planted_clues() {
        let puzzle = PlantedPuzzle::generate(12, 5, 17).unwrap();
        let catalog = TileCatalog::from_raw(&puzzle.tiles).unwrap();
        let solver = ConstraintSolver::new(&catalog, planted_clues(&puzzle));

        let constraints = solver.solve_trial(Some(planted_corners(&puzzle))).unwrap();

        assert!(constraints.is_solvable());
        for cell in cells() {
            let planted = puzzle.solution_at(cell).unwrap();
            assert!(constraints.cell(cell.row, cell.col).unwrap().admits(
                planted.tile.category,
                planted.tile.id,
                planted.orientation
            ));
        }
        let centre = constraints.cell(8, 7).unwrap().solved();
        assert_eq!(centre, puzzle.solution_at(Cell::new(8, 7)));
        assert!(constraints.solved_cells().len() >= 9);
    }

    // Tests the trial loop stops at a fixed point
    // Verified by requeueing recalculation when the score is unchanged
    #[test]
    fn test_trial_reaches_fixed_point() {
        let puzzle = PlantedPuzzle::generate(13, 5, 17).unwrap();
        let catalog = TileCatalog::from_raw(&puzzle.tiles).unwrap();
        let solver = ConstraintSolver::new(&catalog, Vec::new());

        let mut constraints = solver.solve_trial(None).unwrap();
        let settled = constraints.score();
        assert!(constraints.recalculate_all());
        assert_eq!(constraints.score(), settled);
    }

    // Tests clues naming missing tiles abort every corner trial
    // Verified by skipping clues that fail to resolve
    #[test]
    fn test_invalid_clue_aborts_trials() {
        let puzzle = PlantedPuzzle::generate(14, 5, 17).unwrap();
        let catalog = TileCatalog::from_raw(&puzzle.tiles).unwrap();
        let clue = Clue {
            row: 8,
            col: 7,
            mid_id: 196,
            orientation: Orientation::Base,
        };
        let solver = ConstraintSolver::new(&catalog, vec![clue]);

        assert!(matches!(
            solver.solve_trial(None),
            Err(PuzzleError::InvalidPlacement { .. })
        ));
        let results = solver.solve_all_corner_permutations();
        assert_eq!(results.len(), 24);
        assert!(
            results
                .iter()
                .all(|result| matches!(result.outcome, TrialOutcome::Aborted(_)))
        );
    }

    // Tests extra fixes that reuse a fixed corner abort with a contradiction
    // Verified by dropping extra fixes from the task queue
    #[test]
    fn test_extra_fix_contradiction() {
        let puzzle = PlantedPuzzle::generate(15, 5, 17).unwrap();
        let catalog = TileCatalog::from_raw(&puzzle.tiles).unwrap();
        let corners = planted_corners(&puzzle);
        let reused = PlacedTile::new(Category::Corner, corners[0], Orientation::Anticlockwise90);
        let solver = ConstraintSolver::new(&catalog, Vec::new())
            .with_extra_fixes(vec![(Cell::new(15, 15), reused)]);

        assert!(matches!(
            solver.solve_trial(Some(corners)),
            Err(PuzzleError::Contradiction { .. })
        ));
        assert!(solver.solve_trial(None).is_ok());
    }
}
