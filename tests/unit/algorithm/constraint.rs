//! Tests for per-cell constraint narrowing

#[cfg(test)]
mod tests {
    use eternity_solver::algorithm::constraint::{CellConstraint, Elimination};
    use eternity_solver::spatial::generator::PlantedPuzzle;
    use eternity_solver::spatial::geometry::{Compass, Orientation};
    use eternity_solver::spatial::tiles::{Category, PlacedTile, TileCatalog};

    fn options(pairs: &[(usize, Orientation)]) -> CellConstraint {
        CellConstraint::Options {
            category: Category::Mid,
            ids: pairs.iter().map(|&(id, _)| id).collect(),
            orientations: pairs.iter().map(|&(_, orientation)| orientation).collect(),
        }
    }

    // Tests fresh interior and border constraints hold every option
    // Verified by generating one orientation per id in all_options
    #[test]
    fn test_initial_constraints() {
        let interior = CellConstraint::all_options(Category::Mid, 196);
        assert_eq!(interior.len(), 784);
        assert!(interior.admits(Category::Mid, 195, Orientation::Clockwise90));
        assert!(!interior.admits(Category::Edge, 0, Orientation::Base));

        let border = CellConstraint::all_ids(Category::Edge, 56, Orientation::Half);
        assert_eq!(border.num_options(), 56);
        assert!(!border.admits(Category::Edge, 3, Orientation::Base));
    }

    // Tests elimination drops every orientation of the tile
    // Verified by removing only the first matching option
    #[test]
    fn test_eliminate_options() {
        let mut cell = options(&[
            (1, Orientation::Base),
            (1, Orientation::Half),
            (2, Orientation::Base),
        ]);

        assert_eq!(cell.eliminate(Category::Mid, 1), Elimination::Reduced);
        assert_eq!(cell.options().collect::<Vec<_>>(), vec![(2, Orientation::Base)]);
        assert_eq!(cell.eliminate(Category::Mid, 7), Elimination::Unaffected);
        assert_eq!(cell.eliminate(Category::Edge, 2), Elimination::Unaffected);
    }

    // Tests removing the only id of a fixed or solved cell is a conflict
    // Verified by treating FixedTileId like Options in eliminate
    #[test]
    fn test_eliminate_conflict() {
        let mut fixed = CellConstraint::FixedTileId {
            category: Category::Mid,
            id: 4,
            orientations: vec![Orientation::Base, Orientation::Half],
        };
        assert_eq!(fixed.eliminate(Category::Mid, 4), Elimination::Conflict);

        let mut solved = CellConstraint::Solved {
            category: Category::Corner,
            id: 2,
            orientation: Orientation::Clockwise90,
        };
        assert_eq!(solved.eliminate(Category::Corner, 2), Elimination::Conflict);
        assert_eq!(solved.eliminate(Category::Corner, 1), Elimination::Unaffected);
    }

    // Tests normalize walks Options to FixedTileId to Solved and reports new ids once
    // Verified by always returning the single id from normalize
    #[test]
    fn test_normalize_progression() {
        let mut cell = options(&[(5, Orientation::Base), (5, Orientation::Half)]);
        assert_eq!(cell.normalize(), Some(5));
        assert!(matches!(cell, CellConstraint::FixedTileId { id: 5, .. }));

        cell.retain(|_, orientation| orientation == Orientation::Half);
        assert_eq!(cell.normalize(), None);
        assert_eq!(
            cell.solved(),
            Some(PlacedTile::new(Category::Mid, 5, Orientation::Half))
        );
        assert_eq!(cell.num_options(), 0);
        assert_eq!(cell.len(), 1);
    }

    // Tests a shared orientation narrows Options to FixedOrientation
    // Verified by dropping the single-orientation branch
    #[test]
    fn test_normalize_fixed_orientation() {
        let mut cell = options(&[(1, Orientation::Base), (3, Orientation::Base)]);
        assert_eq!(cell.normalize(), None);
        assert!(matches!(
            cell,
            CellConstraint::FixedOrientation {
                orientation: Orientation::Base,
                ..
            }
        ));

        cell.retain(|id, _| id == 3);
        assert_eq!(cell.normalize(), Some(3));
        assert!(cell.solved().is_some());
    }

    // Tests retain leaves solved cells and reports whether anything was dropped
    // Verified by applying the predicate to solved cells
    #[test]
    fn test_retain() {
        let mut solved = CellConstraint::Solved {
            category: Category::Mid,
            id: 0,
            orientation: Orientation::Base,
        };
        assert!(!solved.retain(|_, _| false));
        assert_eq!(solved.len(), 1);

        let mut cell = options(&[(1, Orientation::Base), (2, Orientation::Half)]);
        assert!(!cell.retain(|_, _| true));
        assert!(cell.retain(|id, _| id == 2));
        assert_eq!(cell.option_at(0), Some((2, Orientation::Half)));
        assert_eq!(cell.option_at(1), None);
        assert!(cell.retain(|_, _| false));
        assert!(cell.is_empty());
    }

    // Tests possible colours collect the side facing the given compass
    // Verified by reading canonical sides without the orientation
    #[test]
    fn test_possible_colours() {
        let puzzle = PlantedPuzzle::generate(2, 5, 17).unwrap();
        let catalog = TileCatalog::from_raw(&puzzle.tiles).unwrap();
        let cell = options(&[(0, Orientation::Base), (0, Orientation::Anticlockwise90)]);

        let colours = cell.possible_colours(&catalog, Compass::North, 17);
        assert!(colours.contains(catalog.side(Category::Mid, 0, 0)));
        assert!(colours.contains(catalog.side(Category::Mid, 0, 1)));
        assert!(colours.count() <= 2);
    }
}
