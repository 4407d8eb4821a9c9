//! Tests for placement and index table export

#[cfg(test)]
mod tests {
    use eternity_solver::algorithm::backtracker::Placement;
    use eternity_solver::analysis::indices::CandidateIndices;
    use eternity_solver::io::export::{
        format_placement, format_tables, write_placement, write_tables,
    };
    use eternity_solver::spatial::generator::PlantedPuzzle;
    use eternity_solver::spatial::path::PathKind;
    use eternity_solver::spatial::tiles::TileCatalog;
    use std::fs;
    use tempfile::TempDir;

    fn planted_indices() -> (PlantedPuzzle, CandidateIndices) {
        let puzzle = PlantedPuzzle::generate(31, 5, 17).unwrap();
        let indices = CandidateIndices::new(TileCatalog::from_raw(&puzzle.tiles).unwrap());
        (puzzle, indices)
    }

    // Tests a partial placement lists its visits and marks unfilled cells
    // Verified by writing column before row
    #[test]
    fn test_format_placement() {
        let (puzzle, indices) = planted_indices();
        let path = PathKind::EdgeClockwise.build().unwrap();
        let solution: Vec<_> = path
            .steps()
            .iter()
            .map(|step| puzzle.solution_at(step.cell).unwrap())
            .collect();
        let placement = Placement::from_path(&path, &solution[..17]);

        let text = format_placement(indices.catalog(), &placement);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "# visit row col category id source orientation input_orientation");
        assert!(lines[1].starts_with("0 0 0 corner "));
        assert!(lines[1].contains(" CW90 "));
        assert!(lines[17].starts_with("16 1 15 edge "));
        assert_eq!(lines[18], "# fill order");
        assert!(lines[19].starts_with("0 1 2 "));
        assert!(lines[20].ends_with(" 16"));
        assert!(lines[21].split(' ').all(|field| field == "."));
        assert_eq!(lines.len(), 18 + 1 + 16);
    }

    // Tests the tables cover every tile orientation and every mid exactly once per concrete pair
    // Verified by dropping the wildcard rows
    #[test]
    fn test_format_tables() {
        let (_, indices) = planted_indices();
        let text = format_tables(&indices);

        let tile_rows = text
            .lines()
            .skip(1)
            .take_while(|line| !line.starts_with('#'))
            .count();
        assert_eq!(tile_rows, 256 * 4);
        assert!(
            text.lines()
                .any(|line| line.starts_with("corner 0 0 ") && line.ends_with(" - -"))
        );

        let pair_rows: Vec<&str> = text
            .lines()
            .skip_while(|line| !line.starts_with("# north west"))
            .skip(1)
            .collect();
        let concrete: usize = pair_rows
            .iter()
            .filter(|row| !row.contains('*'))
            .map(|row| row.split(' ').nth(2).unwrap().parse::<usize>().unwrap())
            .sum();
        assert_eq!(concrete, 4 * 196);
        assert!(pair_rows.iter().any(|row| row.starts_with("* * 784 ")));
    }

    // Tests both exports are written to disk verbatim
    // Verified by writing the tables to the placement path
    #[test]
    fn test_write_exports() {
        let (puzzle, indices) = planted_indices();
        let dir = TempDir::new().unwrap();
        let path = PathKind::Scanrow.build().unwrap();
        let placement = Placement::from_path(&path, puzzle.solution());

        let placement_file = dir.path().join("solution.txt");
        let tables_file = dir.path().join("tables.txt");
        write_placement(&placement_file, indices.catalog(), &placement).unwrap();
        write_tables(&tables_file, &indices).unwrap();

        assert_eq!(
            fs::read_to_string(&placement_file).unwrap(),
            format_placement(indices.catalog(), &placement)
        );
        assert_eq!(fs::read_to_string(&tables_file).unwrap(), format_tables(&indices));
        assert!(write_tables(&dir.path().join("no/such/dir.txt"), &indices).is_err());
    }
}
