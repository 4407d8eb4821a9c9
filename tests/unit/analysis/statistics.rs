//! Tests for candidate index distribution summaries

#[cfg(test)]
mod tests {
    use eternity_solver::analysis::indices::CandidateIndices;
    use eternity_solver::analysis::statistics::IndexStatistics;
    use eternity_solver::spatial::generator::PlantedPuzzle;
    use eternity_solver::spatial::tiles::TileCatalog;

    fn statistics(border: usize, interior: usize) -> IndexStatistics {
        let puzzle = PlantedPuzzle::generate(21, border, interior).unwrap();
        let indices = CandidateIndices::new(TileCatalog::from_raw(&puzzle.tiles).unwrap());
        IndexStatistics::gather(&indices)
    }

    // Tests pair counts cover every mid orientation exactly once
    // Verified by counting wildcard slots as concrete pairs
    #[test]
    fn test_pair_totals() {
        let stats = statistics(5, 17);

        assert_eq!(stats.total_pair_candidates(), 4 * 196);
        let histogram_pairs: usize = stats.pair_histogram.iter().sum();
        assert_eq!(histogram_pairs, stats.pair_counts.len());
    }

    // Tests every edge shows one interior colour and every edge falls in one class
    // Verified by reading the grey side instead of the interior side
    #[test]
    fn test_edge_distributions() {
        let stats = statistics(5, 17);

        assert_eq!(stats.edge_interior_colours.iter().sum::<usize>(), 56);
        let edges_in_classes: usize = stats
            .edge_class_histogram
            .iter()
            .enumerate()
            .map(|(size, classes)| size * classes)
            .sum();
        assert_eq!(edges_in_classes, 56);
        assert_eq!(stats.edge_classes() + stats.duplicate_edges(), 56);
    }

    // Tests a single border colour collapses every edge into one class
    // Verified by ignoring the anticlockwise colour in the class key
    #[test]
    fn test_single_border_colour() {
        let stats = statistics(1, 17);

        assert_eq!(stats.edge_classes(), 1);
        assert_eq!(stats.duplicate_edges(), 55);
        assert_eq!(stats.border_counts, vec![[4, 4, 56, 56]]);
        assert!(stats.to_string().contains("55 interchangeable edges"));
    }
}
