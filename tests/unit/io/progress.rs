//! Tests for search spinners and corner trial progress

#[cfg(test)]
mod tests {
    use eternity_solver::algorithm::backtracker::{Placement, SearchProgress, SearchReporter};
    use eternity_solver::algorithm::executor::{TrialOutcome, TrialResult};
    use eternity_solver::io::progress::{SearchSpinner, TrialProgress};
    use eternity_solver::spatial::path::PathKind;
    use eternity_solver::spatial::tiles::{Category, PlacedTile};
    use eternity_solver::spatial::geometry::Orientation;
    use std::time::Duration;

    // Tests the spinner accepts progress and solutions through the reporter interface
    // Verified by panicking on an all-zero depth table
    #[test]
    fn test_search_spinner_reports() {
        let mut spinner = SearchSpinner::new("Scanrow");
        let per_depth = [4, 0, 0];

        spinner.progress(&SearchProgress {
            solutions: 0,
            per_depth: &per_depth,
            elapsed: Duration::from_secs(1),
            max_depth: 3,
        });
        spinner.progress(&SearchProgress {
            solutions: 0,
            per_depth: &[0, 0],
            elapsed: Duration::ZERO,
            max_depth: 2,
        });

        let path = PathKind::Scanrow.build().unwrap();
        let placed = [PlacedTile::new(Category::Corner, 0, Orientation::Clockwise90)];
        spinner.solution(&Placement::from_path(&path, &placed));
        spinner.finish();
    }

    // Tests the trial bar counts every outcome kind
    // Verified by skipping the increment for aborted trials
    #[test]
    fn test_trial_progress() {
        let progress = TrialProgress::new(2);

        progress.complete(&TrialResult {
            corners: [0, 1, 2],
            outcome: TrialOutcome::Aborted("contradiction".to_string()),
        });
        progress.complete(&TrialResult {
            corners: [1, 0, 2],
            outcome: TrialOutcome::Aborted("contradiction".to_string()),
        });
        progress.finish();
    }
}
