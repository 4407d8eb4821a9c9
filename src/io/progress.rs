//! Terminal progress for long searches and corner trials

use std::sync::LazyLock;

use indicatif::{ProgressBar, ProgressStyle};

use crate::algorithm::backtracker::{Placement, SearchProgress, SearchReporter};
use crate::algorithm::executor::{TrialOutcome, TrialResult};
use crate::io::configuration::{PROGRESS_BAR_WIDTH, SPINNER_TICK};
use crate::io::visualization::render_placement;

static SPINNER_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} [{elapsed_precise}] {prefix} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

static TRIAL_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Trials: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Spinner showing the solution count and per-depth totals of a running search
pub struct SearchSpinner {
    bar: ProgressBar,
}

impl SearchSpinner {
    /// Start a spinner labelled with the search name
    pub fn new(label: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(SPINNER_STYLE.clone());
        bar.set_prefix(label.to_string());
        bar.enable_steady_tick(SPINNER_TICK);
        Self { bar }
    }

    /// Stop the spinner, leaving the last message on screen
    pub fn finish(&self) {
        self.bar.finish();
    }
}

impl SearchReporter for SearchSpinner {
    fn progress(&mut self, progress: &SearchProgress<'_>) {
        let deepest = progress
            .per_depth
            .iter()
            .rposition(|&count| count > 0)
            .map_or(0, |depth| depth + 1);
        self.bar.set_message(format!(
            "{} solutions at depth {} ({}/s), deepest {deepest}",
            progress.solutions,
            progress.max_depth,
            progress.rate()
        ));
    }

    fn solution(&mut self, placement: &Placement) {
        self.bar.println(render_placement(placement));
    }
}

/// Bar counting finished corner trials
pub struct TrialProgress {
    bar: ProgressBar,
}

impl TrialProgress {
    /// Create a bar for `total` trials
    pub fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(TRIAL_STYLE.clone());
        Self { bar }
    }

    /// Record a finished trial
    pub fn complete(&self, result: &TrialResult) {
        self.bar.inc(1);
        let verdict = match &result.outcome {
            TrialOutcome::Completed(_) => "feasible",
            TrialOutcome::Infeasible(_) => "infeasible",
            TrialOutcome::Aborted(_) => "aborted",
        };
        self.bar
            .set_message(format!("corners {:?} {verdict}", result.corners));
    }

    /// Clear the bar once every trial is done
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
