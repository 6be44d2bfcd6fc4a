//! Progress display for generation runs

use std::sync::LazyLock;

use indicatif::{ProgressBar, ProgressStyle};

static GENERATION_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} cells")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks actualized cells across generation attempts
///
/// Wraps a single progress bar sized to the board's cell count; quiet runs
/// create no bar at all.
pub struct GenerationProgress {
    bar: Option<ProgressBar>,
}

impl GenerationProgress {
    /// Create a tracker for a board of the given cell count
    pub fn new(total_cells: usize, quiet: bool) -> Self {
        let bar = (!quiet).then(|| {
            let bar = ProgressBar::new(total_cells as u64);
            bar.set_style(GENERATION_STYLE.clone());
            bar
        });

        Self { bar }
    }

    /// Mark the start of a generation attempt
    pub fn start_attempt(&self, attempt: usize, seed: u64) {
        if let Some(bar) = &self.bar {
            bar.reset();
            bar.set_message(format!("attempt {attempt} (seed {seed})"));
        }
    }

    /// Report the current number of actualized cells
    pub fn set_actualized(&self, actualized: usize) {
        if let Some(bar) = &self.bar {
            bar.set_position(actualized as u64);
        }
    }

    /// Note an attempt abandoned at a contradictory cell
    pub fn abandon(&self, row: usize, column: usize) {
        if let Some(bar) = &self.bar {
            bar.println(format!("contradiction at ({row}, {column}), retrying"));
        }
    }

    /// Mark the run complete
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message("complete");
        }
    }
}
