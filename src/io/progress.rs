//! Spinner display for a running generation session

use crate::algorithm::controller::{GenerationOutcome, Phase, Progress};
use crate::io::configuration::PROGRESS_TICK;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static SPINNER_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} [{elapsed_precise}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

/// Shows the current phase and attempt count while a session runs
pub struct GenerationProgress {
    bar: ProgressBar,
}

impl Default for GenerationProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationProgress {
    /// Spinner drawn to stderr
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(SPINNER_STYLE.clone());
        bar.enable_steady_tick(PROGRESS_TICK);
        Self { bar }
    }

    /// Spinner that tracks state without drawing
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Reflect a session snapshot
    pub fn update(&self, progress: &Progress) {
        self.bar.set_message(format!(
            "{} (attempt {})",
            phase_label(progress.phase),
            progress.attempts
        ));
    }

    /// Current status line
    pub fn message(&self) -> String {
        self.bar.message()
    }

    /// Stop the spinner and leave a one-line summary
    pub fn finish(&self, outcome: &GenerationOutcome) {
        let summary = if outcome.accepted {
            format!(
                "Puzzle accepted after {} attempt(s) in {:.1?}",
                outcome.attempts, outcome.elapsed
            )
        } else {
            format!(
                "{} after {} attempt(s); using an empty puzzle",
                phase_label(outcome.phase),
                outcome.attempts
            )
        };
        self.bar.finish_with_message(summary);
    }
}

/// Short description of a session phase
pub const fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Validating => "Validating request",
        Phase::Building => "Building candidate",
        Phase::CheckingSolvability => "Checking solvability",
        Phase::Accepted => "Accepted",
        Phase::TimedOut => "Timed out",
        Phase::Stalled => "Stalled",
    }
}
