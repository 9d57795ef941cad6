//! Progress display for a batch of problems

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Problems: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Single progress bar tracking solved problems
pub struct ProgressManager {
    bar: ProgressBar,
    problem_count: usize,
    completed: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager whose bar stays hidden until initialized
    pub fn new() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            problem_count: 0,
            completed: 0,
        }
    }

    /// Show a bar sized for `problem_count` problems
    pub fn initialize(&mut self, problem_count: usize) {
        self.problem_count = problem_count;
        self.completed = 0;
        let bar = ProgressBar::new(problem_count as u64);
        bar.set_style(BATCH_STYLE.clone());
        self.bar = bar;
    }

    /// Show which problem is being solved
    pub fn start_problem(&self, name: &str) {
        self.bar.set_message(name.to_string());
    }

    /// Advance past a finished problem
    pub fn complete_problem(&mut self) {
        self.completed += 1;
        self.bar.inc(1);
    }

    /// Number of problems the bar was sized for
    pub const fn problem_count(&self) -> usize {
        self.problem_count
    }

    /// Number of problems completed so far
    pub const fn completed(&self) -> usize {
        self.completed
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
