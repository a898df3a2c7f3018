//! Periodic status lines for long searches.

use std::time::{Duration, Instant};

use tracing::info;

/// Logs elapsed time, branches tried and solutions found, at most once per
/// interval. Purely observational.
#[derive(Debug)]
pub struct ProgressReporter {
    started: Instant,
    last_report: Instant,
    interval: Duration,
}

impl ProgressReporter {
    pub fn new(interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_report: now,
            interval,
        }
    }

    /// Time since the reporter was created.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Logs a status line if the interval has passed since the last one.
    /// Returns whether a line was written.
    pub fn tick(&mut self, branches: u64, solutions: usize) -> bool {
        if self.last_report.elapsed() < self.interval {
            return false;
        }
        self.report(branches, solutions);
        true
    }

    /// Logs the final status line unconditionally.
    pub fn finish(&mut self, branches: u64, solutions: usize) {
        self.report(branches, solutions);
    }

    fn report(&mut self, branches: u64, solutions: usize) {
        self.last_report = Instant::now();
        info!(
            elapsed_ms = self.elapsed().as_millis() as u64,
            branches,
            solutions,
            "{branches} variants have been tried, {solutions} solution{} found",
            if solutions == 1 { "" } else { "s" }
        );
    }
}
