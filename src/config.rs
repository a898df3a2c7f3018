//! Search constants and runtime configuration defaults

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Seconds between two progress lines while a search runs
pub const DEFAULT_PROGRESS_SECS: u64 = 5;

/// Interval between two progress lines while a search runs
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_secs(DEFAULT_PROGRESS_SECS);

/// Number of images checked per solution: 24 rotations, each with and
/// without reflection
pub const SYMMETRY_VARIANTS: usize = 48;

/// Options for one search run.
///
/// Clones share one cancellation flag, so a handle kept by the caller can
/// stop a search running on another thread.
#[derive(Clone, Debug)]
pub struct SolveConfig {
    /// Stop once this many distinct solutions are found. `None` searches
    /// exhaustively.
    pub max_solutions: Option<usize>,
    /// Minimum wall-clock time between two progress lines
    pub progress_interval: Duration,
    cancelled: Arc<AtomicBool>,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            max_solutions: None,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl SolveConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_solutions(mut self, max_solutions: Option<usize>) -> Self {
        self.max_solutions = max_solutions;
        self
    }

    #[must_use]
    pub fn with_progress_interval(mut self, progress_interval: Duration) -> Self {
        self.progress_interval = progress_interval;
        self
    }

    /// True once `found` solutions satisfy the configured ceiling.
    pub fn limit_reached(&self, found: usize) -> bool {
        self.max_solutions.is_some_and(|max| found >= max)
    }

    /// Asks every search sharing this flag to stop at its next step.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
