//! State shared between the front-end worker and its callers.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

/// Counters describing what the worker has processed so far.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FrontendStats {
    pub motion_deltas: usize,
    pub feature_sets: usize,
    /// Feature sets replaced before any node consumed them.
    pub feature_sets_overwritten: usize,
    pub nodes_committed: usize,
    /// Nodes that carry a feature set.
    pub nodes_with_features: usize,
    pub frames_dropped: usize,
    pub covariance_violations: usize,
}

/// Statistics and run flags of a [`FrontendSystem`](super::FrontendSystem).
pub struct SharedState {
    stats: Mutex<FrontendStats>,

    /// Set by the worker when it stops on an unrecoverable error.
    halted: AtomicBool,
}

impl SharedState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Snapshot of the current counters.
    pub fn stats(&self) -> FrontendStats {
        self.stats.lock().clone()
    }

    pub fn update_stats(&self, f: impl FnOnce(&mut FrontendStats)) {
        f(&mut self.stats.lock());
    }

    pub fn is_halted(&self) -> bool {
        self.halted.load(Ordering::SeqCst)
    }

    pub fn set_halted(&self) {
        self.halted.store(true, Ordering::SeqCst);
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self {
            stats: Mutex::new(FrontendStats::default()),
            halted: AtomicBool::new(false),
        }
    }
}
