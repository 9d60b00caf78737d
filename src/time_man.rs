use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::{Duration, Instant};

use crate::search::SearchStats;

/// Builds a `Deadline` with whichever limits the caller cares about; any
/// limit left unset never triggers.
#[derive(Debug, Clone)]
pub struct Limits {
    time_limit: Duration,
    node_limit: u64,
    depth_limit: u32,
    stop: Arc<AtomicBool>,
}

impl Limits {
    #[must_use]
    pub fn new() -> Self {
        Limits {
            time_limit: Duration::MAX,
            node_limit: u64::MAX,
            depth_limit: u32::MAX,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn time(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    #[must_use]
    pub fn nodes(mut self, limit: u64) -> Self {
        self.node_limit = limit;
        self
    }

    #[must_use]
    pub fn depth(mut self, limit: u32) -> Self {
        self.depth_limit = limit;
        self
    }

    /// A handle that can be used to cancel the search this produces from
    /// another thread, before the search itself is ever started.
    #[must_use]
    pub fn cancellation_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    #[must_use]
    pub fn start_now(&self) -> Deadline {
        Deadline {
            start_time: Instant::now(),
            time_limit: self.time_limit,
            node_limit: self.node_limit,
            depth_limit: self.depth_limit,
            stop: Arc::clone(&self.stop),
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new()
    }
}

/// The cooperative cancellation token checked on every recursion entry of
/// the search. Cheap to check, cheap to clone.
#[derive(Debug, Clone)]
pub struct Deadline {
    start_time: Instant,
    time_limit: Duration,
    node_limit: u64,
    depth_limit: u32,
    stop: Arc<AtomicBool>,
}

impl Deadline {
    #[must_use]
    pub fn unbounded() -> Self {
        Limits::new().start_now()
    }

    #[must_use]
    pub fn fired(&self, stats: &SearchStats) -> bool {
        stats.nodes > self.node_limit
            || stats.depth > self.depth_limit
            || self.start_time.elapsed() >= self.time_limit
            || self.stop.load(Ordering::Relaxed)
    }

    pub fn force_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_deadline_never_fires_for_small_stats() {
        let deadline = Deadline::unbounded();
        let stats = SearchStats { nodes: 1000, depth: 5 };
        assert!(!deadline.fired(&stats));
    }

    #[test]
    fn force_stop_fires_immediately() {
        let limits = Limits::new();
        let deadline = limits.start_now();
        deadline.force_stop();
        assert!(deadline.fired(&SearchStats { nodes: 0, depth: 0 }));
    }

    #[test]
    fn node_limit_fires_once_exceeded() {
        let deadline = Limits::new().nodes(10).start_now();
        assert!(!deadline.fired(&SearchStats { nodes: 10, depth: 0 }));
        assert!(deadline.fired(&SearchStats { nodes: 11, depth: 0 }));
    }
}
