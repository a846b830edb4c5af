//! Search budgets shared by every engine.
//!
//! A search stops when its time limit expires, its node budget is spent, or
//! someone calls [`TimeControl::stop`]. Clones share the same counters, so a
//! budget handed to parallel workers is spent jointly.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Search limits that control when an engine should stop searching.
///
/// Depth bounds how far each line is explored; the time limit and node budget
/// bound the total work. When either budget runs out the engine returns its
/// best answer so far.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Maximum search depth in plies (half-moves)
    pub depth: u8,
    /// Maximum time allowed for this move (None = infinite)
    pub move_time: Option<Duration>,
    /// Maximum number of positions visited (None = unbounded)
    pub node_limit: Option<u64>,
    /// Shared stop flag, clock and node counter
    pub time_control: TimeControl,
}

impl SearchLimits {
    /// Create limits with only depth constraint.
    pub fn depth(depth: u8) -> Self {
        Self::new(depth, None, None)
    }

    /// Create limits with both depth and time constraints.
    pub fn depth_and_time(depth: u8, move_time: Duration) -> Self {
        Self::new(depth, Some(move_time), None)
    }

    /// Create limits with depth and a node budget.
    pub fn depth_and_nodes(depth: u8, node_limit: u64) -> Self {
        Self::new(depth, None, Some(node_limit))
    }

    pub fn new(depth: u8, move_time: Option<Duration>, node_limit: Option<u64>) -> Self {
        Self {
            depth,
            move_time,
            node_limit,
            time_control: TimeControl::new(move_time, node_limit),
        }
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.time_control.is_stopped()
    }

    /// Start the clock. Call this when search begins.
    pub fn start(&self) {
        self.time_control.start();
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(4)
    }
}

/// Thread-safe budget tracker.
///
/// The `is_stopped()` check is a single atomic load and may be called on
/// every node; the clock itself is only read every `check_interval` nodes.
#[derive(Debug, Clone)]
pub struct TimeControl {
    stopped: Arc<AtomicBool>,
    start_time: Arc<RwLock<Option<Instant>>>,
    nodes: Arc<AtomicU64>,
    time_limit: Option<Duration>,
    node_limit: Option<u64>,
    check_interval: u64,
}

impl TimeControl {
    pub fn new(time_limit: Option<Duration>, node_limit: Option<u64>) -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            start_time: Arc::new(RwLock::new(None)),
            nodes: Arc::new(AtomicU64::new(0)),
            time_limit,
            node_limit,
            check_interval: 1024,
        }
    }

    /// Start the clock and reset the node counter.
    pub fn start(&self) {
        if let Ok(mut start) = self.start_time.write() {
            *start = Some(Instant::now());
        }
        self.nodes.store(0, Ordering::SeqCst);
        self.stopped.store(false, Ordering::SeqCst);
    }

    /// Force stop the search immediately.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Account for one visited node. Returns `true` once the budget is spent.
    pub fn count_node(&self) -> bool {
        let visited = self.nodes.fetch_add(1, Ordering::Relaxed) + 1;
        if let Some(limit) = self.node_limit
            && visited > limit
        {
            self.stop();
            return true;
        }
        if self.should_check_time(visited) {
            return self.check_time();
        }
        self.is_stopped()
    }

    pub fn nodes(&self) -> u64 {
        self.nodes.load(Ordering::Relaxed)
    }

    /// Check time and update stopped flag if time expired.
    pub fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }

        if let Some(limit) = self.time_limit
            && self.elapsed() >= limit
        {
            self.stop();
            return true;
        }

        false
    }

    #[inline]
    pub fn should_check_time(&self, nodes: u64) -> bool {
        nodes.is_multiple_of(self.check_interval)
    }

    /// Elapsed time since search started (zero before `start`).
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .read()
            .ok()
            .and_then(|start| start.map(|s| s.elapsed()))
            .unwrap_or(Duration::ZERO)
    }

    /// Remaining time (None if no limit).
    pub fn remaining(&self) -> Option<Duration> {
        let limit = self.time_limit?;
        Some(limit.saturating_sub(self.elapsed()))
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
