//! Stats tracking for one walk

use super::TraversalStats;

/// Tracks traversal counters during a walk
///
/// Disabled trackers only keep the current depth.
#[derive(Debug)]
pub struct StatsTracker {
    /// Current recursion depth
    depth: usize,

    /// Counters (if enabled)
    stats: Option<TraversalStats>,
}

impl StatsTracker {
    /// Create new tracker
    pub fn new(enabled: bool) -> Self {
        Self {
            depth: 0,
            stats: enabled.then(TraversalStats::default),
        }
    }

    /// Enter one recursion level
    pub fn push_level(&mut self) {
        self.depth += 1;
        if let Some(ref mut s) = self.stats {
            s.max_depth = s.max_depth.max(self.depth);
        }
    }

    /// Leave one recursion level
    pub fn pop_level(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Current depth
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Record an internal node
    pub fn record_node(&mut self) {
        if let Some(ref mut s) = self.stats {
            s.nodes_visited += 1;
        }
    }

    /// Record a leaf
    pub fn record_leaf(&mut self) {
        if let Some(ref mut s) = self.stats {
            s.leaves_visited += 1;
        }
    }

    /// Record an `Empty` subtree
    pub fn record_empty(&mut self) {
        if let Some(ref mut s) = self.stats {
            s.empty_subtrees += 1;
        }
    }

    /// Record that a breaking value cut the walk short
    pub fn record_early_exit(&mut self) {
        if let Some(ref mut s) = self.stats {
            s.stopped_early = true;
        }
    }

    /// Take the counters (consumes them)
    pub fn take_stats(&mut self) -> Option<TraversalStats> {
        self.stats.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_tracker_keeps_nothing() {
        let mut tracker = StatsTracker::new(false);
        tracker.push_level();
        tracker.record_leaf();
        assert_eq!(tracker.depth(), 1);
        assert!(tracker.take_stats().is_none());
    }

    #[test]
    fn test_depth_tracking() {
        let mut tracker = StatsTracker::new(true);
        tracker.push_level();
        tracker.push_level();
        tracker.pop_level();
        tracker.push_level();
        tracker.pop_level();
        tracker.pop_level();
        let stats = tracker.take_stats().unwrap();
        assert_eq!(stats.max_depth, 2);
        assert_eq!(tracker.depth(), 0);
    }
}
