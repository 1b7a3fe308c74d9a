//! Traversal accounting
//!
//! Optional counters describing how much of a tree one walk touched

mod tracker;

pub use tracker::StatsTracker;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// What one walk visited
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct TraversalStats {
    /// Internal nodes entered
    pub nodes_visited: usize,
    /// Leaves folded
    pub leaves_visited: usize,
    /// `Empty` subtrees counted in closed form
    pub empty_subtrees: usize,
    /// Deepest recursion level reached (root = 1)
    pub max_depth: usize,
    /// Whether a breaking value ended the walk
    pub stopped_early: bool,
}

impl TraversalStats {
    /// Merge counters from another pass (two-pass reductions)
    pub fn absorb(&mut self, other: &TraversalStats) {
        self.nodes_visited += other.nodes_visited;
        self.leaves_visited += other.leaves_visited;
        self.empty_subtrees += other.empty_subtrees;
        self.max_depth = self.max_depth.max(other.max_depth);
        self.stopped_early |= other.stopped_early;
    }

    /// One-line report
    pub fn report(&self) -> String {
        format!(
            "nodes: {}, leaves: {}, empty subtrees: {}, max depth: {}{}",
            self.nodes_visited,
            self.leaves_visited,
            self.empty_subtrees,
            self.max_depth,
            if self.stopped_early { ", stopped early" } else { "" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absorb() {
        let mut a = TraversalStats {
            nodes_visited: 1,
            leaves_visited: 2,
            empty_subtrees: 0,
            max_depth: 2,
            stopped_early: false,
        };
        let b = TraversalStats {
            nodes_visited: 1,
            leaves_visited: 1,
            empty_subtrees: 3,
            max_depth: 3,
            stopped_early: true,
        };
        a.absorb(&b);
        assert_eq!(a.leaves_visited, 3);
        assert_eq!(a.max_depth, 3);
        assert!(a.stopped_early);
        assert!(a.report().ends_with("stopped early"));
    }
}
