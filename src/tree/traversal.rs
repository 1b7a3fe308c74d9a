//! Depth-first SVT walker
//!
//! One accumulator is threaded by `&mut` through the whole walk; children
//! continue the same state, so there is no merge step. After each child the
//! walker inspects the returned `WalkStatus` and unwinds as soon as a
//! breaking value has been found.

use tracing::trace;

use super::leaf::summarize_leaf;
use super::node::{check_internal, Svt};
use crate::stats::StatsTracker;
use crate::summary::{summarize_zeros, SummarizeOp, SummarizeResult};
use crate::SummarizeError;

/// What the walker does after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStatus {
    /// Keep visiting siblings
    Continue,
    /// The result is final; skip everything left
    Break,
}

impl WalkStatus {
    fn of(res: &SummarizeResult) -> Self {
        if res.is_broken() {
            WalkStatus::Break
        } else {
            WalkStatus::Continue
        }
    }
}

/// Dense length of a subtree with the given dims
pub fn dense_len(dims: &[usize]) -> Result<u64, SummarizeError> {
    dims.iter().try_fold(1u64, |acc, &d| {
        acc.checked_mul(d as u64).ok_or_else(|| {
            SummarizeError::InvalidRequest(format!("array with dims {:?} is too large", dims))
        })
    })
}

/// Fold every element of `svt` (of shape `dims`) into `res`
///
/// `dims[0]` is the leaf length; the root has `dims[dims.len() - 1]`
/// children.
pub fn walk_svt(
    svt: &Svt,
    dims: &[usize],
    op: &SummarizeOp,
    res: &mut SummarizeResult,
    tracker: &mut StatsTracker,
) -> Result<WalkStatus, SummarizeError> {
    tracker.push_level();
    let status = walk_node(svt, dims, op, res, tracker);
    tracker.pop_level();
    status
}

fn walk_node(
    svt: &Svt,
    dims: &[usize],
    op: &SummarizeOp,
    res: &mut SummarizeResult,
    tracker: &mut StatsTracker,
) -> Result<WalkStatus, SummarizeError> {
    match svt {
        Svt::Empty => {
            tracker.record_empty();
            let len = dense_len(dims)?;
            res.totalcount += len;
            summarize_zeros(len, op, res)?;
        }
        Svt::Leaf(leaf) => {
            if dims.len() != 1 {
                return Err(SummarizeError::Internal(format!(
                    "leaf found at rank {}",
                    dims.len()
                )));
            }
            tracker.record_leaf();
            summarize_leaf(leaf, dims[0], op, res)?;
            debug_assert!(res.counts_consistent(), "counts out of order: {:?}", res);
        }
        Svt::Internal(children) => {
            check_internal(children, dims)?;
            tracker.record_node();
            let inner = &dims[..dims.len() - 1];
            for (i, child) in children.iter().enumerate() {
                if walk_svt(child, inner, op, res, tracker)? == WalkStatus::Break {
                    trace!(
                        depth = tracker.depth(),
                        child = i,
                        skipped = children.len() - i - 1,
                        "breaking value found, unwinding"
                    );
                    tracker.record_early_exit();
                    return Ok(WalkStatus::Break);
                }
            }
        }
    }
    Ok(WalkStatus::of(res))
}
