//! Top-level reduction entry point
//!
//! A request is compiled once into a `SummarizeOp`, a fresh accumulator is
//! threaded through one walk (two for centered opcodes without a center),
//! and the postprocessor turns it into a typed `Summary`.

mod center;

pub use center::resolve_center;

use tracing::debug;

use crate::stats::{StatsTracker, TraversalStats};
use crate::summary::{postprocess, Opcode, SummarizeOp, SummarizeResult, SummaryValue};
use crate::tree::{walk_svt, ElementType, Svt};
use crate::SummarizeError;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Configuration of one reduction
#[derive(Debug, Clone, PartialEq)]
pub struct SummarizeRequest {
    /// Operation
    pub opcode: Opcode,
    /// Element type of the array
    pub element_type: ElementType,
    /// Drop NAs instead of propagating them
    pub na_rm: bool,
    /// Caller-supplied center (interface-3 opcodes only; NaN means unset)
    pub center: Option<f64>,
    /// Collect traversal statistics
    pub collect_stats: bool,
}

impl SummarizeRequest {
    /// Resolve `op_name` for `element_type`; fails on unknown or unsupported ops
    pub fn new(op_name: &str, element_type: ElementType) -> Result<Self, SummarizeError> {
        let opcode = Opcode::resolve(op_name, element_type)?;
        Ok(Self::from_opcode(opcode, element_type))
    }

    /// Request for an already-resolved opcode
    pub fn from_opcode(opcode: Opcode, element_type: ElementType) -> Self {
        Self {
            opcode,
            element_type,
            na_rm: false,
            center: None,
            collect_stats: false,
        }
    }

    /// Set `na_rm`.
    pub fn with_na_rm(mut self, na_rm: bool) -> Self {
        self.na_rm = na_rm;
        self
    }

    /// Supply (or clear) the center.
    pub fn with_center(mut self, center: Option<f64>) -> Self {
        self.center = center;
        self
    }

    /// Enable traversal statistics.
    pub fn with_stats(mut self, enabled: bool) -> Self {
        self.collect_stats = enabled;
        self
    }

    /// Compile into the immutable descriptor
    pub fn op(&self) -> Result<SummarizeOp, SummarizeError> {
        SummarizeOp::new(self.opcode, self.element_type, self.na_rm, self.center)
    }
}

/// Result of one top-level reduction
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Summary {
    /// Final value
    pub value: SummaryValue,
    /// NAs were introduced by integer overflow; the caller should warn once
    pub overflow_warning: bool,
    /// Elements counted before the walk finished or stopped early
    pub totalcount: u64,
    /// Stored elements visited
    pub nzcount: u64,
    /// NAs dropped under `na_rm`
    pub nacount: u64,
    /// Traversal statistics (if requested)
    pub stats: Option<TraversalStats>,
}

/// Summarize `svt`, an array of shape `dims`, as described by `request`
pub fn summarize(
    svt: &Svt,
    dims: &[usize],
    request: &SummarizeRequest,
) -> Result<Summary, SummarizeError> {
    let op = request.op()?;
    if dims.is_empty() {
        return Err(SummarizeError::InvalidRequest(
            "dims must have at least one dimension".to_string(),
        ));
    }
    debug!(
        opcode = %op.opcode,
        element_type = %op.in_type,
        na_rm = op.na_rm,
        ndim = dims.len(),
        "summarize"
    );

    let mut stats: Option<TraversalStats> = None;
    let op = if op.needs_center() {
        let mut tracker = StatsTracker::new(request.collect_stats);
        let centered = resolve_center(svt, dims, &op, &mut tracker)?;
        stats = tracker.take_stats();
        centered
    } else {
        op
    };

    let mut tracker = StatsTracker::new(request.collect_stats);
    let (value, res) = run_pass(svt, dims, &op, &mut tracker)?;
    if let Some(pass) = tracker.take_stats() {
        stats.get_or_insert_with(TraversalStats::default).absorb(&pass);
    }

    debug!(
        opcode = %op.opcode,
        totalcount = res.totalcount,
        nzcount = res.nzcount,
        nacount = res.nacount,
        overflow = res.warn,
        "summarize done"
    );
    Ok(Summary {
        value,
        overflow_warning: res.warn,
        totalcount: res.totalcount,
        nzcount: res.nzcount,
        nacount: res.nacount,
        stats,
    })
}

/// One full walk plus postprocessing
pub(crate) fn run_pass(
    svt: &Svt,
    dims: &[usize],
    op: &SummarizeOp,
    tracker: &mut StatsTracker,
) -> Result<(SummaryValue, SummarizeResult), SummarizeError> {
    let mut res = SummarizeResult::new(op);
    walk_svt(svt, dims, op, &mut res, tracker)?;
    let value = postprocess(op, &mut res)?;
    Ok((value, res))
}
