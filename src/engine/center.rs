//! Two-pass centering
//!
//! `centered_X2_sum`, `var1` and `sd1` need the global mean before any
//! centered term can be folded. With no caller-supplied center:
//!   pass 1: full walk with opcode `mean` (same na_rm)
//!   pass 2: full walk with the requested opcode, center = pass-1 mean
//! An NA mean becomes a NaN center, which makes pass 2 NA as well.

use tracing::debug;

use super::run_pass;
use crate::stats::StatsTracker;
use crate::summary::{Opcode, SummarizeOp, SummaryValue};
use crate::tree::Svt;
use crate::SummarizeError;

/// Return `op` with its center filled in by a `mean` pass over `svt`
pub fn resolve_center(
    svt: &Svt,
    dims: &[usize],
    op: &SummarizeOp,
    tracker: &mut StatsTracker,
) -> Result<SummarizeOp, SummarizeError> {
    let mean_op = op.with_opcode(Opcode::Mean);
    let (value, _) = run_pass(svt, dims, &mean_op, tracker)?;
    let center = match value {
        SummaryValue::Double(mean) => mean,
        other => {
            return Err(SummarizeError::Internal(format!(
                "mean pass produced {:?}",
                other
            )))
        }
    };
    debug!(opcode = %op.opcode, center, "center resolved by mean pass");
    Ok(op.with_center(center))
}
