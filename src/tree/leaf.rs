//! Leaf reducer
//!
//! Folds one rank-1 leaf of dense length dim0:
//!   implicit zeros: dim0 - nnz, folded in closed form
//!   lacunar leaf:   nnz ones, folded in closed form
//!   standard leaf:  values folded one by one, in stored order

use super::element::Scalar;
use super::node::Leaf;
use crate::summary::{
    count_nas, fold_repeated, has_any_na, summarize_ones, summarize_values, summarize_zeros,
    Opcode, SummarizeOp, SummarizeResult,
};
use crate::SummarizeError;

/// Fold `leaf` into `res`
pub fn summarize_leaf(
    leaf: &Leaf,
    dim0: usize,
    op: &SummarizeOp,
    res: &mut SummarizeResult,
) -> Result<(), SummarizeError> {
    leaf.validate(dim0, op.in_type)?;

    let (values, offsets) = leaf.unzip();
    let nzcount = offsets.len() as u64;
    let zeros = dim0 as u64 - nzcount;

    res.totalcount += dim0 as u64;
    res.nzcount += nzcount;

    summarize_zeros(zeros, op, res)?;
    if res.is_broken() {
        return Ok(());
    }

    match values {
        None => summarize_ones(nzcount, op, res),
        Some(values) => match op.opcode {
            // NA-only ops just scan; the count is folded as one run.
            Opcode::CountNas => {
                fold_repeated(Scalar::na(op.in_type), count_nas(values) as u64, op, res)
            }
            Opcode::AnyNa if has_any_na(values) => {
                fold_repeated(Scalar::na(op.in_type), 1, op, res)
            }
            Opcode::AnyNa => Ok(()),
            _ => summarize_values(values, op, res),
        },
    }
}
