//! Vector reduction core
//!
//! Every fold goes through `fold_repeated(x, n)`, which folds n copies of x
//! in closed form. Stored values use n = 1; implicit zeros and lacunar ones
//! use their run length, so repeats are never iterated.

use super::op::{Opcode, SummarizeOp};
use super::result::{Outbuf, OutbufStatus, SummarizeResult};
use crate::tree::{LeafValuesRef, Scalar};
use crate::SummarizeError;

/// Fold `n` copies of `x` into `res`
pub fn fold_repeated(
    x: Scalar,
    n: u64,
    op: &SummarizeOp,
    res: &mut SummarizeResult,
) -> Result<(), SummarizeError> {
    if n == 0 || res.is_broken() {
        return Ok(());
    }
    if x.is_na() {
        fold_na(n, op, res);
        return Ok(());
    }

    let unset = res.status == OutbufStatus::Unset;
    let mut overflow = false;
    let breaking = match (op.opcode, &mut res.outbuf, x) {
        (Opcode::CountNas | Opcode::AnyNa, _, _) => None,
        (Opcode::Any, Outbuf::Logical(_), _) => {
            (!x.is_zero()).then_some(Outbuf::Logical(Some(true)))
        }
        (Opcode::All, Outbuf::Logical(_), _) => {
            x.is_zero().then_some(Outbuf::Logical(Some(false)))
        }
        (Opcode::Min, Outbuf::Int(m), Scalar::Int(v)) => {
            if unset || v < *m {
                *m = v;
            }
            None
        }
        (Opcode::Max, Outbuf::Int(m), Scalar::Int(v)) => {
            if unset || v > *m {
                *m = v;
            }
            None
        }
        (Opcode::Min, Outbuf::Double(m), Scalar::Double(v)) => {
            if unset || v < *m {
                *m = v;
            }
            None
        }
        (Opcode::Max, Outbuf::Double(m), Scalar::Double(v)) => {
            if unset || v > *m {
                *m = v;
            }
            None
        }
        (Opcode::Range, Outbuf::IntPair(r), Scalar::Int(v)) => {
            if unset {
                *r = [v, v];
            } else {
                r[0] = r[0].min(v);
                r[1] = r[1].max(v);
            }
            None
        }
        (Opcode::Range, Outbuf::DoublePair(r), Scalar::Double(v)) => {
            if unset {
                *r = [v, v];
            } else {
                r[0] = r[0].min(v);
                r[1] = r[1].max(v);
            }
            None
        }
        (Opcode::Sum, Outbuf::Long(s), Scalar::Int(v)) => {
            let total = i64::try_from(n)
                .ok()
                .and_then(|n| i64::from(v).checked_mul(n))
                .and_then(|t| s.checked_add(t));
            match total {
                Some(t) => {
                    *s = t;
                    None
                }
                None => {
                    overflow = true;
                    Some(Outbuf::Long(0))
                }
            }
        }
        (Opcode::Sum | Opcode::Mean, Outbuf::Double(s), _) => {
            *s += x.as_f64() * n as f64;
            None
        }
        (Opcode::Prod, Outbuf::Double(p), _) => {
            let v = x.as_f64();
            *p *= if n == 1 { v } else { v.powf(n as f64) };
            None
        }
        (Opcode::CenteredX2Sum | Opcode::Var1 | Opcode::Sd1, Outbuf::Double(s), _) => {
            let center = op.center.ok_or_else(|| {
                SummarizeError::Internal(format!("{}() reached a fold without a center", op.opcode))
            })?;
            let delta = x.as_f64() - center;
            *s += delta * delta * n as f64;
            None
        }
        (Opcode::SumXX2 | Opcode::Var2 | Opcode::Sd2, Outbuf::DoublePair(p), _) => {
            let v = x.as_f64();
            p[0] += v * n as f64;
            p[1] += v * v * n as f64;
            None
        }
        (opcode, outbuf, x) => {
            return Err(SummarizeError::Internal(format!(
                "no fold defined for {}() with buffer {:?} and value {:?}",
                opcode, outbuf, x
            )))
        }
    };

    if overflow {
        res.warn = true;
    }
    match breaking {
        Some(outbuf) => res.set_breaking(outbuf),
        None => res.status = OutbufStatus::Set,
    }
    Ok(())
}

/// Fold `n` NAs
fn fold_na(n: u64, op: &SummarizeOp, res: &mut SummarizeResult) {
    match op.opcode {
        Opcode::CountNas => {
            if let Outbuf::Count(count) = &mut res.outbuf {
                *count += n;
            }
            res.status = OutbufStatus::Set;
        }
        Opcode::AnyNa => res.set_breaking(Outbuf::Logical(Some(true))),
        _ if op.na_rm => res.nacount += n,
        // NA only loses to the breaking value, which has not been seen yet.
        Opcode::Any | Opcode::All => {
            res.outbuf = Outbuf::Logical(None);
            res.status = OutbufStatus::Set;
        }
        // Nothing can turn an NA result back into a number.
        _ => res.status = OutbufStatus::SetWithBreakingValue,
    }
}

/// Fold the stored values of a standard leaf, in order
pub fn summarize_values(
    values: LeafValuesRef<'_>,
    op: &SummarizeOp,
    res: &mut SummarizeResult,
) -> Result<(), SummarizeError> {
    for k in 0..values.len() {
        fold_repeated(values.get(k), 1, op, res)?;
        if res.is_broken() {
            break;
        }
    }
    Ok(())
}

/// Fold `n` copies of the type's one
pub fn summarize_ones(
    n: u64,
    op: &SummarizeOp,
    res: &mut SummarizeResult,
) -> Result<(), SummarizeError> {
    fold_repeated(Scalar::one(op.in_type), n, op, res)
}

/// Fold `n` implicit zeros
pub fn summarize_zeros(
    n: u64,
    op: &SummarizeOp,
    res: &mut SummarizeResult,
) -> Result<(), SummarizeError> {
    fold_repeated(Scalar::zero(op.in_type), n, op, res)
}

/// Count the NAs in a value slice
pub fn count_nas(values: LeafValuesRef<'_>) -> usize {
    match values {
        LeafValuesRef::Integer(v) => v.iter().filter(|&&x| Scalar::Int(x).is_na()).count(),
        LeafValuesRef::Double(v) => v.iter().filter(|x| x.is_nan()).count(),
    }
}

/// Whether a value slice holds any NA
pub fn has_any_na(values: LeafValuesRef<'_>) -> bool {
    match values {
        LeafValuesRef::Integer(v) => v.iter().any(|&x| Scalar::Int(x).is_na()),
        LeafValuesRef::Double(v) => v.iter().any(|x| x.is_nan()),
    }
}
