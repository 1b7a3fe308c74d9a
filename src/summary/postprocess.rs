//! Accumulator -> typed output
//!
//! Denominators use the retained count n = totalcount - nacount:
//!   mean = sum / n                         (NA if n == 0)
//!   var1 = centered_X2_sum / (n - 1)       (NA if n <= 1)
//!   var2 = (sumX2 - sumX^2 / n) / (n - 1)  (NA if n <= 1)
//!   sd   = sqrt(var)

use super::op::{Opcode, SummarizeOp};
use super::result::{Outbuf, OutbufStatus, SummarizeResult};
use super::value::SummaryValue;
use crate::tree::NA_REAL;
use crate::SummarizeError;

/// Turn a finished accumulator into the final value
///
/// Integer sums outside the `i32` range become NA and set `res.warn`.
pub fn postprocess(
    op: &SummarizeOp,
    res: &mut SummarizeResult,
) -> Result<SummaryValue, SummarizeError> {
    // Non-logical ops only break on NA (or on overflow, which is also NA).
    let na = res.is_broken() && !op.opcode.is_logical();
    let unset = res.status == OutbufStatus::Unset;
    let n = res.retained();

    let value = match (op.opcode, res.outbuf) {
        (Opcode::CountNas, Outbuf::Count(count)) => SummaryValue::Double(count as f64),
        (Opcode::AnyNa | Opcode::Any | Opcode::All, Outbuf::Logical(v)) => SummaryValue::Logical(v),
        (Opcode::Min | Opcode::Max, Outbuf::Int(v)) => {
            SummaryValue::Integer((!na && !unset).then_some(v))
        }
        (Opcode::Min | Opcode::Max, Outbuf::Double(v)) => {
            SummaryValue::Double(if na || unset { NA_REAL } else { v })
        }
        (Opcode::Range, Outbuf::IntPair([lo, hi])) => {
            if na || unset {
                SummaryValue::IntegerPair([None, None])
            } else {
                SummaryValue::IntegerPair([Some(lo), Some(hi)])
            }
        }
        (Opcode::Range, Outbuf::DoublePair(r)) => {
            SummaryValue::DoublePair(if na || unset { [NA_REAL, NA_REAL] } else { r })
        }
        (Opcode::Sum, Outbuf::Long(s)) => {
            if na {
                SummaryValue::Integer(None)
            } else if s > i64::from(i32::MAX) || s < -i64::from(i32::MAX) {
                res.warn = true;
                SummaryValue::Integer(None)
            } else {
                SummaryValue::Integer(Some(s as i32))
            }
        }
        (Opcode::Sum | Opcode::Prod | Opcode::CenteredX2Sum, Outbuf::Double(v)) => {
            SummaryValue::Double(if na { NA_REAL } else { v })
        }
        (Opcode::Mean, Outbuf::Double(s)) => {
            SummaryValue::Double(if na || n == 0 { NA_REAL } else { s / n as f64 })
        }
        (Opcode::Var1 | Opcode::Sd1, Outbuf::Double(s)) => {
            let var = if na || n <= 1 {
                NA_REAL
            } else {
                s / (n - 1) as f64
            };
            SummaryValue::Double(finish_spread(op.opcode, var))
        }
        (Opcode::SumXX2, Outbuf::DoublePair(p)) => {
            SummaryValue::DoublePair(if na { [NA_REAL, NA_REAL] } else { p })
        }
        (Opcode::Var2 | Opcode::Sd2, Outbuf::DoublePair([sum_x, sum_x2])) => {
            let var = if na || n <= 1 {
                NA_REAL
            } else {
                let n = n as f64;
                (sum_x2 - sum_x * sum_x / n) / (n - 1.0)
            };
            SummaryValue::Double(finish_spread(op.opcode, var))
        }
        (opcode, outbuf) => {
            return Err(SummarizeError::Internal(format!(
                "no postprocessing defined for {}() with buffer {:?}",
                opcode, outbuf
            )))
        }
    };
    Ok(value)
}

fn finish_spread(opcode: Opcode, var: f64) -> f64 {
    match opcode {
        Opcode::Sd1 | Opcode::Sd2 => var.sqrt(),
        _ => var,
    }
}
