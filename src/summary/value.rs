//! Final typed output of a reduction

use std::fmt;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Output type of an opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputType {
    /// Boolean (with NA)
    Logical,
    /// 32-bit integer (with NA)
    Integer,
    /// Double
    Double,
}

/// Result value; `range` and `sum_X_X2` yield pairs
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum SummaryValue {
    /// `None` is NA
    Logical(Option<bool>),
    /// `None` is NA
    Integer(Option<i32>),
    /// NaN is NA
    Double(f64),
    /// `{min, max}` on integer input
    IntegerPair([Option<i32>; 2]),
    /// `{min, max}` on double input, or `{sum(x), sum(x^2)}`
    DoublePair([f64; 2]),
}

impl SummaryValue {
    /// Whether the value (or any half of a pair) is NA
    pub fn is_na(&self) -> bool {
        match self {
            SummaryValue::Logical(v) => v.is_none(),
            SummaryValue::Integer(v) => v.is_none(),
            SummaryValue::Double(v) => v.is_nan(),
            SummaryValue::IntegerPair(p) => p.iter().any(Option::is_none),
            SummaryValue::DoublePair(p) => p.iter().any(|v| v.is_nan()),
        }
    }

    /// Scalar value widened to f64 (NA becomes NaN, pairs give `None`)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SummaryValue::Logical(v) => Some(v.map_or(f64::NAN, |b| if b { 1.0 } else { 0.0 })),
            SummaryValue::Integer(v) => Some(v.map_or(f64::NAN, f64::from)),
            SummaryValue::Double(v) => Some(*v),
            SummaryValue::IntegerPair(_) | SummaryValue::DoublePair(_) => None,
        }
    }

    /// Output type of the value
    pub fn output_type(&self) -> OutputType {
        match self {
            SummaryValue::Logical(_) => OutputType::Logical,
            SummaryValue::Integer(_) | SummaryValue::IntegerPair(_) => OutputType::Integer,
            SummaryValue::Double(_) | SummaryValue::DoublePair(_) => OutputType::Double,
        }
    }
}

fn fmt_int(v: Option<i32>) -> String {
    v.map_or_else(|| "NA".to_string(), |v| v.to_string())
}

fn fmt_double(v: f64) -> String {
    if v.is_nan() {
        "NA".to_string()
    } else {
        v.to_string()
    }
}

impl fmt::Display for SummaryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryValue::Logical(None) => f.write_str("NA"),
            SummaryValue::Logical(Some(b)) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
            SummaryValue::Integer(v) => f.write_str(&fmt_int(*v)),
            SummaryValue::Double(v) => f.write_str(&fmt_double(*v)),
            SummaryValue::IntegerPair([a, b]) => write!(f, "{} {}", fmt_int(*a), fmt_int(*b)),
            SummaryValue::DoublePair([a, b]) => {
                write!(f, "{} {}", fmt_double(*a), fmt_double(*b))
            }
        }
    }
}
