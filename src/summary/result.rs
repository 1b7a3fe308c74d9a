//! Mutable accumulator threaded through one reduction
//!
//! Invariant at every point of the walk: 0 <= nacount <= nzcount <= totalcount

use super::op::{Opcode, SummarizeOp};
use crate::tree::ElementType;

/// Output buffer status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutbufStatus {
    /// No value folded in yet (only meaningful for extremes)
    Unset,
    /// Holds a value that later data may still change
    Set,
    /// Holds a value no further data can change; the walk stops
    SetWithBreakingValue,
}

/// Typed running value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outbuf {
    /// NA count
    Count(u64),
    /// Three-valued logical (`None` is NA)
    Logical(Option<bool>),
    /// Integer extreme (`NA_INTEGER` for NA)
    Int(i32),
    /// Integer `{min, max}`
    IntPair([i32; 2]),
    /// Integer sum, widened
    Long(i64),
    /// Double running value
    Double(f64),
    /// Double `{min, max}` or `{sum(x), sum(x^2)}`
    DoublePair([f64; 2]),
}

/// Accumulator for one top-level call
#[derive(Debug, Clone, PartialEq)]
pub struct SummarizeResult {
    /// Length of the virtual vector summarized so far
    pub totalcount: u64,
    /// Stored (non-implicit) elements seen so far, NAs included
    pub nzcount: u64,
    /// NAs skipped (only counted when `na_rm` is set)
    pub nacount: u64,
    /// Output buffer status
    pub status: OutbufStatus,
    /// Running value
    pub outbuf: Outbuf,
    /// Integer overflow occurred
    pub warn: bool,
}

impl SummarizeResult {
    /// Fresh accumulator for `op`
    pub fn new(op: &SummarizeOp) -> Self {
        let integer = op.in_type == ElementType::Integer;
        let outbuf = match op.opcode {
            Opcode::CountNas => Outbuf::Count(0),
            Opcode::AnyNa | Opcode::Any => Outbuf::Logical(Some(false)),
            Opcode::All => Outbuf::Logical(Some(true)),
            Opcode::Min | Opcode::Max if integer => Outbuf::Int(0),
            Opcode::Min | Opcode::Max => Outbuf::Double(0.0),
            Opcode::Range if integer => Outbuf::IntPair([0, 0]),
            Opcode::Range => Outbuf::DoublePair([0.0, 0.0]),
            Opcode::Sum if integer => Outbuf::Long(0),
            Opcode::Prod => Outbuf::Double(1.0),
            Opcode::Sum | Opcode::Mean | Opcode::CenteredX2Sum | Opcode::Var1 | Opcode::Sd1 => {
                Outbuf::Double(0.0)
            }
            Opcode::SumXX2 | Opcode::Var2 | Opcode::Sd2 => Outbuf::DoublePair([0.0, 0.0]),
        };
        Self {
            totalcount: 0,
            nzcount: 0,
            nacount: 0,
            status: OutbufStatus::Unset,
            outbuf,
            warn: false,
        }
    }

    /// Whether the walk can stop
    #[inline]
    pub fn is_broken(&self) -> bool {
        self.status == OutbufStatus::SetWithBreakingValue
    }

    /// Store a final value and stop the walk
    #[inline]
    pub(crate) fn set_breaking(&mut self, outbuf: Outbuf) {
        self.outbuf = outbuf;
        self.status = OutbufStatus::SetWithBreakingValue;
    }

    /// Number of elements that were not dropped as NA
    #[inline]
    pub fn retained(&self) -> u64 {
        self.totalcount - self.nacount
    }

    /// Check `0 <= nacount <= nzcount <= totalcount`
    pub fn counts_consistent(&self) -> bool {
        self.nacount <= self.nzcount && self.nzcount <= self.totalcount
    }
}
