//! Opcodes and the immutable operation descriptor
//!
//! Three calling interfaces:
//!   1. FUN(x)                  countNAs, anyNA
//!   2. FUN(x, na_rm)           any, all, min, max, range, sum, prod, mean,
//!                              sum_X_X2, var2, sd2
//!   3. FUN(x, na_rm, center)   centered_X2_sum, var1, sd1

use std::fmt;
use std::str::FromStr;

use crate::tree::ElementType;
use crate::SummarizeError;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Summarization opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Opcode {
    /// Number of NAs
    CountNas,
    /// Whether any NA is present
    AnyNa,
    /// Logical OR
    Any,
    /// Logical AND
    All,
    /// Minimum
    Min,
    /// Maximum
    Max,
    /// `{min, max}`
    Range,
    /// Sum
    Sum,
    /// Product
    Prod,
    /// Arithmetic mean
    Mean,
    /// Sum of `(x - center)^2`
    CenteredX2Sum,
    /// `{sum(x), sum(x^2)}`
    SumXX2,
    /// Variance from the centered sum of squares
    Var1,
    /// Variance from `sum(x)` and `sum(x^2)`
    Var2,
    /// Standard deviation from the centered sum of squares
    Sd1,
    /// Standard deviation from `sum(x)` and `sum(x^2)`
    Sd2,
}

/// Every opcode, in declaration order
pub const ALL_OPCODES: [Opcode; 16] = [
    Opcode::CountNas,
    Opcode::AnyNa,
    Opcode::Any,
    Opcode::All,
    Opcode::Min,
    Opcode::Max,
    Opcode::Range,
    Opcode::Sum,
    Opcode::Prod,
    Opcode::Mean,
    Opcode::CenteredX2Sum,
    Opcode::SumXX2,
    Opcode::Var1,
    Opcode::Var2,
    Opcode::Sd1,
    Opcode::Sd2,
];

impl Opcode {
    /// Symbolic name
    pub fn name(&self) -> &'static str {
        match self {
            Opcode::CountNas => "countNAs",
            Opcode::AnyNa => "anyNA",
            Opcode::Any => "any",
            Opcode::All => "all",
            Opcode::Min => "min",
            Opcode::Max => "max",
            Opcode::Range => "range",
            Opcode::Sum => "sum",
            Opcode::Prod => "prod",
            Opcode::Mean => "mean",
            Opcode::CenteredX2Sum => "centered_X2_sum",
            Opcode::SumXX2 => "sum_X_X2",
            Opcode::Var1 => "var1",
            Opcode::Var2 => "var2",
            Opcode::Sd1 => "sd1",
            Opcode::Sd2 => "sd2",
        }
    }

    /// Resolve a name for the given element type
    pub fn resolve(name: &str, element_type: ElementType) -> Result<Self, SummarizeError> {
        let opcode: Opcode = name.parse()?;
        if !opcode.supports(element_type) {
            return Err(SummarizeError::UnsupportedType {
                op: opcode.name().to_string(),
                element_type,
            });
        }
        Ok(opcode)
    }

    /// Whether the opcode accepts input of this element type
    pub fn supports(&self, element_type: ElementType) -> bool {
        match self {
            Opcode::Any | Opcode::All => element_type == ElementType::Integer,
            _ => true,
        }
    }

    /// Whether `na_rm` is a parameter (interfaces 2 and 3)
    pub fn takes_na_rm(&self) -> bool {
        !matches!(self, Opcode::CountNas | Opcode::AnyNa)
    }

    /// Whether `center` is a parameter (interface 3)
    pub fn takes_center(&self) -> bool {
        matches!(self, Opcode::CenteredX2Sum | Opcode::Var1 | Opcode::Sd1)
    }

    /// Whether the result is boolean
    pub fn is_logical(&self) -> bool {
        matches!(self, Opcode::AnyNa | Opcode::Any | Opcode::All)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Opcode {
    type Err = SummarizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_OPCODES
            .iter()
            .copied()
            .find(|op| op.name() == s)
            .ok_or_else(|| SummarizeError::UnknownOp(s.to_string()))
    }
}

/// Immutable operation descriptor, compiled once per top-level call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummarizeOp {
    /// Operation
    pub opcode: Opcode,
    /// Input element type
    pub in_type: ElementType,
    /// Drop NAs instead of propagating them
    pub na_rm: bool,
    /// Center for interface-3 opcodes (`None` means unset)
    pub center: Option<f64>,
}

impl SummarizeOp {
    /// Build a descriptor, checking the parameters against the opcode's interface
    pub fn new(
        opcode: Opcode,
        in_type: ElementType,
        na_rm: bool,
        center: Option<f64>,
    ) -> Result<Self, SummarizeError> {
        // NaN means unset.
        let center = center.filter(|c| !c.is_nan());
        if !opcode.supports(in_type) {
            return Err(SummarizeError::UnsupportedType {
                op: opcode.name().to_string(),
                element_type: in_type,
            });
        }
        if center.is_some() && !opcode.takes_center() {
            return Err(SummarizeError::InvalidRequest(format!(
                "{}() does not take a 'center' argument",
                opcode
            )));
        }
        Ok(Self {
            opcode,
            in_type,
            // Interface 1 has no na_rm: NAs are what it counts.
            na_rm: na_rm && opcode.takes_na_rm(),
            center,
        })
    }

    /// Same descriptor with another opcode and no center
    pub(crate) fn with_opcode(&self, opcode: Opcode) -> Self {
        Self {
            opcode,
            center: None,
            ..*self
        }
    }

    /// Same descriptor with a center
    pub(crate) fn with_center(&self, center: f64) -> Self {
        Self {
            center: Some(center),
            ..*self
        }
    }

    /// Whether the center still has to be computed by a first pass
    pub fn needs_center(&self) -> bool {
        self.opcode.takes_center() && self.center.is_none()
    }
}
