//! Element types stored in SVT leaves
//!
//! Integer elements reserve `i32::MIN` as NA. Double elements treat every
//! NaN as NA.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Integer NA sentinel
pub const NA_INTEGER: i32 = i32::MIN;

/// Double NA value (any NaN is read back as NA)
pub const NA_REAL: f64 = f64::NAN;

/// Element type of an SVT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum ElementType {
    /// 32-bit integers (also used for logical data)
    Integer,
    /// 64-bit floating point
    Double,
}

impl ElementType {
    /// Canonical name
    pub fn name(&self) -> &'static str {
        match self {
            ElementType::Integer => "integer",
            ElementType::Double => "double",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementType {
    type Err = crate::SummarizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "integer" | "int" | "logical" => Ok(ElementType::Integer),
            "double" | "numeric" | "real" => Ok(ElementType::Double),
            other => Err(crate::SummarizeError::InvalidRequest(format!(
                "unknown element type \"{}\"",
                other
            ))),
        }
    }
}

/// One element value, as folded into an accumulator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    /// Integer value (`NA_INTEGER` for NA)
    Int(i32),
    /// Double value (NaN for NA)
    Double(f64),
}

impl Scalar {
    /// The zero of the given type
    pub fn zero(element_type: ElementType) -> Self {
        match element_type {
            ElementType::Integer => Scalar::Int(0),
            ElementType::Double => Scalar::Double(0.0),
        }
    }

    /// The canonical "one" implied by lacunar leaves
    pub fn one(element_type: ElementType) -> Self {
        match element_type {
            ElementType::Integer => Scalar::Int(1),
            ElementType::Double => Scalar::Double(1.0),
        }
    }

    /// The NA of the given type
    pub fn na(element_type: ElementType) -> Self {
        match element_type {
            ElementType::Integer => Scalar::Int(NA_INTEGER),
            ElementType::Double => Scalar::Double(NA_REAL),
        }
    }

    /// Whether this value is NA
    #[inline]
    pub fn is_na(self) -> bool {
        match self {
            Scalar::Int(v) => v == NA_INTEGER,
            Scalar::Double(v) => v.is_nan(),
        }
    }

    /// Whether this value is the zero of its type
    #[inline]
    pub fn is_zero(self) -> bool {
        match self {
            Scalar::Int(v) => v == 0,
            Scalar::Double(v) => v == 0.0,
        }
    }

    /// Widen to f64 (NA becomes NaN)
    #[inline]
    pub fn as_f64(self) -> f64 {
        match self {
            Scalar::Int(v) if v == NA_INTEGER => NA_REAL,
            Scalar::Int(v) => v as f64,
            Scalar::Double(v) => v,
        }
    }

    /// Element type of this value
    pub fn element_type(self) -> ElementType {
        match self {
            Scalar::Int(_) => ElementType::Integer,
            Scalar::Double(_) => ElementType::Double,
        }
    }
}
