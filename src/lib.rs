//! # Sparse Vector Tree summarization
//!
//! This library reduces N-dimensional sparse arrays stored as Sparse Vector
//! Trees (SVTs) to scalar statistics without ever expanding implicit zeros.
//!
//! ## Core Algorithm
//!
//! 1. **Compile**: an opcode name plus options becomes an immutable `SummarizeOp`
//! 2. **Walk**: one accumulator is threaded depth-first through the tree
//! 3. **Fold**: each leaf folds its implicit zeros and lacunar ones in closed
//!    form and its stored values one by one
//! 4. **Postprocess**: counts and running sums become the typed result
//!
//! `any`/`all` and NA-propagating reductions stop reading as soon as the
//! result is decided. Variance-style opcodes without a caller-supplied
//! center walk the tree twice (mean, then centered squares).
//!
//! ## Usage Example
//!
//! ```
//! use svtree::{summarize, ElementType, Leaf, SummarizeRequest, SummaryValue, Svt};
//!
//! // 4 x 3 integer matrix: 5 at (0,0), -2 at (3,2)
//! let svt = Svt::Internal(vec![
//!     Svt::Leaf(Leaf::integer(vec![0], vec![5])),
//!     Svt::Empty,
//!     Svt::Leaf(Leaf::integer(vec![3], vec![-2])),
//! ]);
//! let request = SummarizeRequest::new("sum", ElementType::Integer)?;
//! let summary = summarize(&svt, &[4, 3], &request)?;
//! assert_eq!(summary.value, SummaryValue::Integer(Some(3)));
//! # Ok::<(), svtree::SummarizeError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod builder; // Sparse buffer tree builder
pub mod engine; // Top-level entry point and centering driver
pub mod stats; // Traversal accounting
pub mod summary; // Opcodes, accumulator, vector core, postprocessor
pub mod tree; // SVT node model and walker

// Re-exports for convenience
pub use builder::{SparseBuf, SvtBuilder};
pub use engine::{summarize, Summary, SummarizeRequest};
pub use stats::TraversalStats;
pub use summary::{Opcode, SummarizeOp, SummaryValue};
pub use tree::{ElementType, Leaf, LeafValues, Scalar, Svt, NA_INTEGER, NA_REAL};

use thiserror::Error;

/// Errors that can occur while summarizing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SummarizeError {
    /// Opcode name not recognized
    #[error("Unknown summarization operation \"{0}\"")]
    UnknownOp(String),

    /// Opcode not defined for the element type
    #[error("Operation {op} does not support {element_type} input")]
    UnsupportedType {
        /// Opcode name
        op: String,
        /// Offending element type
        element_type: ElementType,
    },

    /// Malformed request (options, dims)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Tree structure violates its invariants
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Summarize `svt` with the given operation name and options
///
/// Single-call form of [`summarize`]; no traversal statistics are collected.
pub fn summarize_svt(
    svt: &Svt,
    dims: &[usize],
    op_name: &str,
    na_rm: bool,
    center: Option<f64>,
    element_type: ElementType,
) -> Result<Summary, SummarizeError> {
    let request = SummarizeRequest::new(op_name, element_type)?
        .with_na_rm(na_rm)
        .with_center(center);
    summarize(svt, dims, &request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_op() {
        let err = summarize_svt(&Svt::Empty, &[3], "median", false, None, ElementType::Double)
            .unwrap_err();
        assert_eq!(err, SummarizeError::UnknownOp("median".to_string()));
    }

    #[test]
    fn test_any_on_double_unsupported() {
        let err =
            summarize_svt(&Svt::Empty, &[3], "any", false, None, ElementType::Double).unwrap_err();
        assert!(matches!(err, SummarizeError::UnsupportedType { .. }));
    }

    #[test]
    fn test_all_zero_array() {
        let summary =
            summarize_svt(&Svt::Empty, &[5, 2], "max", false, None, ElementType::Double).unwrap();
        assert_eq!(summary.value, SummaryValue::Double(0.0));
        assert_eq!(summary.totalcount, 10);
    }

    #[test]
    fn test_error_messages() {
        let err = SummarizeError::UnsupportedType {
            op: "all".to_string(),
            element_type: ElementType::Double,
        };
        assert_eq!(err.to_string(), "Operation all does not support double input");
    }
}
