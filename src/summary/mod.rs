//! Reduction semantics
//!
//! - `op`: opcodes and the immutable `SummarizeOp` descriptor
//! - `result`: the mutable `SummarizeResult` accumulator
//! - `vector`: closed-form folds of stored values, ones and zeros
//! - `postprocess`: accumulator -> `SummaryValue`

mod op;
mod postprocess;
mod result;
mod value;
mod vector;

pub use op::{Opcode, SummarizeOp, ALL_OPCODES};
pub use postprocess::postprocess;
pub use result::{Outbuf, OutbufStatus, SummarizeResult};
pub use value::{OutputType, SummaryValue};
pub use vector::{
    count_nas, fold_repeated, has_any_na, summarize_ones, summarize_values, summarize_zeros,
};
