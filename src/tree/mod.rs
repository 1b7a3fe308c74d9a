//! Sparse Vector Tree
//!
//! Recursive sparse representation of an N-dimensional array:
//! internal nodes are ordered child lists along the outermost dimension,
//! leaves are rank-1 sparse vectors, and `Empty` stands for all-zero
//! subtrees. Zeros are never stored.

mod element;
mod leaf;
mod node;
mod traversal;

pub use element::{ElementType, Scalar, NA_INTEGER, NA_REAL};
pub use leaf::summarize_leaf;
pub use node::{Leaf, LeafValues, LeafValuesRef, Svt};
pub use traversal::{dense_len, walk_svt, WalkStatus};
