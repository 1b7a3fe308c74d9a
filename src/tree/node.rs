//! SVT node model
//!
//! An SVT of rank n is either `Empty` (all zeros), a `Leaf` (rank 1), or an
//! `Internal` node whose children are SVTs of rank n-1.
//!   Leaf encodings:
//!     Lacunar:  offsets only, every stored value is the type's one
//!     Standard: offsets + parallel non-zero values

use std::fmt;

use super::element::{ElementType, Scalar};
use crate::SummarizeError;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Sparse Vector Tree node
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Svt {
    /// Subtree made entirely of zeros
    Empty,
    /// One child per index of the outermost remaining dimension
    Internal(Vec<Svt>),
    /// Rank-1 sparse vector
    Leaf(Leaf),
}

impl Svt {
    /// Number of stored (non-implicit) elements in this subtree
    pub fn nzcount(&self) -> usize {
        match self {
            Svt::Empty => 0,
            Svt::Leaf(leaf) => leaf.len(),
            Svt::Internal(children) => children.iter().map(Svt::nzcount).sum(),
        }
    }

    /// Whether this node is `Empty`
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Svt::Empty)
    }

    /// Check the whole tree against `dims` and `element_type`
    ///
    /// The walker performs the same checks lazily on the nodes it visits;
    /// this eager variant is for callers receiving trees from elsewhere.
    pub fn validate(
        &self,
        dims: &[usize],
        element_type: ElementType,
    ) -> Result<(), SummarizeError> {
        if dims.is_empty() {
            return Err(SummarizeError::InvalidRequest(
                "dims must have at least one dimension".to_string(),
            ));
        }
        self.validate_rec(dims, element_type)
    }

    fn validate_rec(
        &self,
        dims: &[usize],
        element_type: ElementType,
    ) -> Result<(), SummarizeError> {
        let ndim = dims.len();
        match self {
            Svt::Empty => Ok(()),
            Svt::Leaf(leaf) => {
                if ndim != 1 {
                    return Err(SummarizeError::Internal(format!(
                        "leaf found at rank {}",
                        ndim
                    )));
                }
                leaf.validate(dims[0], element_type)
            }
            Svt::Internal(children) => {
                check_internal(children, dims)?;
                children
                    .iter()
                    .try_for_each(|child| child.validate_rec(&dims[..ndim - 1], element_type))
            }
        }
    }
}

/// Check an internal node's shape against the remaining dims
pub(crate) fn check_internal(children: &[Svt], dims: &[usize]) -> Result<(), SummarizeError> {
    let ndim = dims.len();
    if ndim < 2 {
        return Err(SummarizeError::Internal(
            "internal node found at rank 1".to_string(),
        ));
    }
    let extent = dims[ndim - 1];
    if children.len() != extent {
        return Err(SummarizeError::Internal(format!(
            "internal node has {} children but dimension {} has extent {}",
            children.len(),
            ndim - 1,
            extent
        )));
    }
    Ok(())
}

/// Typed non-zero values of a standard leaf
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum LeafValues {
    /// Integer values (`NA_INTEGER` allowed)
    Integer(Vec<i32>),
    /// Double values (NaN allowed)
    Double(Vec<f64>),
}

impl LeafValues {
    /// Number of values
    pub fn len(&self) -> usize {
        match self {
            LeafValues::Integer(v) => v.len(),
            LeafValues::Double(v) => v.len(),
        }
    }

    /// Whether there are no values
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element type of the values
    pub fn element_type(&self) -> ElementType {
        match self {
            LeafValues::Integer(_) => ElementType::Integer,
            LeafValues::Double(_) => ElementType::Double,
        }
    }

    /// Borrowed view
    pub fn view(&self) -> LeafValuesRef<'_> {
        match self {
            LeafValues::Integer(v) => LeafValuesRef::Integer(v),
            LeafValues::Double(v) => LeafValuesRef::Double(v),
        }
    }
}

/// Borrowed view of a standard leaf's values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LeafValuesRef<'a> {
    /// Integer values
    Integer(&'a [i32]),
    /// Double values
    Double(&'a [f64]),
}

impl LeafValuesRef<'_> {
    /// Number of values
    pub fn len(&self) -> usize {
        match self {
            LeafValuesRef::Integer(v) => v.len(),
            LeafValuesRef::Double(v) => v.len(),
        }
    }

    /// Whether there are no values
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at position `k`
    #[inline]
    pub fn get(&self, k: usize) -> Scalar {
        match self {
            LeafValuesRef::Integer(v) => Scalar::Int(v[k]),
            LeafValuesRef::Double(v) => Scalar::Double(v[k]),
        }
    }
}

/// Rank-1 leaf
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Leaf {
    /// Offsets whose values are all the type's one
    Lacunar {
        /// Strictly increasing offsets
        offsets: Vec<usize>,
    },
    /// Offsets with parallel non-zero values
    Standard {
        /// Strictly increasing offsets
        offsets: Vec<usize>,
        /// One non-zero value per offset
        values: LeafValues,
    },
}

impl Leaf {
    /// Lacunar leaf from offsets
    pub fn lacunar(offsets: Vec<usize>) -> Self {
        Leaf::Lacunar { offsets }
    }

    /// Standard integer leaf
    pub fn integer(offsets: Vec<usize>, values: Vec<i32>) -> Self {
        Leaf::Standard {
            offsets,
            values: LeafValues::Integer(values),
        }
    }

    /// Standard double leaf
    pub fn double(offsets: Vec<usize>, values: Vec<f64>) -> Self {
        Leaf::Standard {
            offsets,
            values: LeafValues::Double(values),
        }
    }

    /// Decompose into `(values, offsets)`; values are `None` for a lacunar leaf
    pub fn unzip(&self) -> (Option<LeafValuesRef<'_>>, &[usize]) {
        match self {
            Leaf::Lacunar { offsets } => (None, offsets),
            Leaf::Standard { offsets, values } => (Some(values.view()), offsets),
        }
    }

    /// Stored offsets
    pub fn offsets(&self) -> &[usize] {
        self.unzip().1
    }

    /// Number of stored elements
    pub fn len(&self) -> usize {
        self.offsets().len()
    }

    /// Whether the leaf stores nothing
    pub fn is_empty(&self) -> bool {
        self.offsets().is_empty()
    }

    /// Whether the leaf is lacunar
    pub fn is_lacunar(&self) -> bool {
        matches!(self, Leaf::Lacunar { .. })
    }

    /// Check the leaf invariants for a leaf of dense length `dim0`
    pub fn validate(&self, dim0: usize, element_type: ElementType) -> Result<(), SummarizeError> {
        let (values, offsets) = self.unzip();
        if offsets.len() > dim0 {
            return Err(SummarizeError::Internal(format!(
                "leaf stores {} offsets but has length {}",
                offsets.len(),
                dim0
            )));
        }
        if let Some(&last) = offsets.last() {
            if last >= dim0 {
                return Err(SummarizeError::Internal(format!(
                    "leaf offset {} out of bounds for length {}",
                    last, dim0
                )));
            }
        }
        if let Some(pos) = offsets.windows(2).position(|w| w[0] >= w[1]) {
            return Err(SummarizeError::Internal(format!(
                "leaf offsets not strictly increasing at position {}",
                pos + 1
            )));
        }
        if let Some(values) = values {
            if values.len() != offsets.len() {
                return Err(SummarizeError::Internal(format!(
                    "leaf has {} offsets but {} values",
                    offsets.len(),
                    values.len()
                )));
            }
            let values_type = match values {
                LeafValuesRef::Integer(_) => ElementType::Integer,
                LeafValuesRef::Double(_) => ElementType::Double,
            };
            if values_type != element_type {
                return Err(SummarizeError::Internal(format!(
                    "leaf holds {} values in a {} array",
                    values_type, element_type
                )));
            }
            if let Some(k) = (0..values.len()).find(|&k| values.get(k).is_zero()) {
                return Err(SummarizeError::Internal(format!(
                    "leaf stores an explicit zero at offset {}",
                    offsets[k]
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leaf::Lacunar { offsets } => write!(f, "lacunar[{}]", offsets.len()),
            Leaf::Standard { offsets, values } => {
                write!(f, "{}[{}]", values.element_type(), offsets.len())
            }
        }
    }
}
