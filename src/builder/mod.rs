//! Sparse buffer tree builder
//!
//! A sparse buffer tree has the shape of an SVT but its leaves are
//! `SparseBuf`s that accept writes in any order. `build()` freezes every
//! buffer into a leaf and collapses subtrees left without data to `Empty`,
//! so the result satisfies the SVT invariants by construction.

mod sparse_buf;

pub use sparse_buf::SparseBuf;

use tracing::debug;

use crate::tree::{ElementType, Scalar, Svt};
use crate::SummarizeError;

#[derive(Debug)]
enum SbtNode {
    Empty,
    Internal(Vec<SbtNode>),
    Leaf(SparseBuf),
}

impl SbtNode {
    fn freeze(self, lacunar: bool) -> Svt {
        match self {
            SbtNode::Empty => Svt::Empty,
            SbtNode::Leaf(buf) => buf.into_leaf(lacunar).map_or(Svt::Empty, Svt::Leaf),
            SbtNode::Internal(children) => {
                let children: Vec<Svt> = children.into_iter().map(|c| c.freeze(lacunar)).collect();
                if children.iter().all(Svt::is_empty) {
                    Svt::Empty
                } else {
                    Svt::Internal(children)
                }
            }
        }
    }
}

/// Builds an SVT from element writes at arbitrary coordinates
#[derive(Debug)]
pub struct SvtBuilder {
    dims: Vec<usize>,
    element_type: ElementType,
    lacunar: bool,
    root: SbtNode,
    writes: usize,
}

impl SvtBuilder {
    /// Builder for an array of shape `dims` (innermost first)
    pub fn new(dims: &[usize], element_type: ElementType) -> Result<Self, SummarizeError> {
        if dims.is_empty() {
            return Err(SummarizeError::InvalidRequest(
                "dims must have at least one dimension".to_string(),
            ));
        }
        Ok(Self {
            dims: dims.to_vec(),
            element_type,
            lacunar: true,
            root: SbtNode::Empty,
            writes: 0,
        })
    }

    /// Whether all-one leaves are stored lacunar (default: true)
    pub fn with_lacunar(mut self, lacunar: bool) -> Self {
        self.lacunar = lacunar;
        self
    }

    /// Shape of the array being built
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Element type of the array being built
    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// Write an integer element
    pub fn push_int(&mut self, coords: &[usize], value: i32) -> Result<(), SummarizeError> {
        self.push(coords, Scalar::Int(value))
    }

    /// Write a double element
    pub fn push_double(&mut self, coords: &[usize], value: f64) -> Result<(), SummarizeError> {
        self.push(coords, Scalar::Double(value))
    }

    /// Write one element; later writes to the same coordinates win
    pub fn push(&mut self, coords: &[usize], value: Scalar) -> Result<(), SummarizeError> {
        if value.element_type() != self.element_type {
            return Err(SummarizeError::InvalidRequest(format!(
                "cannot write a {} value into a {} array",
                value.element_type(),
                self.element_type
            )));
        }
        if coords.len() != self.dims.len() {
            return Err(SummarizeError::InvalidRequest(format!(
                "expected {} coordinates, got {}",
                self.dims.len(),
                coords.len()
            )));
        }
        if let Some(along) = coords.iter().zip(&self.dims).position(|(&c, &d)| c >= d) {
            return Err(SummarizeError::InvalidRequest(format!(
                "coordinate {} out of bounds for dimension {} of extent {}",
                coords[along], along, self.dims[along]
            )));
        }

        let element_type = self.element_type;
        let mut node = &mut self.root;
        for along in (1..self.dims.len()).rev() {
            if let SbtNode::Empty = node {
                *node = SbtNode::Internal((0..self.dims[along]).map(|_| SbtNode::Empty).collect());
            }
            node = match node {
                SbtNode::Internal(children) => &mut children[coords[along]],
                _ => {
                    return Err(SummarizeError::Internal(
                        "buffer tree has a leaf above rank 1".to_string(),
                    ))
                }
            };
        }
        if let SbtNode::Empty = node {
            *node = SbtNode::Leaf(SparseBuf::new(element_type));
        }
        match node {
            SbtNode::Leaf(buf) => buf.push(coords[0], value)?,
            _ => {
                return Err(SummarizeError::Internal(
                    "buffer tree has an internal node at rank 1".to_string(),
                ))
            }
        }
        self.writes += 1;
        Ok(())
    }

    /// Freeze into an SVT
    pub fn build(self) -> Svt {
        debug!(
            dims = ?self.dims,
            element_type = %self.element_type,
            writes = self.writes,
            lacunar = self.lacunar,
            "building svt"
        );
        self.root.freeze(self.lacunar)
    }
}
