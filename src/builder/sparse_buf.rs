//! Growable leaf buffer
//!
//! Writes are appended in arrival order; sorting, last-write-wins
//! deduplication and zero removal happen once, when the buffer is frozen
//! into a `Leaf`.

use crate::tree::{ElementType, Leaf, LeafValues, Scalar};
use crate::SummarizeError;

/// Per-leaf buffer of `(offset, value)` writes
#[derive(Debug, Clone, PartialEq)]
pub struct SparseBuf {
    offsets: Vec<usize>,
    values: LeafValues,
}

impl SparseBuf {
    /// Empty buffer for values of `element_type`
    pub fn new(element_type: ElementType) -> Self {
        let values = match element_type {
            ElementType::Integer => LeafValues::Integer(Vec::new()),
            ElementType::Double => LeafValues::Double(Vec::new()),
        };
        Self {
            offsets: Vec::new(),
            values,
        }
    }

    /// Record a write of `value` at `offset`
    pub fn push(&mut self, offset: usize, value: Scalar) -> Result<(), SummarizeError> {
        match (&mut self.values, value) {
            (LeafValues::Integer(vals), Scalar::Int(v)) => vals.push(v),
            (LeafValues::Double(vals), Scalar::Double(v)) => vals.push(v),
            (vals, value) => {
                return Err(SummarizeError::InvalidRequest(format!(
                    "cannot store a {} value in a {} buffer",
                    value.element_type(),
                    vals.element_type()
                )))
            }
        }
        self.offsets.push(offset);
        Ok(())
    }

    /// Number of writes recorded (duplicates and zeros included)
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether nothing was written
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Freeze into a leaf, or `None` if every surviving value is zero
    ///
    /// With `lacunar` set, a leaf whose values are all exactly one drops its
    /// values array.
    pub fn into_leaf(self, lacunar: bool) -> Option<Leaf> {
        let mut order: Vec<usize> = (0..self.offsets.len()).collect();
        // Stable, so among equal offsets the last write stays last.
        order.sort_by_key(|&k| self.offsets[k]);
        let view = self.values.view();
        let kept: Vec<usize> = order
            .iter()
            .enumerate()
            .filter(|&(i, &k)| {
                order
                    .get(i + 1)
                    .map_or(true, |&next| self.offsets[next] != self.offsets[k])
            })
            .map(|(_, &k)| k)
            .filter(|&k| !view.get(k).is_zero())
            .collect();
        if kept.is_empty() {
            return None;
        }

        let offsets: Vec<usize> = kept.iter().map(|&k| self.offsets[k]).collect();
        let element_type = self.values.element_type();
        if lacunar && kept.iter().all(|&k| view.get(k) == Scalar::one(element_type)) {
            return Some(Leaf::lacunar(offsets));
        }
        Some(match &self.values {
            LeafValues::Integer(vals) => {
                Leaf::integer(offsets, kept.iter().map(|&k| vals[k]).collect())
            }
            LeafValues::Double(vals) => {
                Leaf::double(offsets, kept.iter().map(|&k| vals[k]).collect())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NA_INTEGER;

    #[test]
    fn test_sorted_on_freeze() {
        let mut buf = SparseBuf::new(ElementType::Integer);
        buf.push(4, Scalar::Int(7)).unwrap();
        buf.push(1, Scalar::Int(-3)).unwrap();
        assert_eq!(buf.into_leaf(true), Some(Leaf::integer(vec![1, 4], vec![-3, 7])));
    }

    #[test]
    fn test_last_write_wins() {
        let mut buf = SparseBuf::new(ElementType::Integer);
        buf.push(2, Scalar::Int(5)).unwrap();
        buf.push(0, Scalar::Int(9)).unwrap();
        buf.push(2, Scalar::Int(6)).unwrap();
        buf.push(0, Scalar::Int(0)).unwrap();
        assert_eq!(buf.into_leaf(true), Some(Leaf::integer(vec![2], vec![6])));
    }

    #[test]
    fn test_all_zero_buffer_vanishes() {
        let mut buf = SparseBuf::new(ElementType::Double);
        buf.push(0, Scalar::Double(0.0)).unwrap();
        buf.push(3, Scalar::Double(-0.0)).unwrap();
        assert_eq!(buf.into_leaf(true), None);
    }

    #[test]
    fn test_ones_become_lacunar() {
        let mut buf = SparseBuf::new(ElementType::Double);
        buf.push(3, Scalar::Double(1.0)).unwrap();
        buf.push(0, Scalar::Double(1.0)).unwrap();
        assert_eq!(buf.clone().into_leaf(true), Some(Leaf::lacunar(vec![0, 3])));
        assert_eq!(buf.into_leaf(false), Some(Leaf::double(vec![0, 3], vec![1.0, 1.0])));
    }

    #[test]
    fn test_na_is_stored() {
        let mut buf = SparseBuf::new(ElementType::Integer);
        buf.push(1, Scalar::Int(NA_INTEGER)).unwrap();
        assert_eq!(buf.into_leaf(true), Some(Leaf::integer(vec![1], vec![NA_INTEGER])));
    }

    #[test]
    fn test_type_mismatch() {
        let mut buf = SparseBuf::new(ElementType::Integer);
        assert!(buf.push(0, Scalar::Double(2.0)).is_err());
        assert!(buf.is_empty());
    }
}
