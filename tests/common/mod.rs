#![allow(dead_code)]

use proptest::prelude::*;
use svtree::{ElementType, Opcode, Scalar, SummaryValue, Svt, SvtBuilder, NA_INTEGER, NA_REAL};

/// Dense array in innermost-first order: element `(i0, i1, ...)` lives at
/// `i0 + d0 * (i1 + d1 * (...))`.
#[derive(Debug, Clone)]
pub struct DenseArray {
    pub dims: Vec<usize>,
    pub data: Vec<Scalar>,
}

impl DenseArray {
    pub fn coords(&self, mut index: usize) -> Vec<usize> {
        self.dims
            .iter()
            .map(|&d| {
                let c = index % d;
                index /= d;
                c
            })
            .collect()
    }

    /// Build the SVT by pushing every non-zero element through the builder
    pub fn to_svt(&self, element_type: ElementType, lacunar: bool) -> Svt {
        let mut builder = SvtBuilder::new(&self.dims, element_type)
            .expect("valid dims")
            .with_lacunar(lacunar);
        for (index, &x) in self.data.iter().enumerate() {
            if !x.is_zero() {
                builder.push(&self.coords(index), x).expect("in-bounds write");
            }
        }
        builder.build()
    }

    pub fn nnz(&self) -> usize {
        self.data.iter().filter(|x| !x.is_zero()).count()
    }

    pub fn na_count(&self) -> usize {
        self.data.iter().filter(|x| x.is_na()).count()
    }
}

/// Dense-semantics reference for every opcode
///
/// Centered opcodes use the mean of the retained values as center.
pub fn reference(
    array: &DenseArray,
    element_type: ElementType,
    opcode: Opcode,
    na_rm: bool,
) -> SummaryValue {
    let has_na = array.data.iter().any(|x| x.is_na());
    let na_rm = na_rm && opcode.takes_na_rm();
    let kept: Vec<Scalar> = array.data.iter().copied().filter(|x| !x.is_na()).collect();
    let xs: Vec<f64> = kept.iter().map(|x| x.as_f64()).collect();
    let na_out = has_na && !na_rm;
    let int = element_type == ElementType::Integer;

    match opcode {
        Opcode::CountNas => SummaryValue::Double(array.na_count() as f64),
        Opcode::AnyNa => SummaryValue::Logical(Some(has_na)),
        Opcode::Any => {
            if kept.iter().any(|x| !x.is_zero()) {
                SummaryValue::Logical(Some(true))
            } else if na_out {
                SummaryValue::Logical(None)
            } else {
                SummaryValue::Logical(Some(false))
            }
        }
        Opcode::All => {
            if kept.iter().any(|x| x.is_zero()) {
                SummaryValue::Logical(Some(false))
            } else if na_out {
                SummaryValue::Logical(None)
            } else {
                SummaryValue::Logical(Some(true))
            }
        }
        Opcode::Min | Opcode::Max | Opcode::Range => {
            let lo = xs.iter().copied().reduce(f64::min);
            let hi = xs.iter().copied().reduce(f64::max);
            let (lo, hi) = if na_out { (None, None) } else { (lo, hi) };
            match (opcode, int) {
                (Opcode::Min, true) => SummaryValue::Integer(lo.map(|v| v as i32)),
                (Opcode::Max, true) => SummaryValue::Integer(hi.map(|v| v as i32)),
                (Opcode::Min, false) => SummaryValue::Double(lo.unwrap_or(NA_REAL)),
                (Opcode::Max, false) => SummaryValue::Double(hi.unwrap_or(NA_REAL)),
                (_, true) => {
                    SummaryValue::IntegerPair([lo.map(|v| v as i32), hi.map(|v| v as i32)])
                }
                (_, false) => {
                    SummaryValue::DoublePair([lo.unwrap_or(NA_REAL), hi.unwrap_or(NA_REAL)])
                }
            }
        }
        Opcode::Sum if int => {
            let s: i64 = kept
                .iter()
                .map(|x| match x {
                    Scalar::Int(v) => i64::from(*v),
                    Scalar::Double(_) => unreachable!(),
                })
                .sum();
            let in_range = s.abs() <= i64::from(i32::MAX);
            SummaryValue::Integer((!na_out && in_range).then_some(s as i32))
        }
        _ if na_out => match opcode {
            Opcode::SumXX2 => SummaryValue::DoublePair([NA_REAL, NA_REAL]),
            _ => SummaryValue::Double(NA_REAL),
        },
        Opcode::Sum => SummaryValue::Double(xs.iter().sum()),
        Opcode::Prod => SummaryValue::Double(xs.iter().product()),
        Opcode::Mean => SummaryValue::Double(mean(&xs)),
        Opcode::CenteredX2Sum => SummaryValue::Double(centered_x2_sum(&xs)),
        Opcode::SumXX2 => {
            SummaryValue::DoublePair([xs.iter().sum(), xs.iter().map(|x| x * x).sum()])
        }
        Opcode::Var1 | Opcode::Var2 => SummaryValue::Double(variance(&xs)),
        Opcode::Sd1 | Opcode::Sd2 => SummaryValue::Double(variance(&xs).sqrt()),
    }
}

fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        NA_REAL
    } else {
        xs.iter().sum::<f64>() / xs.len() as f64
    }
}

fn centered_x2_sum(xs: &[f64]) -> f64 {
    let m = mean(xs);
    xs.iter().map(|x| (x - m) * (x - m)).sum()
}

fn variance(xs: &[f64]) -> f64 {
    if xs.len() <= 1 {
        NA_REAL
    } else {
        centered_x2_sum(xs) / (xs.len() - 1) as f64
    }
}

fn close(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b || (a - b).abs() <= 1e-9 * b.abs().max(1.0)
}

/// Equality with NA matching NA and a relative tolerance on doubles
pub fn same_value(actual: &SummaryValue, expected: &SummaryValue) -> bool {
    match (actual, expected) {
        (SummaryValue::Double(a), SummaryValue::Double(b)) => close(*a, *b),
        (SummaryValue::DoublePair([a0, a1]), SummaryValue::DoublePair([b0, b1])) => {
            close(*a0, *b0) && close(*a1, *b1)
        }
        _ => actual == expected,
    }
}

/// Small exact values: zeros (often), ones, NAs, and a few others
pub fn element(element_type: ElementType) -> BoxedStrategy<Scalar> {
    match element_type {
        ElementType::Integer => prop_oneof![
            6 => Just(Scalar::Int(0)),
            2 => Just(Scalar::Int(1)),
            1 => Just(Scalar::Int(NA_INTEGER)),
            3 => (-9i32..=9).prop_map(Scalar::Int),
        ]
        .boxed(),
        ElementType::Double => prop_oneof![
            6 => Just(Scalar::Double(0.0)),
            2 => Just(Scalar::Double(1.0)),
            1 => Just(Scalar::Double(NA_REAL)),
            3 => (-36i32..=36).prop_map(|v| Scalar::Double(f64::from(v) / 4.0)),
        ]
        .boxed(),
    }
}

/// Arrays of rank 1 to 3 with extents 0 to 4
pub fn dense_array(element_type: ElementType) -> impl Strategy<Value = DenseArray> {
    proptest::collection::vec(0usize..=4, 1..=3).prop_flat_map(move |dims| {
        let len = dims.iter().product::<usize>();
        proptest::collection::vec(element(element_type), len)
            .prop_map(move |data| DenseArray { dims: dims.clone(), data })
    })
}

/// Same shape, no NAs
pub fn dense_array_without_na(element_type: ElementType) -> impl Strategy<Value = DenseArray> {
    dense_array(element_type).prop_map(|mut array| {
        for x in &mut array.data {
            if x.is_na() {
                *x = Scalar::zero(x.element_type());
            }
        }
        array
    })
}
