//! Recursive tensor values
//!
//! A tensor is either a single number or an ordered sequence of tensors.
//! Matrices and higher-rank values are vectors of vectors; consistent row
//! lengths are checked on demand by [`Tensor::shape`], never at construction.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use crate::error::{ShapeError, ShapeResult};

/// Numeric leaf type of a tensor.
pub trait Element:
    Copy
    + PartialEq
    + fmt::Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    fn one() -> Self;
    /// Bit-level equality: `-0.0` and `0.0` differ, a NaN equals itself.
    fn exact_eq(self, other: Self) -> bool;
}

impl Element for f64 {
    fn one() -> Self { 1.0 }
    fn exact_eq(self, other: Self) -> bool { self.to_bits() == other.to_bits() }
}

impl Element for i64 {
    fn one() -> Self { 1 }
    fn exact_eq(self, other: Self) -> bool { self == other }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Tensor<T> {
    Scalar(T),
    Vector(Vec<Tensor<T>>),
}

impl<T: Element> Tensor<T> {
    pub fn scalar(value: T) -> Self { Tensor::Scalar(value) }
    pub fn vector(items: Vec<Tensor<T>>) -> Self { Tensor::Vector(items) }
    pub fn from_slice(values: &[T]) -> Self { Tensor::Vector(values.iter().copied().map(Tensor::Scalar).collect()) }
    pub fn from_rows(rows: &[&[T]]) -> Self { Tensor::Vector(rows.iter().map(|row| Tensor::from_slice(row)).collect()) }

    /// Builds a tensor of the given shape, drawing leaves in row-major order.
    pub fn generate(shape: &[usize], next: &mut impl FnMut() -> T) -> Self {
        match shape.split_first() {
            None => Tensor::Scalar(next()),
            Some((&len, rest)) => Tensor::Vector((0..len).map(|_| Tensor::generate(rest, next)).collect()),
        }
    }

    /// Nesting depth measured along the first child.
    pub fn rank(&self) -> usize {
        match self {
            Tensor::Scalar(_) => 0,
            Tensor::Vector(items) => 1 + items.first().map_or(0, Tensor::rank),
        }
    }

    /// Lengths at each nesting level; fails if any level is ragged.
    pub fn shape(&self) -> ShapeResult<Vec<usize>> {
        match self {
            Tensor::Scalar(_) => Ok(vec![]),
            Tensor::Vector(items) => {
                let mut child_shape: Option<Vec<usize>> = None;
                for item in items {
                    let shape = item.shape()?;
                    match &child_shape {
                        None => child_shape = Some(shape),
                        Some(first) if *first != shape => {
                            return Err(ShapeError::Ragged { op: "shape", first: first.clone(), other: shape });
                        }
                        Some(_) => {}
                    }
                }
                let mut shape = vec![items.len()];
                shape.extend(child_shape.unwrap_or_default());
                Ok(shape)
            }
        }
    }

    pub fn leaves(&self) -> Vec<T> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<T>) {
        match self {
            Tensor::Scalar(v) => out.push(*v),
            Tensor::Vector(items) => items.iter().for_each(|item| item.collect_leaves(out)),
        }
    }

    /// Same structure with leaves compared by [`Element::exact_eq`].
    pub fn exact_eq(&self, other: &Tensor<T>) -> bool {
        match (self, other) {
            (Tensor::Scalar(a), Tensor::Scalar(b)) => Element::exact_eq(*a, *b),
            (Tensor::Vector(a), Tensor::Vector(b)) => a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.exact_eq(y)),
            _ => false,
        }
    }

    pub fn map_leaves(&self, f: &dyn Fn(T) -> T) -> Tensor<T> {
        match self {
            Tensor::Scalar(v) => Tensor::Scalar(f(*v)),
            Tensor::Vector(items) => Tensor::Vector(items.iter().map(|item| item.map_leaves(f)).collect()),
        }
    }
}

impl<T: fmt::Debug> fmt::Display for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tensor::Scalar(v) => write!(f, "{:?}", v),
            Tensor::Vector(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 { write!(f, " ")?; }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}
