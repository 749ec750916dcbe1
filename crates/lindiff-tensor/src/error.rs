//! Error handling for the reference algebra

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("{op}: expected at least one operand")]
    Empty { op: &'static str },
    #[error("{op}: arity mismatch: expected {expected}, got {got}")]
    Arity { op: &'static str, expected: usize, got: usize },
    #[error("{op}: ragged tensor, children have shapes {first:?} and {other:?}")]
    Ragged { op: &'static str, first: Vec<usize>, other: Vec<usize> },
    #[error("{op}: operand {index} has rank {found}, expected {expected}")]
    RankMismatch { op: &'static str, index: usize, expected: usize, found: usize },
    #[error("{op}: dimension mismatch: {expected:?} vs {found:?}")]
    DimensionMismatch { op: &'static str, expected: Vec<usize>, found: Vec<usize> },
    #[error("{op}: operand {index} must be a scalar, got a vector of length {len}")]
    NotScalar { op: &'static str, index: usize, len: usize },
}

pub type ShapeResult<T> = Result<T, ShapeError>;

impl ShapeError {
    pub fn empty(op: &'static str) -> Self { ShapeError::Empty { op } }
    pub fn arity(op: &'static str, expected: usize, got: usize) -> Self { ShapeError::Arity { op, expected, got } }
    pub fn rank(op: &'static str, index: usize, expected: usize, found: usize) -> Self {
        ShapeError::RankMismatch { op, index, expected, found }
    }
    pub fn dims(op: &'static str, expected: Vec<usize>, found: Vec<usize>) -> Self {
        ShapeError::DimensionMismatch { op, expected, found }
    }

    /// Rewrites the operation name, keeping the rest of the diagnosis.
    pub fn within(self, op: &'static str) -> Self {
        match self {
            ShapeError::Empty { .. } => ShapeError::Empty { op },
            ShapeError::Arity { expected, got, .. } => ShapeError::Arity { op, expected, got },
            ShapeError::Ragged { first, other, .. } => ShapeError::Ragged { op, first, other },
            ShapeError::RankMismatch { index, expected, found, .. } => ShapeError::RankMismatch { op, index, expected, found },
            ShapeError::DimensionMismatch { expected, found, .. } => ShapeError::DimensionMismatch { op, expected, found },
            ShapeError::NotScalar { index, len, .. } => ShapeError::NotScalar { op, index, len },
        }
    }
}
