//! Operator pairs
//!
//! An operator pair bundles the transform applied when an operator sees a
//! single operand with the fold used when it sees two or more. Subtraction
//! is negation plus pairwise difference, division is reciprocal plus
//! pairwise quotient.

use crate::tensor::Element;

#[derive(Clone, Copy)]
pub struct OperatorPair<T> {
    pub unary: fn(T) -> T,
    pub binary: fn(T, T) -> T,
}

impl<T> OperatorPair<T> {
    pub const fn new(unary: fn(T) -> T, binary: fn(T, T) -> T) -> Self { OperatorPair { unary, binary } }
}

impl<T: Element> OperatorPair<T> {
    pub fn add() -> Self { OperatorPair::new(identity::<T>, |a, b| a + b) }
    pub fn subtract() -> Self { OperatorPair::new(|a: T| -a, |a, b| a - b) }
    pub fn multiply() -> Self { OperatorPair::new(identity::<T>, |a, b| a * b) }
    pub fn divide() -> Self { OperatorPair::new(|a: T| T::one() / a, |a, b| a / b) }

    /// Folds `values` left to right with `binary`, or applies `unary` to a lone value.
    pub fn fold(&self, values: &[T]) -> Option<T> {
        match values {
            [] => None,
            [only] => Some((self.unary)(*only)),
            [first, rest @ ..] => Some(rest.iter().fold(*first, |acc, v| (self.binary)(acc, *v))),
        }
    }
}

impl<T> std::fmt::Debug for OperatorPair<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorPair").finish_non_exhaustive()
    }
}

fn identity<T>(a: T) -> T { a }
