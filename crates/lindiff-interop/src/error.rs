//! Failures raised by external callables, and the errors the adapter
//! normalizes them into

use std::fmt;
use thiserror::Error;
use crate::native::NativeKind;

/// Kind of failure an external callable can signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Root kind; every failure is an `Error`.
    Error,
    /// Contract or assertion violation.
    Assertion,
    /// Violated precondition; a specialization of `Assertion`.
    Precondition,
    Arity,
    Type,
    /// Depth or memory limit hit inside the callee.
    ResourceExhausted,
    /// The callee panicked.
    Panic,
}

impl FailureKind {
    pub fn is_a(self, expected: FailureKind) -> bool {
        self == expected
            || expected == FailureKind::Error
            || (expected == FailureKind::Assertion && self == FailureKind::Precondition)
    }

    pub fn name(self) -> &'static str {
        match self {
            FailureKind::Error => "Error", FailureKind::Assertion => "AssertionError",
            FailureKind::Precondition => "PreconditionError", FailureKind::Arity => "ArityError",
            FailureKind::Type => "TypeError",
            FailureKind::ResourceExhausted => "ResourceExhausted", FailureKind::Panic => "Panic",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self { Failure { kind, message: message.into() } }
    pub fn assertion(message: impl Into<String>) -> Self { Failure::new(FailureKind::Assertion, message) }
    pub fn precondition(message: impl Into<String>) -> Self { Failure::new(FailureKind::Precondition, message) }
    pub fn arity(expected: &str, got: usize) -> Self { Failure::new(FailureKind::Arity, format!("expected {} arguments, got {}", expected, got)) }
    pub fn type_error(message: impl Into<String>) -> Self { Failure::new(FailureKind::Type, message) }
    pub fn resource_exhausted(message: impl Into<String>) -> Self { Failure::new(FailureKind::ResourceExhausted, message) }
    pub fn panic(message: impl Into<String>) -> Self { Failure::new(FailureKind::Panic, message) }
}

pub type CallResult = Result<crate::native::Native, Failure>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InteropError {
    #[error("No error expected in {context}")]
    Call { context: String, #[source] source: Failure },
    #[error("Expected non-null in {context}")]
    UnexpectedNil { context: String },
    #[error("Expected type {expected}, found {value} of type {found} in {context}")]
    KindMismatch { context: String, expected: NativeKind, found: NativeKind, value: String },
    #[error("Expected non-null of type {expected}, found null in {context}")]
    ExpectedNonNil { context: String, expected: NativeKind },
    #[error("Expected error of type {expected}, found of type {found} in {context}")]
    WrongFailure { context: String, expected: FailureKind, found: FailureKind, #[source] source: Failure },
    #[error("Expected error of type {expected}, found {value} in {context}")]
    UnexpectedSuccess { context: String, expected: FailureKind, value: String },
    #[error("Returned null object from {context}")]
    NilResult { context: String },
    #[error("Returned object of type {found} [expected {expected} or Vector] from {context}")]
    UnexpectedValue { context: String, expected: NativeKind, found: NativeKind },
    #[error("Undefined var {namespace}/{name}")]
    Unresolved { namespace: String, name: String },
    #[error("Unknown namespace \"{0}\"")]
    UnknownNamespace(String),
}

pub type InteropResult<T> = Result<T, InteropError>;
