//! Errors surfaced by the driver

use thiserror::Error;
use lindiff_interop::error::InteropError;
use lindiff_tensor::error::ShapeError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OracleError {
    #[error("Expected {expected}, found {actual} in {context}")]
    Mismatch { context: String, expected: String, actual: String },

    #[error(transparent)]
    Interop(#[from] InteropError),

    /// The reference rejected inputs the driver generated itself.
    #[error("Reference algebra rejected generated input: {0}")]
    Shape(#[from] ShapeError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type OracleResult<T> = Result<T, OracleError>;
