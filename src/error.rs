//! Error types shared by every fitting and training entry point.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FitError>;

/// Errors surfaced by the differentiator, optimizer, fitters and network code.
///
/// Every operation validates its inputs on entry and reports violations
/// through one of these variants instead of panicking.
#[derive(Debug, Error)]
pub enum FitError {
    /// Shape mismatch between matrices, vectors or dataset rows.
    #[error("dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Coordinate index outside a parameter vector.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Empty datasets, non-positive counts and similar caller errors.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A learning-rate schedule produced a negative rate.
    #[error("learning-rate schedule returned {rate} at iteration {iteration}")]
    InvalidSchedule { iteration: usize, rate: f64 },

    /// A loss evaluated to NaN or infinity.
    #[error("numeric instability: {0}")]
    NumericInstability(String),

    /// Malformed weight or dataset text.
    #[error("format error on line {line}: {message}")]
    Format { line: usize, message: String },

    /// Configuration JSON that does not match the expected schema.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FitError {
    pub(crate) fn dimension(context: &'static str, expected: usize, actual: usize) -> FitError {
        FitError::DimensionMismatch { context, expected, actual }
    }

    pub(crate) fn format(line: usize, message: impl Into<String>) -> FitError {
        FitError::Format { line, message: message.into() }
    }
}
