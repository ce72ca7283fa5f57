//! Error types for solver operations.

use thiserror::Error;
use wn_core::error::CoreError;

/// Errors that can occur while fitting or solving.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Unsupported curve shape: exact fitting needs 1 or 3 points, got {points}")]
    UnsupportedCurveShape { points: usize },

    #[error("Invalid curve: {what}")]
    InvalidCurve { what: String },

    #[error("Singular curve fit: {what}")]
    Singularity { what: String },

    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: String },

    #[error("Numeric error: {what}")]
    Numeric { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for CoreError {
    fn from(e: SolverError) -> Self {
        CoreError::InvalidArg {
            what: e.to_string(),
        }
    }
}
