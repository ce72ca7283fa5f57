//! Error types for result-set operations.

use thiserror::Error;
use wn_core::CoreError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResultsError {
    /// A frame the operation needs as a shape reference is absent.
    #[error("Missing {group} results for '{key}'")]
    MissingKey { group: &'static str, key: String },

    #[error("Results frame '{key}' has no rows")]
    EmptyFrame { key: String },

    #[error("Shape mismatch: {what}")]
    ShapeMismatch { what: String },
}

pub type ResultsResult<T> = Result<T, ResultsError>;

impl From<ResultsError> for CoreError {
    fn from(e: ResultsError) -> Self {
        CoreError::InvalidArg {
            what: e.to_string(),
        }
    }
}
