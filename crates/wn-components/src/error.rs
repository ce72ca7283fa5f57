//! Error types for element construction.

use thiserror::Error;
use wn_core::CoreError;

/// Errors raised while building or parsing an element.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: String },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Unknown {kind}: '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<CoreError> for ComponentError {
    fn from(e: CoreError) -> Self {
        ComponentError::NonPhysical {
            what: e.to_string(),
        }
    }
}

impl From<ComponentError> for CoreError {
    fn from(e: ComponentError) -> Self {
        CoreError::InvalidArg {
            what: e.to_string(),
        }
    }
}
