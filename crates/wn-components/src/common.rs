//! Common checks shared by element constructors.

use crate::error::{ComponentError, ComponentResult};
use wn_core::numeric::ensure_finite;

/// Ensure a value is finite.
pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<f64> {
    Ok(ensure_finite(value, what)?)
}

/// Ensure a value is finite and strictly positive.
pub fn check_positive(value: f64, what: &'static str) -> ComponentResult<f64> {
    check_finite(value, what)?;
    if value <= 0.0 {
        return Err(ComponentError::NonPhysical {
            what: format!("{what} must be positive, got {value}"),
        });
    }
    Ok(value)
}

/// Ensure a value is finite and not negative.
pub fn check_non_negative(value: f64, what: &'static str) -> ComponentResult<f64> {
    check_finite(value, what)?;
    if value < 0.0 {
        return Err(ComponentError::NonPhysical {
            what: format!("{what} cannot be negative, got {value}"),
        });
    }
    Ok(value)
}
