//! Pipe element.

use serde::{Deserialize, Serialize};

use crate::common::{check_non_negative, check_positive};
use crate::error::{ComponentError, ComponentResult};
use crate::link::LinkStatus;

/// Pipe segment.
///
/// Lengths and diameters are stored in whatever internal unit system the
/// caller converted to; no unit logic happens here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    pub length: f64,
    pub diameter: f64,
    pub roughness: f64,
    pub minor_loss: f64,
    /// One of `Open`, `Closed`, `CheckValve`.
    pub status: LinkStatus,
}

impl Pipe {
    /// Create a pipe.
    ///
    /// # Errors
    /// Length, diameter and roughness must be positive, minor loss
    /// non-negative, and the status cannot be `Active` (valves only).
    pub fn new(
        length: f64,
        diameter: f64,
        roughness: f64,
        minor_loss: f64,
        status: LinkStatus,
    ) -> ComponentResult<Self> {
        if status == LinkStatus::Active {
            return Err(ComponentError::InvalidArg {
                what: "pipe status must be OPEN, CLOSED or CV".into(),
            });
        }
        Ok(Self {
            length: check_positive(length, "pipe length")?,
            diameter: check_positive(diameter, "pipe diameter")?,
            roughness: check_positive(roughness, "pipe roughness")?,
            minor_loss: check_non_negative(minor_loss, "pipe minor loss")?,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipe_creation() {
        let p = Pipe::new(1000.0, 1.0, 100.0, 0.0, LinkStatus::Open).unwrap();
        assert_eq!(p.length, 1000.0);
        assert_eq!(p.status, LinkStatus::Open);
    }

    #[test]
    fn pipe_rejects_bad_values() {
        assert!(Pipe::new(0.0, 1.0, 100.0, 0.0, LinkStatus::Open).is_err());
        assert!(Pipe::new(10.0, -1.0, 100.0, 0.0, LinkStatus::Open).is_err());
        assert!(Pipe::new(10.0, 1.0, 100.0, -0.5, LinkStatus::Open).is_err());
        assert!(Pipe::new(10.0, 1.0, 100.0, 0.0, LinkStatus::Active).is_err());
    }
}
