//! Valve element.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::{check_finite, check_non_negative, check_positive};
use crate::error::{ComponentError, ComponentResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValveType {
    /// Pressure reducing valve (setting: downstream pressure).
    Prv,
    /// Pressure sustaining valve (setting: upstream pressure).
    Psv,
    /// Pressure breaker valve (setting: pressure drop).
    Pbv,
    /// Flow control valve (setting: flow).
    Fcv,
    /// Throttle control valve (setting: loss coefficient).
    Tcv,
}

impl FromStr for ValveType {
    type Err = ComponentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PRV" => Ok(ValveType::Prv),
            "PSV" => Ok(ValveType::Psv),
            "PBV" => Ok(ValveType::Pbv),
            "FCV" => Ok(ValveType::Fcv),
            "TCV" => Ok(ValveType::Tcv),
            _ => Err(ComponentError::UnknownVariant {
                kind: "valve type",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ValveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValveType::Prv => "PRV",
            ValveType::Psv => "PSV",
            ValveType::Pbv => "PBV",
            ValveType::Fcv => "FCV",
            ValveType::Tcv => "TCV",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Valve {
    pub diameter: f64,
    pub valve_type: ValveType,
    pub minor_loss: f64,
    pub setting: f64,
}

impl Valve {
    /// Create a valve.
    ///
    /// # Errors
    /// Diameter must be positive and minor loss non-negative. Flow and
    /// throttle settings cannot be negative.
    pub fn new(
        diameter: f64,
        valve_type: ValveType,
        minor_loss: f64,
        setting: f64,
    ) -> ComponentResult<Self> {
        let setting = match valve_type {
            ValveType::Fcv | ValveType::Tcv => check_non_negative(setting, "valve setting")?,
            _ => check_finite(setting, "valve setting")?,
        };
        Ok(Self {
            diameter: check_positive(diameter, "valve diameter")?,
            valve_type,
            minor_loss: check_non_negative(minor_loss, "valve minor loss")?,
            setting,
        })
    }
}
