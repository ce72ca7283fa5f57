//! Named point curves.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::check_finite;
use crate::error::{ComponentError, ComponentResult};

/// What a curve's points describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveType {
    /// Pump head (y) versus flow (x).
    Head,
    /// Pump efficiency versus flow.
    Efficiency,
    /// Tank volume versus level.
    Volume,
    /// Valve head loss versus flow.
    Headloss,
}

impl FromStr for CurveType {
    type Err = ComponentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "HEAD" => Ok(CurveType::Head),
            "EFFICIENCY" => Ok(CurveType::Efficiency),
            "VOLUME" => Ok(CurveType::Volume),
            "HEADLOSS" => Ok(CurveType::Headloss),
            _ => Err(ComponentError::UnknownVariant {
                kind: "curve type",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for CurveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CurveType::Head => "HEAD",
            CurveType::Efficiency => "EFFICIENCY",
            CurveType::Volume => "VOLUME",
            CurveType::Headloss => "HEADLOSS",
        };
        f.write_str(s)
    }
}

/// An immutable, ordered sequence of `(x, y)` points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    name: String,
    curve_type: CurveType,
    points: Vec<(f64, f64)>,
}

impl Curve {
    /// Create a curve. Points are kept in the order given.
    ///
    /// # Errors
    /// At least one point is required and every coordinate must be finite.
    pub fn new(
        name: impl Into<String>,
        curve_type: CurveType,
        points: Vec<(f64, f64)>,
    ) -> ComponentResult<Self> {
        if points.is_empty() {
            return Err(ComponentError::InvalidArg {
                what: "curve requires at least one point".into(),
            });
        }
        for &(x, y) in &points {
            check_finite(x, "curve x value")?;
            check_finite(y, "curve y value")?;
        }
        Ok(Self {
            name: name.into(),
            curve_type,
            points,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn curve_type(&self) -> CurveType {
        self.curve_type
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }
}
