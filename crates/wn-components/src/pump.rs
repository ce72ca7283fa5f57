//! Pump element and its head-curve coefficients.

use serde::{Deserialize, Serialize};

use crate::common::check_positive;
use crate::error::ComponentResult;

/// Coefficients of the pump head relation `h(q) = a - b * q^c`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadCurveCoefficients {
    /// Shutoff head.
    pub a: f64,
    /// Flow coefficient.
    pub b: f64,
    /// Flow exponent.
    pub c: f64,
}

impl HeadCurveCoefficients {
    /// Head delivered at flow `q`.
    pub fn head(&self, q: f64) -> f64 {
        self.a - self.b * q.powf(self.c)
    }

    /// Residual `h - a + b * q^c` of one measured point.
    pub fn residual(&self, q: f64, h: f64) -> f64 {
        h - self.head(q)
    }

    pub fn as_tuple(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }
}

/// How a pump's hydraulic behavior is specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PumpType {
    Head,
    Power,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PumpCurve {
    /// Head curve reference and its solved coefficients.
    Head {
        curve: String,
        coefficients: HeadCurveCoefficients,
    },
    /// Constant shaft power.
    Power { power: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pump {
    curve: PumpCurve,
}

impl Pump {
    /// Head-curve pump with already solved coefficients.
    pub fn head(curve: impl Into<String>, coefficients: HeadCurveCoefficients) -> Self {
        Self {
            curve: PumpCurve::Head {
                curve: curve.into(),
                coefficients,
            },
        }
    }

    /// Constant power pump.
    pub fn constant_power(power: f64) -> ComponentResult<Self> {
        Ok(Self {
            curve: PumpCurve::Power {
                power: check_positive(power, "pump power")?,
            },
        })
    }

    pub fn curve(&self) -> &PumpCurve {
        &self.curve
    }

    pub fn pump_type(&self) -> PumpType {
        match self.curve {
            PumpCurve::Head { .. } => PumpType::Head,
            PumpCurve::Power { .. } => PumpType::Power,
        }
    }

    /// Name of the referenced head curve, if any.
    pub fn head_curve_name(&self) -> Option<&str> {
        match &self.curve {
            PumpCurve::Head { curve, .. } => Some(curve),
            PumpCurve::Power { .. } => None,
        }
    }

    pub fn head_curve_coefficients(&self) -> Option<HeadCurveCoefficients> {
        match &self.curve {
            PumpCurve::Head { coefficients, .. } => Some(*coefficients),
            PumpCurve::Power { .. } => None,
        }
    }

    /// `(a, b, c)` of a head-curve pump.
    pub fn get_head_curve_coefficients(&self) -> Option<(f64, f64, f64)> {
        self.head_curve_coefficients().map(|c| c.as_tuple())
    }

    pub fn power(&self) -> Option<f64> {
        match self.curve {
            PumpCurve::Power { power } => Some(power),
            PumpCurve::Head { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coefficients_evaluate_head() {
        let c = HeadCurveCoefficients {
            a: 80.0 / 3.0,
            b: 20.0 / 300.0,
            c: 2.0,
        };
        assert!((c.head(0.0) - 80.0 / 3.0).abs() < 1e-12);
        assert!((c.head(10.0) - 20.0).abs() < 1e-12);
        assert!(c.residual(20.0, 0.0).abs() < 1e-12);
    }

    #[test]
    fn head_pump_accessors() {
        let coeffs = HeadCurveCoefficients { a: 35.0, b: 0.5, c: 1.5 };
        let pump = Pump::head("curve1", coeffs);
        assert_eq!(pump.pump_type(), PumpType::Head);
        assert_eq!(pump.head_curve_name(), Some("curve1"));
        assert_eq!(pump.get_head_curve_coefficients(), Some((35.0, 0.5, 1.5)));
        assert_eq!(pump.power(), None);
    }

    #[test]
    fn power_pump_requires_positive_power() {
        let pump = Pump::constant_power(50.0).unwrap();
        assert_eq!(pump.pump_type(), PumpType::Power);
        assert_eq!(pump.power(), Some(50.0));
        assert!(pump.head_curve_name().is_none());
        assert!(Pump::constant_power(0.0).is_err());
    }
}
