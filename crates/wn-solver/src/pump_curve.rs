//! Pump head-curve fitting.
//!
//! A pump head curve is modelled as `h(q) = a - b * q^c`. Three points pin
//! down the three coefficients exactly; a single design point is expanded to
//! three using the standard shape assumptions:
//!
//! ```text
//! shutoff:  q1 = 0,        h1 = 4/3 * h2
//! design:   q2,            h2
//! max flow: q3 = 2 * q2,   h3 = 0
//! ```
//!
//! The system is transcendental in `c`, so it is solved with the damped
//! Newton iteration in [`crate::newton`]. The starting point eliminates `a`
//! and `b`, leaving one equation in `c`:
//!
//! ```text
//! (q2^c - q1^c) / (q3^c - q2^c) = (h1 - h2) / (h2 - h3)
//! ```
//!
//! With a shutoff point (`q1 = 0`) this has a closed form. Otherwise the
//! left side falls monotonically from `+inf` to `0` as `c` runs over the
//! reals, so its root is bracketed and bisected. Concave-up curves land on
//! `c < 0` and `b < 0`.

use nalgebra::{DMatrix, DVector};
use tracing::debug;
use wn_components::{Curve, CurveType, HeadCurveCoefficients};

use crate::error::{SolverError, SolverResult};
use crate::newton::{NewtonConfig, newton_solve};

/// Shutoff head relative to the design head for single-point curves.
pub const SHUTOFF_HEAD_FACTOR: f64 = 4.0 / 3.0;
/// Maximum flow relative to the design flow for single-point curves.
pub const MAX_FLOW_FACTOR: f64 = 2.0;

/// Largest exponent magnitude searched when bracketing `c`.
const MAX_EXPONENT: f64 = 1024.0;
const MAX_BISECTIONS: usize = 200;

type Points = [(f64, f64); 3];

/// Fit the coefficients of a HEAD curve.
///
/// # Errors
/// [`SolverError::InvalidCurve`] when the curve is not of type HEAD, plus
/// everything [`fit_head_curve`] can return.
pub fn fit_curve(curve: &Curve, config: &NewtonConfig) -> SolverResult<HeadCurveCoefficients> {
    if curve.curve_type() != CurveType::Head {
        return Err(SolverError::InvalidCurve {
            what: format!(
                "curve {} is a {} curve, pumps need a HEAD curve",
                curve.name(),
                curve.curve_type()
            ),
        });
    }
    fit_head_curve(curve.points(), config)
}

/// Fit `h(q) = a - b * q^c` through 1 or 3 `(flow, head)` points.
///
/// # Errors
/// - [`SolverError::UnsupportedCurveShape`] for any other point count
/// - [`SolverError::InvalidCurve`] when three points are not strictly
///   increasing in flow and strictly decreasing in head
/// - [`SolverError::Singularity`] for a non-positive design point, or when
///   the solution would raise zero flow to a non-positive power
/// - [`SolverError::ConvergenceFailed`] when Newton runs out of budget or
///   no exponent can be bracketed
pub fn fit_head_curve(
    points: &[(f64, f64)],
    config: &NewtonConfig,
) -> SolverResult<HeadCurveCoefficients> {
    let pts: Points = match *points {
        [design] => synthesize_points(design)?,
        [p1, p2, p3] => [p1, p2, p3],
        _ => {
            return Err(SolverError::UnsupportedCurveShape {
                points: points.len(),
            });
        }
    };
    check_points(&pts)?;

    let x0 = initial_guess(&pts)?;
    let result = newton_solve(
        x0,
        |x| residual(&pts, x),
        |x| jacobian(&pts, x),
        config,
    )?;

    let coeffs = HeadCurveCoefficients {
        a: result.x[0],
        b: result.x[1],
        c: result.x[2],
    };
    if !(coeffs.a.is_finite() && coeffs.b.is_finite() && coeffs.c.is_finite()) {
        return Err(SolverError::Numeric {
            what: format!("non-finite head curve coefficients {coeffs:?}"),
        });
    }
    if pts[0].0 == 0.0 && coeffs.c <= 0.0 {
        return Err(SolverError::Singularity {
            what: format!("zero flow raised to non-positive exponent c = {}", coeffs.c),
        });
    }

    debug!(
        a = coeffs.a,
        b = coeffs.b,
        c = coeffs.c,
        iterations = result.iterations,
        "fitted pump head curve"
    );
    Ok(coeffs)
}

fn synthesize_points((q, h): (f64, f64)) -> SolverResult<Points> {
    if !(q > 0.0 && h > 0.0) {
        return Err(SolverError::Singularity {
            what: format!("single-point curve needs positive flow and head, got ({q}, {h})"),
        });
    }
    Ok([
        (0.0, SHUTOFF_HEAD_FACTOR * h),
        (q, h),
        (MAX_FLOW_FACTOR * q, 0.0),
    ])
}

fn check_points(pts: &Points) -> SolverResult<()> {
    let [(q1, h1), (q2, h2), (q3, h3)] = *pts;
    if [q1, h1, q2, h2, q3, h3].iter().any(|v| !v.is_finite()) {
        return Err(SolverError::InvalidCurve {
            what: "curve points must be finite".into(),
        });
    }
    if q1 < 0.0 {
        return Err(SolverError::InvalidCurve {
            what: format!("flow cannot be negative, got {q1}"),
        });
    }
    if !(q1 < q2 && q2 < q3) {
        return Err(SolverError::InvalidCurve {
            what: format!("flows must be strictly increasing, got {q1}, {q2}, {q3}"),
        });
    }
    if !(h1 > h2 && h2 > h3) {
        return Err(SolverError::InvalidCurve {
            what: format!("heads must be strictly decreasing, got {h1}, {h2}, {h3}"),
        });
    }
    Ok(())
}

// Point ordering is checked beforehand, so every logarithm below is taken
// of a positive number and both head differences are positive.
fn initial_guess(pts: &Points) -> SolverResult<DVector<f64>> {
    let [(q1, h1), (q2, h2), (q3, h3)] = *pts;
    let c = if q1 == 0.0 {
        ((h1 - h3) / (h1 - h2)).ln() / (q3 / q2).ln()
    } else {
        bracket_exponent(pts)?
    };
    let b = (h1 - h2) / (flow_power(q2, c)? - flow_power(q1, c)?);
    let a = h1 + b * flow_power(q1, c)?;
    Ok(DVector::from_vec(vec![a, b, c]))
}

/// Root in `c` of the head-ratio equation for `q1 > 0`, by bisection.
fn bracket_exponent(pts: &Points) -> SolverResult<f64> {
    let [(q1, h1), (q2, h2), (q3, h3)] = *pts;
    let target = ((h1 - h2) / (h2 - h3)).ln();
    let l1 = (q1 / q2).ln();
    let l3 = (q3 / q2).ln();

    // ln of (1 - (q1/q2)^c) / ((q3/q2)^c - 1) minus the target, decreasing in c
    let g = |c: f64| {
        if c.abs() < 1e-12 {
            (-l1 / l3).ln() - target
        } else {
            ln_abs_expm1(c * l1) - ln_abs_expm1(c * l3) - target
        }
    };

    let g0 = g(0.0);
    if g0 == 0.0 {
        return Err(SolverError::Singularity {
            what: "head curve degenerates to exponent c = 0".into(),
        });
    }
    let (mut lo, mut hi) = if g0 > 0.0 { (0.0, 1.0) } else { (-1.0, 0.0) };
    while g(lo) <= 0.0 || g(hi) >= 0.0 {
        if g0 > 0.0 {
            lo = hi;
            hi *= 2.0;
        } else {
            hi = lo;
            lo *= 2.0;
        }
        if lo < -MAX_EXPONENT || hi > MAX_EXPONENT {
            return Err(SolverError::ConvergenceFailed {
                what: format!("no head curve exponent within +/-{MAX_EXPONENT}"),
            });
        }
    }

    for _ in 0..MAX_BISECTIONS {
        let mid = 0.5 * (lo + hi);
        if hi - lo <= f64::EPSILON * mid.abs().max(1.0) {
            break;
        }
        if g(mid) > 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Ok(0.5 * (lo + hi))
}

/// `ln |e^x - 1|` without overflow for large `x`.
fn ln_abs_expm1(x: f64) -> f64 {
    if x > 30.0 {
        x + (-(-x).exp()).ln_1p()
    } else {
        x.exp_m1().abs().ln()
    }
}

/// `q^c`, rejecting `0^c` for `c <= 0`.
fn flow_power(q: f64, c: f64) -> SolverResult<f64> {
    if q == 0.0 {
        if c <= 0.0 {
            return Err(SolverError::Singularity {
                what: format!("zero flow raised to non-positive exponent c = {c}"),
            });
        }
        return Ok(0.0);
    }
    Ok(q.powf(c))
}

fn residual(pts: &Points, x: &DVector<f64>) -> SolverResult<DVector<f64>> {
    let (a, b, c) = (x[0], x[1], x[2]);
    let mut r = DVector::zeros(3);
    for (i, &(q, h)) in pts.iter().enumerate() {
        r[i] = h - a + b * flow_power(q, c)?;
    }
    Ok(r)
}

fn jacobian(pts: &Points, x: &DVector<f64>) -> SolverResult<DMatrix<f64>> {
    let (b, c) = (x[1], x[2]);
    let mut j = DMatrix::zeros(3, 3);
    for (i, &(q, _)) in pts.iter().enumerate() {
        let qc = flow_power(q, c)?;
        j[(i, 0)] = -1.0;
        j[(i, 1)] = qc;
        // d/dc of q^c is q^c ln q, which tends to 0 as q -> 0 for c > 0
        j[(i, 2)] = if q == 0.0 { 0.0 } else { b * qc * q.ln() };
    }
    Ok(j)
}
