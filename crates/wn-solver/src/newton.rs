//! Newton solver with backtracking line search.

use crate::error::{SolverError, SolverResult};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Newton solver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewtonConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Absolute tolerance for residual norm
    pub abs_tol: f64,
    /// Relative tolerance for residual norm (0 disables it)
    pub rel_tol: f64,
    /// Line search backtracking factor
    pub line_search_beta: f64,
    /// Maximum line search iterations
    pub max_line_search_iters: usize,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            abs_tol: 1e-10,
            rel_tol: 0.0,
            line_search_beta: 0.5,
            max_line_search_iters: 30,
        }
    }
}

/// Newton iteration result.
#[derive(Debug, Clone)]
pub struct NewtonResult {
    /// Solution vector
    pub x: DVector<f64>,
    /// Final residual norm
    pub residual_norm: f64,
    /// Number of iterations
    pub iterations: usize,
}

/// Damped Newton iteration on `residual_fn(x) = 0`.
///
/// A trial step whose residual evaluation fails is treated like a step that
/// does not reduce the residual: the line search backtracks. If every
/// backtracking step fails, the last evaluation error is returned.
pub fn newton_solve<F, J>(
    x0: DVector<f64>,
    residual_fn: F,
    jacobian_fn: J,
    config: &NewtonConfig,
) -> SolverResult<NewtonResult>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
    J: Fn(&DVector<f64>) -> SolverResult<DMatrix<f64>>,
{
    let mut x = x0;
    let mut r = residual_fn(&x)?;
    let mut r_norm = r.norm();
    let r0_norm = r_norm;

    for iter in 0..config.max_iterations {
        trace!(iter, residual_norm = r_norm, "newton iteration");

        // Check convergence
        if r_norm < config.abs_tol || r_norm < config.rel_tol * r0_norm {
            return Ok(NewtonResult {
                x,
                residual_norm: r_norm,
                iterations: iter,
            });
        }

        // Compute Jacobian
        let jac = jacobian_fn(&x)?;

        // Solve J * dx = -r
        let dx = jac
            .lu()
            .solve(&(-r.clone()))
            .ok_or_else(|| SolverError::Numeric {
                what: format!("singular Jacobian at iteration {iter}"),
            })?;

        // Backtrack until the residual norm decreases
        let mut alpha = 1.0;
        let mut accepted = None;
        let mut last_err = None;
        for _ in 0..config.max_line_search_iters {
            let x_new = &x + alpha * &dx;
            match residual_fn(&x_new) {
                Ok(r_new) => {
                    let r_new_norm = r_new.norm();
                    if r_new_norm.is_finite() && r_new_norm < r_norm {
                        accepted = Some((x_new, r_new, r_new_norm));
                        break;
                    }
                }
                Err(e) => last_err = Some(e),
            }
            alpha *= config.line_search_beta;
        }

        match accepted {
            Some((x_new, r_new, r_new_norm)) => {
                x = x_new;
                r = r_new;
                r_norm = r_new_norm;
            }
            None => {
                return Err(last_err.unwrap_or_else(|| SolverError::ConvergenceFailed {
                    what: format!(
                        "line search stagnated at iteration {iter}, residual = {r_norm}"
                    ),
                }));
            }
        }
    }

    if r_norm < config.abs_tol || r_norm < config.rel_tol * r0_norm {
        return Ok(NewtonResult {
            x,
            residual_norm: r_norm,
            iterations: config.max_iterations,
        });
    }

    Err(SolverError::ConvergenceFailed {
        what: format!(
            "maximum iterations {} reached, residual = {}",
            config.max_iterations, r_norm
        ),
    })
}
