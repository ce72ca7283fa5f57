//! Nonlinear solvers for network parameter derivation.
//!
//! This crate provides a damped Newton solver over `nalgebra` vectors and,
//! built on it, the pump head-curve fit that turns measured head/flow points
//! into the coefficients of `h(q) = a - b * q^c`.

pub mod error;
pub mod newton;
pub mod pump_curve;

pub use error::{SolverError, SolverResult};
pub use newton::{NewtonConfig, NewtonResult, newton_solve};
pub use pump_curve::{fit_curve, fit_head_curve};
