//! Error types for network model operations.

use thiserror::Error;
use wn_components::ComponentError;
use wn_core::CoreError;
use wn_graph::GraphError;
use wn_solver::SolverError;

use crate::config::ConfigError;

/// Errors reported by [`crate::WaterNetworkModel`] operations.
///
/// A failed operation never leaves partial state behind.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Duplicate {kind} name: {name}")]
    DuplicateName { kind: &'static str, name: String },

    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },

    #[error("{name} is a {found}, not a {expected}")]
    WrongElementType {
        name: String,
        expected: String,
        found: String,
    },

    #[error("Node {node} still has incident links: {}", links.join(", "))]
    NodeInUse { node: String, links: Vec<String> },

    #[error("Curve {curve} is used by pumps: {}", pumps.join(", "))]
    CurveInUse { curve: String, pumps: Vec<String> },

    #[error("Curve {curve} has {points} points; head curves need 1 or 3")]
    UnsupportedCurveShape { curve: String, points: usize },

    #[error("Curve {curve} did not converge: {what}")]
    Convergence { curve: String, what: String },

    #[error("Curve {curve} is singular: {what}")]
    Singularity { curve: String, what: String },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Model invariant violated: {what}")]
    Invariant { what: String },
}

pub type ModelResult<T> = Result<T, ModelError>;

impl ModelError {
    /// Attach the curve name to a solver failure.
    pub(crate) fn from_solver(curve: &str, err: SolverError) -> Self {
        let curve = curve.to_string();
        match err {
            SolverError::UnsupportedCurveShape { points } => {
                ModelError::UnsupportedCurveShape { curve, points }
            }
            SolverError::Singularity { what } => ModelError::Singularity { curve, what },
            SolverError::ConvergenceFailed { what } | SolverError::Numeric { what } => {
                ModelError::Convergence { curve, what }
            }
            SolverError::InvalidCurve { what } => ModelError::InvalidArg {
                what: format!("curve {curve}: {what}"),
            },
        }
    }
}

impl From<CoreError> for ModelError {
    fn from(e: CoreError) -> Self {
        ModelError::InvalidArg {
            what: e.to_string(),
        }
    }
}

impl From<ComponentError> for ModelError {
    fn from(e: ComponentError) -> Self {
        ModelError::InvalidArg {
            what: e.to_string(),
        }
    }
}

// Preconditions are checked before the graph is touched, so a graph error
// here means the registries and the topology disagree.
impl From<GraphError> for ModelError {
    fn from(e: GraphError) -> Self {
        ModelError::Invariant {
            what: e.to_string(),
        }
    }
}

impl From<ModelError> for CoreError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Invariant { what } => CoreError::Invariant { what },
            other => CoreError::InvalidArg {
                what: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solver_errors_carry_curve_name() {
        let err = ModelError::from_solver("C1", SolverError::UnsupportedCurveShape { points: 2 });
        assert!(matches!(
            err,
            ModelError::UnsupportedCurveShape { ref curve, points: 2 } if curve == "C1"
        ));
        assert_eq!(err.to_string(), "Curve C1 has 2 points; head curves need 1 or 3");
    }

    #[test]
    fn exhausted_solver_is_convergence_error() {
        let err = ModelError::from_solver(
            "C1",
            SolverError::ConvergenceFailed {
                what: "maximum iterations 1 reached".into(),
            },
        );
        assert!(matches!(err, ModelError::Convergence { ref curve, .. } if curve == "C1"));
    }

    #[test]
    fn node_in_use_lists_links() {
        let err = ModelError::NodeInUse {
            node: "J1".into(),
            links: vec!["P1".into(), "P2".into()],
        };
        assert_eq!(err.to_string(), "Node J1 still has incident links: P1, P2");
    }

    #[test]
    fn invariant_maps_to_core_invariant() {
        let core: CoreError = ModelError::Invariant {
            what: "count".into(),
        }
        .into();
        assert!(matches!(core, CoreError::Invariant { .. }));
    }
}
