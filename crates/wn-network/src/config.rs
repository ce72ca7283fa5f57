//! Model configuration, loadable from YAML.
//!
//! ```yaml
//! node_removal: cascade
//! solver:
//!   abs_tol: 1.0e-10
//!   max_iterations: 200
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wn_solver::NewtonConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {what}")]
    Invalid { what: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// What `remove_node` does when links still touch the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRemovalPolicy {
    /// Fail with `NodeInUse` and leave the model unchanged.
    #[default]
    Reject,
    /// Remove every incident link first, then the node.
    Cascade,
}

/// Root-finder budget for pump head-curve fits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveSolverConfig {
    pub abs_tol: f64,
    pub rel_tol: f64,
    pub max_iterations: usize,
    pub line_search_beta: f64,
    pub max_line_search_iters: usize,
}

impl Default for CurveSolverConfig {
    fn default() -> Self {
        NewtonConfig::default().into()
    }
}

impl From<NewtonConfig> for CurveSolverConfig {
    fn from(c: NewtonConfig) -> Self {
        Self {
            abs_tol: c.abs_tol,
            rel_tol: c.rel_tol,
            max_iterations: c.max_iterations,
            line_search_beta: c.line_search_beta,
            max_line_search_iters: c.max_line_search_iters,
        }
    }
}

impl From<CurveSolverConfig> for NewtonConfig {
    fn from(c: CurveSolverConfig) -> Self {
        Self {
            max_iterations: c.max_iterations,
            abs_tol: c.abs_tol,
            rel_tol: c.rel_tol,
            line_search_beta: c.line_search_beta,
            max_line_search_iters: c.max_line_search_iters,
        }
    }
}

/// Configuration of a [`crate::WaterNetworkModel`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub solver: CurveSolverConfig,
    pub node_removal: NodeRemovalPolicy,
}

impl ModelConfig {
    pub fn from_yaml_str(s: &str) -> ConfigResult<Self> {
        let config: ModelConfig = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_yaml(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn to_yaml_string(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject budgets that could never converge or never terminate.
    pub fn validate(&self) -> ConfigResult<()> {
        let s = &self.solver;
        if !(s.abs_tol.is_finite() && s.abs_tol > 0.0) {
            return Err(ConfigError::Invalid {
                what: format!("solver.abs_tol must be positive, got {}", s.abs_tol),
            });
        }
        if !(s.rel_tol.is_finite() && s.rel_tol >= 0.0) {
            return Err(ConfigError::Invalid {
                what: format!("solver.rel_tol cannot be negative, got {}", s.rel_tol),
            });
        }
        if s.max_iterations == 0 {
            return Err(ConfigError::Invalid {
                what: "solver.max_iterations must be at least 1".into(),
            });
        }
        if !(s.line_search_beta > 0.0 && s.line_search_beta < 1.0) {
            return Err(ConfigError::Invalid {
                what: format!(
                    "solver.line_search_beta must lie in (0, 1), got {}",
                    s.line_search_beta
                ),
            });
        }
        if s.max_line_search_iters == 0 {
            return Err(ConfigError::Invalid {
                what: "solver.max_line_search_iters must be at least 1".into(),
            });
        }
        Ok(())
    }

    pub fn newton(&self) -> NewtonConfig {
        self.solver.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ModelConfig::default();
        assert_eq!(config.node_removal, NodeRemovalPolicy::Reject);
        assert_eq!(config.solver.abs_tol, 1e-10);
        assert_eq!(config.solver.max_iterations, 200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = ModelConfig::from_yaml_str("node_removal: cascade\n").unwrap();
        assert_eq!(config.node_removal, NodeRemovalPolicy::Cascade);
        assert_eq!(config.solver, CurveSolverConfig::default());

        let config = ModelConfig::from_yaml_str("solver:\n  max_iterations: 50\n").unwrap();
        assert_eq!(config.solver.max_iterations, 50);
        assert_eq!(config.solver.abs_tol, 1e-10);
    }

    #[test]
    fn invalid_values_rejected() {
        assert!(matches!(
            ModelConfig::from_yaml_str("solver:\n  max_iterations: 0\n"),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            ModelConfig::from_yaml_str("solver:\n  line_search_beta: 1.5\n"),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            ModelConfig::from_yaml_str("node_removal: sometimes\n"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn yaml_output_reloads() {
        let config = ModelConfig {
            node_removal: NodeRemovalPolicy::Cascade,
            ..ModelConfig::default()
        };
        let text = config.to_yaml_string().unwrap();
        assert_eq!(ModelConfig::from_yaml_str(&text).unwrap(), config);
    }

    #[test]
    fn newton_conversion_keeps_budget() {
        let mut config = ModelConfig::default();
        config.solver.max_iterations = 17;
        assert_eq!(config.newton().max_iterations, 17);
    }
}
