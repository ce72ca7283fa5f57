//! wn-network: the water network model.
//!
//! [`WaterNetworkModel`] is the single owner of every element. It keeps the
//! element registries, per-kind counts, the check-valve set and the
//! [`wn_graph::Topology`] consistent under every add and remove, and fits
//! pump head curves through [`wn_solver`] as pumps are added.
//!
//! # Example
//!
//! ```
//! use wn_components::CurveType;
//! use wn_network::{PumpSpec, WaterNetworkModel};
//!
//! let mut wn = WaterNetworkModel::new();
//! wn.add_reservoir("R1", 30.0, None).unwrap();
//! wn.add_junction("J1", 0.01, None, 10.0).unwrap();
//! wn.add_junction("J2", 0.02, None, 12.0).unwrap();
//! wn.add_curve("C1", CurveType::Head, vec![(0.05, 40.0)]).unwrap();
//! wn.add_pump("PU1", "R1", "J1", PumpSpec::head("C1")).unwrap();
//! wn.add_pipe("P1", "J1", "J2", 500.0, 0.3, 100.0, 0.0, "cv").unwrap();
//!
//! assert_eq!(wn.num_nodes(), 3);
//! assert_eq!(wn.get_links_for_node("J1").unwrap(), vec!["P1", "PU1"]);
//! assert!(wn.is_check_valve("P1"));
//! ```

pub mod config;
pub mod counts;
pub mod error;
pub mod model;
pub mod query;
pub mod validate;

pub use config::{ConfigError, ConfigResult, CurveSolverConfig, ModelConfig, NodeRemovalPolicy};
pub use counts::ElementCounts;
pub use error::{ModelError, ModelResult};
pub use model::{PumpSpec, WaterNetworkModel};
