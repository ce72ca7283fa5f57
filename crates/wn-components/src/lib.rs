//! wn-components: element library for water distribution networks.
//!
//! Provides the hydraulic elements a network is made of:
//! - Nodes: junctions, tanks, reservoirs
//! - Links: pipes, pumps, valves
//! - Curves: named (x, y) point sequences referenced by links
//!
//! Elements are plain tagged variants. They validate their own attributes
//! on construction but know nothing about names, registries or topology;
//! that bookkeeping belongs to the network model.
//!
//! # Example
//!
//! ```
//! use wn_components::{Junction, Node, NodeAttribute, NodeKind};
//!
//! let j = Junction::new(15.0, 0.01, Some("pat1".into())).unwrap();
//! let node = Node::new("J1", NodeKind::Junction(j));
//!
//! assert_eq!(node.elevation(), 15.0);
//! assert_eq!(node.attribute(NodeAttribute::BaseDemand), Some(0.01));
//! ```

pub mod common;
pub mod curve;
pub mod error;
pub mod link;
pub mod node;
pub mod pipe;
pub mod pump;
pub mod valve;

// Re-exports
pub use curve::{Curve, CurveType};
pub use error::{ComponentError, ComponentResult};
pub use link::{Link, LinkAttribute, LinkKind, LinkStatus, LinkType};
pub use node::{Junction, Node, NodeAttribute, NodeKind, NodeType, Reservoir, Tank};
pub use pipe::Pipe;
pub use pump::{HeadCurveCoefficients, Pump, PumpCurve, PumpType};
pub use valve::{Valve, ValveType};
