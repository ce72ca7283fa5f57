//! wn-graph: topology layer for water networks.
//!
//! Provides:
//! - A name-keyed directed graph mirroring network nodes and links
//! - Undirected adjacency queries over the directed storage
//! - Connected-component grouping for isolated sub-networks
//!
//! # Example
//!
//! ```
//! use wn_graph::Topology;
//!
//! let mut topo = Topology::new();
//! topo.add_node("J1").unwrap();
//! topo.add_node("J2").unwrap();
//! topo.add_edge("P1", "J1", "J2").unwrap();
//!
//! assert_eq!(topo.node_count(), 2);
//! assert_eq!(topo.links_for_node("J2").unwrap(), vec!["P1"]);
//! ```

pub mod error;
pub mod topology;

// Re-exports for ergonomics
pub use error::{GraphError, GraphResult};
pub use topology::{EdgeView, Topology};
