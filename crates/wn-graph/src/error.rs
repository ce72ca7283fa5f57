//! Graph-specific error types.

use thiserror::Error;
use wn_core::CoreError;

/// Topology construction and mutation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A vertex with this name already exists.
    #[error("Node {name} already exists in the topology")]
    DuplicateNode { name: String },

    /// An edge with this link name already exists.
    #[error("Edge {name} already exists in the topology")]
    DuplicateEdge { name: String },

    #[error("Node {name} not found in the topology")]
    NodeNotFound { name: String },

    #[error("Edge {name} not found in the topology")]
    EdgeNotFound { name: String },

    /// A vertex cannot be removed while edges still touch it.
    #[error("Node {name} still has incident edges: {}", edges.join(", "))]
    NodeHasEdges { name: String, edges: Vec<String> },
}

pub type GraphResult<T> = Result<T, GraphError>;

impl From<GraphError> for CoreError {
    fn from(err: GraphError) -> Self {
        CoreError::Invariant {
            what: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_has_edges_lists_edges() {
        let err = GraphError::NodeHasEdges {
            name: "J1".into(),
            edges: vec!["P1".into(), "P2".into()],
        };
        assert_eq!(err.to_string(), "Node J1 still has incident edges: P1, P2");
    }

    #[test]
    fn converts_to_core_invariant() {
        let core: CoreError = GraphError::EdgeNotFound { name: "P9".into() }.into();
        assert!(matches!(core, CoreError::Invariant { .. }));
    }
}
