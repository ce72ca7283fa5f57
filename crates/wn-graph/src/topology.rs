//! Name-keyed directed topology graph.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use petgraph::Direction;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::unionfind::UnionFind;
use petgraph::visit::{EdgeRef, NodeIndexable};

use crate::error::{GraphError, GraphResult};

/// A directed edge seen through its link name and endpoint node names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeView<'a> {
    pub link: &'a str,
    pub start: &'a str,
    pub end: &'a str,
}

/// Directed graph of network nodes (vertices) and links (edges).
///
/// Vertices carry node names and edges carry link names. Storage is a
/// `StableDiGraph` so removing one element never invalidates the indices
/// held for the others. Parallel edges between the same pair of vertices
/// are distinct links.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    graph: StableDiGraph<String, String>,
    node_index: HashMap<String, NodeIndex>,
    edge_index: HashMap<String, EdgeIndex>,
}

impl Topology {
    /// Create an empty topology.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// True when the graph holds neither vertices nor edges.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0 && self.graph.edge_count() == 0
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.node_index.contains_key(name)
    }

    pub fn contains_edge(&self, link: &str) -> bool {
        self.edge_index.contains_key(link)
    }

    /// Insert an isolated vertex.
    pub fn add_node(&mut self, name: impl Into<String>) -> GraphResult<()> {
        let name = name.into();
        if self.node_index.contains_key(&name) {
            return Err(GraphError::DuplicateNode { name });
        }
        let idx = self.graph.add_node(name.clone());
        self.node_index.insert(name, idx);
        Ok(())
    }

    /// Insert one directed edge `start -> end` named after its link.
    ///
    /// Both endpoints must already exist.
    pub fn add_edge(
        &mut self,
        link: impl Into<String>,
        start: &str,
        end: &str,
    ) -> GraphResult<()> {
        let link = link.into();
        if self.edge_index.contains_key(&link) {
            return Err(GraphError::DuplicateEdge { name: link });
        }
        let a = self.require_node(start)?;
        let b = self.require_node(end)?;
        let idx = self.graph.add_edge(a, b, link.clone());
        self.edge_index.insert(link, idx);
        Ok(())
    }

    /// Remove exactly the edge named `link`, returning its endpoints.
    pub fn remove_edge(&mut self, link: &str) -> GraphResult<(String, String)> {
        let idx = self
            .edge_index
            .remove(link)
            .ok_or_else(|| GraphError::EdgeNotFound { name: link.into() })?;
        let (a, b) = self
            .graph
            .edge_endpoints(idx)
            .ok_or_else(|| GraphError::EdgeNotFound { name: link.into() })?;
        let endpoints = (self.graph[a].clone(), self.graph[b].clone());
        self.graph.remove_edge(idx);
        Ok(endpoints)
    }

    /// Remove an isolated vertex.
    ///
    /// Fails with [`GraphError::NodeHasEdges`] while any edge touches it.
    pub fn remove_node(&mut self, name: &str) -> GraphResult<()> {
        let idx = self.require_node(name)?;
        let edges = self.incident_edges(idx);
        if !edges.is_empty() {
            return Err(GraphError::NodeHasEdges {
                name: name.into(),
                edges: edges.into_iter().map(str::to_owned).collect(),
            });
        }
        self.graph.remove_node(idx);
        self.node_index.remove(name);
        Ok(())
    }

    /// Link names incident to `name` in either direction, sorted.
    pub fn links_for_node(&self, name: &str) -> GraphResult<Vec<&str>> {
        let idx = self.require_node(name)?;
        Ok(self.incident_edges(idx).into_iter().collect())
    }

    /// Node names adjacent to `name`, ignoring edge direction, sorted.
    pub fn neighbors(&self, name: &str) -> GraphResult<Vec<&str>> {
        let idx = self.require_node(name)?;
        let set: BTreeSet<&str> = self
            .graph
            .neighbors_undirected(idx)
            .map(|n| self.graph[n].as_str())
            .collect();
        Ok(set.into_iter().collect())
    }

    /// Start and end node names of `link`.
    pub fn endpoints(&self, link: &str) -> GraphResult<(&str, &str)> {
        let idx = self
            .edge_index
            .get(link)
            .copied()
            .ok_or_else(|| GraphError::EdgeNotFound { name: link.into() })?;
        let (a, b) = self
            .graph
            .edge_endpoints(idx)
            .ok_or_else(|| GraphError::EdgeNotFound { name: link.into() })?;
        Ok((self.graph[a].as_str(), self.graph[b].as_str()))
    }

    /// All vertex names (storage order).
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph.node_indices().map(|i| self.graph[i].as_str())
    }

    /// All edges (storage order).
    pub fn edges(&self) -> impl Iterator<Item = EdgeView<'_>> + '_ {
        self.graph.edge_indices().filter_map(|e| {
            let (a, b) = self.graph.edge_endpoints(e)?;
            Some(EdgeView {
                link: self.graph[e].as_str(),
                start: self.graph[a].as_str(),
                end: self.graph[b].as_str(),
            })
        })
    }

    /// Groups of weakly connected node names.
    ///
    /// Each group is sorted; groups are ordered by their first name.
    pub fn connected_components(&self) -> Vec<Vec<String>> {
        let mut uf = UnionFind::<usize>::new(NodeIndexable::node_bound(&self.graph));
        for e in self.graph.edge_indices() {
            if let Some((a, b)) = self.graph.edge_endpoints(e) {
                uf.union(a.index(), b.index());
            }
        }

        let mut groups: BTreeMap<usize, Vec<String>> = BTreeMap::new();
        for idx in self.graph.node_indices() {
            groups
                .entry(uf.find(idx.index()))
                .or_default()
                .push(self.graph[idx].clone());
        }

        let mut out: Vec<Vec<String>> = groups
            .into_values()
            .map(|mut g| {
                g.sort();
                g
            })
            .collect();
        out.sort();
        out
    }

    fn require_node(&self, name: &str) -> GraphResult<NodeIndex> {
        self.node_index
            .get(name)
            .copied()
            .ok_or_else(|| GraphError::NodeNotFound { name: name.into() })
    }

    // Sorted and deduplicated so a self-loop is reported once.
    fn incident_edges(&self, idx: NodeIndex) -> BTreeSet<&str> {
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .chain(self.graph.edges_directed(idx, Direction::Incoming))
            .map(|e| e.weight().as_str())
            .collect()
    }
}
