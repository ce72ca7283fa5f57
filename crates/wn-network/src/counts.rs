//! Per-kind element counts.

use serde::{Deserialize, Serialize};
use wn_components::{LinkType, NodeType};

/// Live element counts, one per element kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementCounts {
    pub junctions: usize,
    pub tanks: usize,
    pub reservoirs: usize,
    pub pipes: usize,
    pub pumps: usize,
    pub valves: usize,
}

impl ElementCounts {
    pub fn nodes(&self) -> usize {
        self.junctions + self.tanks + self.reservoirs
    }

    pub fn links(&self) -> usize {
        self.pipes + self.pumps + self.valves
    }

    pub(crate) fn node_slot(&mut self, node_type: NodeType) -> &mut usize {
        match node_type {
            NodeType::Junction => &mut self.junctions,
            NodeType::Tank => &mut self.tanks,
            NodeType::Reservoir => &mut self.reservoirs,
        }
    }

    pub(crate) fn link_slot(&mut self, link_type: LinkType) -> &mut usize {
        match link_type {
            LinkType::Pipe => &mut self.pipes,
            LinkType::Pump => &mut self.pumps,
            LinkType::Valve => &mut self.valves,
        }
    }

    /// Recount from scratch.
    pub(crate) fn tally(
        nodes: impl Iterator<Item = NodeType>,
        links: impl Iterator<Item = LinkType>,
    ) -> Self {
        let mut counts = Self::default();
        for t in nodes {
            *counts.node_slot(t) += 1;
        }
        for t in links {
            *counts.link_slot(t) += 1;
        }
        counts
    }
}
