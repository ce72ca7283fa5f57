//! Consistency check between the registries and their derived views.

use std::collections::BTreeSet;

use crate::counts::ElementCounts;
use crate::error::{ModelError, ModelResult};
use crate::model::WaterNetworkModel;

impl WaterNetworkModel {
    /// Re-derive counts, the check-valve set and the topology from the
    /// registries and compare them with the maintained copies.
    ///
    /// # Errors
    /// [`ModelError::Invariant`] describing the first divergence found.
    pub fn validate(&self) -> ModelResult<()> {
        for (key, node) in &self.nodes {
            if key != node.name() {
                return invariant(format!("node registered as {key} is named {}", node.name()));
            }
        }
        for (key, link) in &self.links {
            if key != link.name() {
                return invariant(format!("link registered as {key} is named {}", link.name()));
            }
        }

        let expected = ElementCounts::tally(
            self.nodes.values().map(|n| n.node_type()),
            self.links.values().map(|l| l.link_type()),
        );
        if expected != self.counts {
            return invariant(format!(
                "counts {:?} differ from registry contents {expected:?}",
                self.counts
            ));
        }

        let cv_expected: BTreeSet<&str> = self
            .links()
            .filter(|(_, l)| l.is_check_valve())
            .map(|(k, _)| k)
            .collect();
        let cv_actual: BTreeSet<&str> = self.check_valves().collect();
        if cv_expected != cv_actual {
            return invariant(format!(
                "check-valve set {cv_actual:?} differs from CV pipes {cv_expected:?}"
            ));
        }

        let topo = &self.topology;
        if topo.node_count() != self.nodes.len() {
            return invariant(format!(
                "topology has {} nodes, registry has {}",
                topo.node_count(),
                self.nodes.len()
            ));
        }
        if let Some(missing) = self.nodes.keys().find(|k| !topo.contains_node(k)) {
            return invariant(format!("node {missing} missing from topology"));
        }

        if topo.edge_count() != self.links.len() {
            return invariant(format!(
                "topology has {} edges, registry has {}",
                topo.edge_count(),
                self.links.len()
            ));
        }
        for (key, link) in &self.links {
            let (start, end) = topo.endpoints(key)?;
            if (start, end) != (link.start_node(), link.end_node()) {
                return invariant(format!(
                    "edge {key} runs {start} -> {end}, link runs {} -> {}",
                    link.start_node(),
                    link.end_node()
                ));
            }
        }

        for (name, pump) in self.pumps() {
            if let Some(curve) = pump.head_curve_name()
                && !self.curves.contains_key(curve)
            {
                return invariant(format!("pump {name} references missing curve {curve}"));
            }
        }

        Ok(())
    }
}

fn invariant(what: String) -> ModelResult<()> {
    Err(ModelError::Invariant { what })
}
