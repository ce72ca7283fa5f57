//! The network model facade.
//!
//! [`WaterNetworkModel`] owns every node, link and curve, plus three derived
//! views: per-kind counts, the check-valve set and the topology graph. All
//! mutations go through the private `insert_*` / `take_*` helpers, which
//! update every view together. Public operations check all of their
//! preconditions before calling them, so a failed operation changes
//! nothing.

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, warn};
use wn_components::{
    Curve, CurveType, Junction, Link, LinkKind, LinkStatus, LinkType, Node, NodeKind, NodeType,
    Pipe, Pump, Reservoir, Tank, Valve, ValveType,
};
use wn_core::to_real;
use wn_graph::Topology;
use wn_solver::fit_curve;

use crate::config::{ModelConfig, NodeRemovalPolicy};
use crate::counts::ElementCounts;
use crate::error::{ModelError, ModelResult};

/// Pipe defaults used by [`WaterNetworkModel::add_pipe_default`].
pub const DEFAULT_PIPE_LENGTH: f64 = 304.8;
pub const DEFAULT_PIPE_DIAMETER: f64 = 0.3048;
pub const DEFAULT_PIPE_ROUGHNESS: f64 = 100.0;

/// How a new pump is driven.
#[derive(Debug, Clone, PartialEq)]
pub enum PumpSpec {
    /// Name of a HEAD curve in the model's curve store.
    Head(String),
    /// Constant shaft power.
    Power(f64),
}

impl PumpSpec {
    pub fn head(curve: impl Into<String>) -> Self {
        PumpSpec::Head(curve.into())
    }

    pub fn power(power: impl Into<f64>) -> Self {
        PumpSpec::Power(power.into())
    }
}

/// In-memory water distribution network.
#[derive(Debug, Clone, Default)]
pub struct WaterNetworkModel {
    config: ModelConfig,
    pub(crate) nodes: IndexMap<String, Node>,
    pub(crate) links: IndexMap<String, Link>,
    pub(crate) curves: IndexMap<String, Curve>,
    pub(crate) check_valves: IndexSet<String>,
    pub(crate) counts: ElementCounts,
    pub(crate) topology: Topology,
}

impl WaterNetworkModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty model with a custom configuration.
    ///
    /// # Errors
    /// [`ModelError::Config`] when the configuration fails validation.
    pub fn with_config(config: ModelConfig) -> ModelResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Nodes
    // ------------------------------------------------------------------

    pub fn add_junction(
        &mut self,
        name: &str,
        base_demand: impl Into<f64>,
        demand_pattern: Option<&str>,
        elevation: impl Into<f64>,
    ) -> ModelResult<()> {
        self.check_new_node(name)?;
        let junction = Junction::new(
            to_real(elevation, "junction elevation")?,
            to_real(base_demand, "junction base demand")?,
            demand_pattern.map(str::to_string),
        )?;
        self.insert_node(name, NodeKind::Junction(junction))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_tank(
        &mut self,
        name: &str,
        elevation: impl Into<f64>,
        init_level: impl Into<f64>,
        min_level: impl Into<f64>,
        max_level: impl Into<f64>,
        diameter: impl Into<f64>,
        min_vol: impl Into<f64>,
    ) -> ModelResult<()> {
        self.check_new_node(name)?;
        let tank = Tank::new(
            to_real(elevation, "tank elevation")?,
            to_real(init_level, "tank initial level")?,
            to_real(min_level, "tank minimum level")?,
            to_real(max_level, "tank maximum level")?,
            to_real(diameter, "tank diameter")?,
            to_real(min_vol, "tank minimum volume")?,
        )?;
        self.insert_node(name, NodeKind::Tank(tank))
    }

    pub fn add_reservoir(
        &mut self,
        name: &str,
        base_head: impl Into<f64>,
        head_pattern: Option<&str>,
    ) -> ModelResult<()> {
        self.check_new_node(name)?;
        let reservoir = Reservoir::new(
            to_real(base_head, "reservoir base head")?,
            head_pattern.map(str::to_string),
        )?;
        self.insert_node(name, NodeKind::Reservoir(reservoir))
    }

    pub fn get_node(&self, name: &str) -> ModelResult<&Node> {
        self.nodes.get(name).ok_or_else(|| not_found("node", name))
    }

    pub fn remove_junction(&mut self, name: &str) -> ModelResult<Node> {
        self.remove_node_inner(name, Some(NodeType::Junction))
    }

    pub fn remove_tank(&mut self, name: &str) -> ModelResult<Node> {
        self.remove_node_inner(name, Some(NodeType::Tank))
    }

    pub fn remove_reservoir(&mut self, name: &str) -> ModelResult<Node> {
        self.remove_node_inner(name, Some(NodeType::Reservoir))
    }

    /// Remove a node of any kind, applying the configured
    /// [`NodeRemovalPolicy`] when links still touch it.
    pub fn remove_node(&mut self, name: &str) -> ModelResult<Node> {
        self.remove_node_inner(name, None)
    }

    // ------------------------------------------------------------------
    // Links
    // ------------------------------------------------------------------

    /// Add a pipe. `status` is one of OPEN, CLOSED or CV in any case; CV
    /// pipes join the check-valve set.
    #[allow(clippy::too_many_arguments)]
    pub fn add_pipe(
        &mut self,
        name: &str,
        start_node: &str,
        end_node: &str,
        length: impl Into<f64>,
        diameter: impl Into<f64>,
        roughness: impl Into<f64>,
        minor_loss: impl Into<f64>,
        status: &str,
    ) -> ModelResult<()> {
        self.check_new_link(name, start_node, end_node)?;
        let status: LinkStatus = status.parse()?;
        let pipe = Pipe::new(
            to_real(length, "pipe length")?,
            to_real(diameter, "pipe diameter")?,
            to_real(roughness, "pipe roughness")?,
            to_real(minor_loss, "pipe minor loss")?,
            status,
        )?;
        self.insert_link(name, start_node, end_node, LinkKind::Pipe(pipe))
    }

    /// Add an open pipe with the default length, diameter and roughness.
    pub fn add_pipe_default(
        &mut self,
        name: &str,
        start_node: &str,
        end_node: &str,
    ) -> ModelResult<()> {
        self.add_pipe(
            name,
            start_node,
            end_node,
            DEFAULT_PIPE_LENGTH,
            DEFAULT_PIPE_DIAMETER,
            DEFAULT_PIPE_ROUGHNESS,
            0.0,
            LinkStatus::Open.as_str(),
        )
    }

    /// Add a pump. A HEAD pump has its curve fitted here; a failed fit
    /// fails the whole call.
    pub fn add_pump(
        &mut self,
        name: &str,
        start_node: &str,
        end_node: &str,
        spec: PumpSpec,
    ) -> ModelResult<()> {
        self.check_new_link(name, start_node, end_node)?;
        let pump = match spec {
            PumpSpec::Head(curve_name) => {
                let curve = self.get_curve(&curve_name)?;
                let coefficients = fit_curve(curve, &self.config.newton())
                    .map_err(|e| ModelError::from_solver(&curve_name, e))?;
                Pump::head(curve_name, coefficients)
            }
            PumpSpec::Power(power) => Pump::constant_power(to_real(power, "pump power")?)?,
        };
        self.insert_link(name, start_node, end_node, LinkKind::Pump(pump))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_valve(
        &mut self,
        name: &str,
        start_node: &str,
        end_node: &str,
        diameter: impl Into<f64>,
        valve_type: ValveType,
        minor_loss: impl Into<f64>,
        setting: impl Into<f64>,
    ) -> ModelResult<()> {
        self.check_new_link(name, start_node, end_node)?;
        let valve = Valve::new(
            to_real(diameter, "valve diameter")?,
            valve_type,
            to_real(minor_loss, "valve minor loss")?,
            to_real(setting, "valve setting")?,
        )?;
        self.insert_link(name, start_node, end_node, LinkKind::Valve(valve))
    }

    pub fn get_link(&self, name: &str) -> ModelResult<&Link> {
        self.links.get(name).ok_or_else(|| not_found("link", name))
    }

    pub fn remove_pipe(&mut self, name: &str) -> ModelResult<Link> {
        self.remove_link_inner(name, Some(LinkType::Pipe))
    }

    pub fn remove_pump(&mut self, name: &str) -> ModelResult<Link> {
        self.remove_link_inner(name, Some(LinkType::Pump))
    }

    pub fn remove_valve(&mut self, name: &str) -> ModelResult<Link> {
        self.remove_link_inner(name, Some(LinkType::Valve))
    }

    pub fn remove_link(&mut self, name: &str) -> ModelResult<Link> {
        self.remove_link_inner(name, None)
    }

    // ------------------------------------------------------------------
    // Curves
    // ------------------------------------------------------------------

    pub fn add_curve(
        &mut self,
        name: &str,
        curve_type: CurveType,
        points: Vec<(f64, f64)>,
    ) -> ModelResult<()> {
        check_name(name)?;
        if self.curves.contains_key(name) {
            return Err(duplicate("curve", name));
        }
        let curve = Curve::new(name, curve_type, points)?;
        debug!(name, kind = %curve_type, points = curve.num_points(), "added curve");
        self.curves.insert(name.to_string(), curve);
        Ok(())
    }

    pub fn get_curve(&self, name: &str) -> ModelResult<&Curve> {
        self.curves.get(name).ok_or_else(|| not_found("curve", name))
    }

    /// Remove a curve no pump references.
    pub fn remove_curve(&mut self, name: &str) -> ModelResult<Curve> {
        if !self.curves.contains_key(name) {
            return Err(not_found("curve", name));
        }
        let pumps: Vec<String> = self
            .pumps()
            .filter(|(_, p)| p.head_curve_name() == Some(name))
            .map(|(n, _)| n.to_string())
            .collect();
        if !pumps.is_empty() {
            return Err(ModelError::CurveInUse {
                curve: name.to_string(),
                pumps,
            });
        }
        let curve = self
            .curves
            .shift_remove(name)
            .ok_or_else(|| not_found("curve", name))?;
        debug!(name, "removed curve");
        Ok(curve)
    }

    // ------------------------------------------------------------------
    // Iteration
    // ------------------------------------------------------------------

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.nodes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Links in insertion order.
    pub fn links(&self) -> impl Iterator<Item = (&str, &Link)> {
        self.links.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Curves in insertion order.
    pub fn curves(&self) -> impl Iterator<Item = (&str, &Curve)> {
        self.curves.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn junctions(&self) -> impl Iterator<Item = (&str, &Junction)> {
        self.nodes().filter_map(|(k, n)| n.as_junction().map(|j| (k, j)))
    }

    pub fn tanks(&self) -> impl Iterator<Item = (&str, &Tank)> {
        self.nodes().filter_map(|(k, n)| n.as_tank().map(|t| (k, t)))
    }

    pub fn reservoirs(&self) -> impl Iterator<Item = (&str, &Reservoir)> {
        self.nodes().filter_map(|(k, n)| n.as_reservoir().map(|r| (k, r)))
    }

    pub fn pipes(&self) -> impl Iterator<Item = (&str, &Pipe)> {
        self.links().filter_map(|(k, l)| l.as_pipe().map(|p| (k, p)))
    }

    pub fn pumps(&self) -> impl Iterator<Item = (&str, &Pump)> {
        self.links().filter_map(|(k, l)| l.as_pump().map(|p| (k, p)))
    }

    pub fn valves(&self) -> impl Iterator<Item = (&str, &Valve)> {
        self.links().filter_map(|(k, l)| l.as_valve().map(|v| (k, v)))
    }

    /// Names of CV pipes in the order they were added.
    pub fn check_valves(&self) -> impl Iterator<Item = &str> {
        self.check_valves.iter().map(String::as_str)
    }

    pub fn is_check_valve(&self, name: &str) -> bool {
        self.check_valves.contains(name)
    }

    // ------------------------------------------------------------------
    // Counts and topology
    // ------------------------------------------------------------------

    pub fn counts(&self) -> ElementCounts {
        self.counts
    }

    pub fn num_junctions(&self) -> usize {
        self.counts.junctions
    }

    pub fn num_tanks(&self) -> usize {
        self.counts.tanks
    }

    pub fn num_reservoirs(&self) -> usize {
        self.counts.reservoirs
    }

    pub fn num_pipes(&self) -> usize {
        self.counts.pipes
    }

    pub fn num_pumps(&self) -> usize {
        self.counts.pumps
    }

    pub fn num_valves(&self) -> usize {
        self.counts.valves
    }

    pub fn num_nodes(&self) -> usize {
        self.counts.nodes()
    }

    pub fn num_links(&self) -> usize {
        self.counts.links()
    }

    pub fn num_curves(&self) -> usize {
        self.curves.len()
    }

    /// Read-only view of the topology graph.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Links touching `node` in either direction, sorted by name.
    pub fn get_links_for_node(&self, node: &str) -> ModelResult<Vec<&str>> {
        if !self.nodes.contains_key(node) {
            return Err(not_found("node", node));
        }
        Ok(self.topology.links_for_node(node)?)
    }

    // ------------------------------------------------------------------
    // Single mutation path
    // ------------------------------------------------------------------

    fn check_new_node(&self, name: &str) -> ModelResult<()> {
        check_name(name)?;
        if self.nodes.contains_key(name) {
            return Err(duplicate("node", name));
        }
        Ok(())
    }

    fn check_new_link(&self, name: &str, start_node: &str, end_node: &str) -> ModelResult<()> {
        check_name(name)?;
        if self.links.contains_key(name) {
            return Err(duplicate("link", name));
        }
        for node in [start_node, end_node] {
            if !self.nodes.contains_key(node) {
                return Err(not_found("node", node));
            }
        }
        Ok(())
    }

    fn insert_node(&mut self, name: &str, kind: NodeKind) -> ModelResult<()> {
        self.topology.add_node(name)?;
        let node = Node::new(name, kind);
        let node_type = node.node_type();
        *self.counts.node_slot(node_type) += 1;
        self.nodes.insert(name.to_string(), node);
        debug!(name, kind = %node_type, "added node");
        Ok(())
    }

    fn insert_link(
        &mut self,
        name: &str,
        start_node: &str,
        end_node: &str,
        kind: LinkKind,
    ) -> ModelResult<()> {
        self.topology.add_edge(name, start_node, end_node)?;
        let link = Link::new(name, start_node, end_node, kind);
        let link_type = link.link_type();
        if link.is_check_valve() {
            self.check_valves.insert(name.to_string());
        }
        *self.counts.link_slot(link_type) += 1;
        self.links.insert(name.to_string(), link);
        debug!(name, kind = %link_type, start_node, end_node, "added link");
        Ok(())
    }

    fn take_link(&mut self, name: &str) -> ModelResult<Link> {
        self.topology.remove_edge(name)?;
        let link = self
            .links
            .shift_remove(name)
            .ok_or_else(|| ModelError::Invariant {
                what: format!("link {name} in topology but not in registry"),
            })?;
        self.check_valves.shift_remove(name);
        let slot = self.counts.link_slot(link.link_type());
        *slot = slot.saturating_sub(1);
        debug!(name, kind = %link.link_type(), "removed link");
        Ok(link)
    }

    fn take_node(&mut self, name: &str) -> ModelResult<Node> {
        self.topology.remove_node(name)?;
        let node = self
            .nodes
            .shift_remove(name)
            .ok_or_else(|| ModelError::Invariant {
                what: format!("node {name} in topology but not in registry"),
            })?;
        let slot = self.counts.node_slot(node.node_type());
        *slot = slot.saturating_sub(1);
        debug!(name, kind = %node.node_type(), "removed node");
        Ok(node)
    }

    fn remove_link_inner(&mut self, name: &str, expected: Option<LinkType>) -> ModelResult<Link> {
        let link = self.get_link(name)?;
        if let Some(expected) = expected
            && link.link_type() != expected
        {
            return Err(ModelError::WrongElementType {
                name: name.to_string(),
                expected: expected.to_string(),
                found: link.link_type().to_string(),
            });
        }
        self.take_link(name)
    }

    fn remove_node_inner(&mut self, name: &str, expected: Option<NodeType>) -> ModelResult<Node> {
        let node = self.get_node(name)?;
        if let Some(expected) = expected
            && node.node_type() != expected
        {
            return Err(ModelError::WrongElementType {
                name: name.to_string(),
                expected: expected.to_string(),
                found: node.node_type().to_string(),
            });
        }

        let incident: Vec<String> = self
            .topology
            .links_for_node(name)?
            .into_iter()
            .map(str::to_string)
            .collect();
        if !incident.is_empty() {
            match self.config.node_removal {
                NodeRemovalPolicy::Reject => {
                    return Err(ModelError::NodeInUse {
                        node: name.to_string(),
                        links: incident,
                    });
                }
                NodeRemovalPolicy::Cascade => {
                    warn!(
                        node = name,
                        links = ?incident,
                        "cascading node removal to incident links"
                    );
                    for link in &incident {
                        self.take_link(link)?;
                    }
                }
            }
        }
        self.take_node(name)
    }
}

fn check_name(name: &str) -> ModelResult<()> {
    if name.is_empty() {
        return Err(ModelError::InvalidArg {
            what: "element names cannot be empty".into(),
        });
    }
    Ok(())
}

fn not_found(kind: &'static str, name: &str) -> ModelError {
    ModelError::NotFound {
        kind,
        name: name.to_string(),
    }
}

fn duplicate(kind: &'static str, name: &str) -> ModelError {
    ModelError::DuplicateName {
        kind,
        name: name.to_string(),
    }
}
