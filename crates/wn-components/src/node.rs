//! Node elements: junctions, tanks and reservoirs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::{check_finite, check_non_negative, check_positive};
use crate::error::{ComponentError, ComponentResult};

/// Node kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    Junction,
    Tank,
    Reservoir,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeType::Junction => "junction",
            NodeType::Tank => "tank",
            NodeType::Reservoir => "reservoir",
        };
        f.write_str(s)
    }
}

/// Numeric node attributes that can be queried across the whole network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeAttribute {
    Elevation,
    BaseDemand,
    BaseHead,
    InitLevel,
    MinLevel,
    MaxLevel,
    Diameter,
    MinVolume,
}

impl FromStr for NodeAttribute {
    type Err = ComponentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "elevation" => Ok(NodeAttribute::Elevation),
            "base_demand" => Ok(NodeAttribute::BaseDemand),
            "base_head" => Ok(NodeAttribute::BaseHead),
            "init_level" => Ok(NodeAttribute::InitLevel),
            "min_level" => Ok(NodeAttribute::MinLevel),
            "max_level" => Ok(NodeAttribute::MaxLevel),
            "diameter" => Ok(NodeAttribute::Diameter),
            "min_vol" | "min_volume" => Ok(NodeAttribute::MinVolume),
            _ => Err(ComponentError::UnknownVariant {
                kind: "node attribute",
                value: s.to_string(),
            }),
        }
    }
}

/// Demand node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Junction {
    pub elevation: f64,
    pub base_demand: f64,
    pub demand_pattern: Option<String>,
}

impl Junction {
    /// Create a junction. Demand may be negative (an inflow).
    pub fn new(
        elevation: f64,
        base_demand: f64,
        demand_pattern: Option<String>,
    ) -> ComponentResult<Self> {
        Ok(Self {
            elevation: check_finite(elevation, "junction elevation")?,
            base_demand: check_finite(base_demand, "junction base demand")?,
            demand_pattern,
        })
    }
}

/// Cylindrical storage tank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tank {
    pub elevation: f64,
    pub init_level: f64,
    pub min_level: f64,
    pub max_level: f64,
    pub diameter: f64,
    pub min_vol: f64,
}

impl Tank {
    /// Create a tank.
    ///
    /// # Errors
    /// Levels must satisfy `min_level <= init_level <= max_level`, the
    /// diameter must be positive and the minimum volume non-negative.
    pub fn new(
        elevation: f64,
        init_level: f64,
        min_level: f64,
        max_level: f64,
        diameter: f64,
        min_vol: f64,
    ) -> ComponentResult<Self> {
        let elevation = check_finite(elevation, "tank elevation")?;
        let init_level = check_finite(init_level, "tank initial level")?;
        let min_level = check_finite(min_level, "tank minimum level")?;
        let max_level = check_finite(max_level, "tank maximum level")?;
        let diameter = check_positive(diameter, "tank diameter")?;
        let min_vol = check_non_negative(min_vol, "tank minimum volume")?;

        if min_level > max_level {
            return Err(ComponentError::NonPhysical {
                what: format!("tank minimum level {min_level} exceeds maximum level {max_level}"),
            });
        }
        if init_level < min_level || init_level > max_level {
            return Err(ComponentError::NonPhysical {
                what: format!(
                    "tank initial level {init_level} outside [{min_level}, {max_level}]"
                ),
            });
        }

        Ok(Self {
            elevation,
            init_level,
            min_level,
            max_level,
            diameter,
            min_vol,
        })
    }

    /// Cross-sectional area of the cylinder.
    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.diameter * self.diameter / 4.0
    }
}

/// Fixed-head source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservoir {
    pub base_head: f64,
    pub head_pattern: Option<String>,
}

impl Reservoir {
    pub fn new(base_head: f64, head_pattern: Option<String>) -> ComponentResult<Self> {
        Ok(Self {
            base_head: check_finite(base_head, "reservoir base head")?,
            head_pattern,
        })
    }
}

/// Node variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    Junction(Junction),
    Tank(Tank),
    Reservoir(Reservoir),
}

/// A named node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    name: String,
    kind: NodeKind,
}

impl Node {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn node_type(&self) -> NodeType {
        match self.kind {
            NodeKind::Junction(_) => NodeType::Junction,
            NodeKind::Tank(_) => NodeType::Tank,
            NodeKind::Reservoir(_) => NodeType::Reservoir,
        }
    }

    /// Reference elevation; for a reservoir this is its base head.
    pub fn elevation(&self) -> f64 {
        match &self.kind {
            NodeKind::Junction(j) => j.elevation,
            NodeKind::Tank(t) => t.elevation,
            NodeKind::Reservoir(r) => r.base_head,
        }
    }

    /// Tanks and reservoirs fix the head at their node.
    pub fn is_fixed_head(&self) -> bool {
        matches!(self.kind, NodeKind::Tank(_) | NodeKind::Reservoir(_))
    }

    /// Value of `attr` if this node kind carries it.
    pub fn attribute(&self, attr: NodeAttribute) -> Option<f64> {
        match (&self.kind, attr) {
            (NodeKind::Junction(j), NodeAttribute::Elevation) => Some(j.elevation),
            (NodeKind::Junction(j), NodeAttribute::BaseDemand) => Some(j.base_demand),
            (NodeKind::Tank(t), NodeAttribute::Elevation) => Some(t.elevation),
            (NodeKind::Tank(t), NodeAttribute::InitLevel) => Some(t.init_level),
            (NodeKind::Tank(t), NodeAttribute::MinLevel) => Some(t.min_level),
            (NodeKind::Tank(t), NodeAttribute::MaxLevel) => Some(t.max_level),
            (NodeKind::Tank(t), NodeAttribute::Diameter) => Some(t.diameter),
            (NodeKind::Tank(t), NodeAttribute::MinVolume) => Some(t.min_vol),
            (NodeKind::Reservoir(r), NodeAttribute::BaseHead) => Some(r.base_head),
            _ => None,
        }
    }

    pub fn as_junction(&self) -> Option<&Junction> {
        match &self.kind {
            NodeKind::Junction(j) => Some(j),
            _ => None,
        }
    }

    pub fn as_tank(&self) -> Option<&Tank> {
        match &self.kind {
            NodeKind::Tank(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_reservoir(&self) -> Option<&Reservoir> {
        match &self.kind {
            NodeKind::Reservoir(r) => Some(r),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn junction_attributes() {
        let node = Node::new(
            "J1",
            NodeKind::Junction(Junction::new(15.0, 150.0, Some("pattern1".into())).unwrap()),
        );
        assert_eq!(node.name(), "J1");
        assert_eq!(node.node_type(), NodeType::Junction);
        assert_eq!(node.attribute(NodeAttribute::BaseDemand), Some(150.0));
        assert_eq!(node.attribute(NodeAttribute::BaseHead), None);
        assert!(!node.is_fixed_head());
    }

    #[test]
    fn tank_level_bounds() {
        assert!(Tank::new(15.0, 75.0, 0.0, 100.0, 10.0, 0.0).is_ok());
        assert!(Tank::new(15.0, 120.0, 0.0, 100.0, 10.0, 0.0).is_err());
        assert!(Tank::new(15.0, 5.0, 10.0, 1.0, 10.0, 0.0).is_err());
        assert!(Tank::new(15.0, 5.0, 0.0, 10.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn reservoir_elevation_is_head() {
        let node = Node::new("R1", NodeKind::Reservoir(Reservoir::new(30.0, None).unwrap()));
        assert_eq!(node.elevation(), 30.0);
        assert!(node.is_fixed_head());
        assert!(node.as_reservoir().is_some());
        assert!(node.as_tank().is_none());
    }

    #[test]
    fn attribute_names_parse() {
        assert_eq!("Elevation".parse::<NodeAttribute>(), Ok(NodeAttribute::Elevation));
        assert_eq!("min_vol".parse::<NodeAttribute>(), Ok(NodeAttribute::MinVolume));
        assert!("colour".parse::<NodeAttribute>().is_err());
    }
}
