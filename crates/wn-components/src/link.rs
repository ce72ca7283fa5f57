//! Link elements and their shared surface.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ComponentError;
use crate::pipe::Pipe;
use crate::pump::Pump;
use crate::valve::Valve;

/// Link kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkType {
    Pipe,
    Pump,
    Valve,
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LinkType::Pipe => "pipe",
            LinkType::Pump => "pump",
            LinkType::Valve => "valve",
        };
        f.write_str(s)
    }
}

/// Base status of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkStatus {
    Open,
    Closed,
    /// Valve actively controlling (neither fully open nor closed).
    Active,
    /// Pipe that only admits flow from start to end node.
    CheckValve,
}

impl LinkStatus {
    /// Canonical upper-case spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkStatus::Open => "OPEN",
            LinkStatus::Closed => "CLOSED",
            LinkStatus::Active => "ACTIVE",
            LinkStatus::CheckValve => "CV",
        }
    }
}

impl FromStr for LinkStatus {
    type Err = ComponentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OPEN" => Ok(LinkStatus::Open),
            "CLOSED" => Ok(LinkStatus::Closed),
            "ACTIVE" => Ok(LinkStatus::Active),
            "CV" => Ok(LinkStatus::CheckValve),
            _ => Err(ComponentError::UnknownVariant {
                kind: "link status",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric link attributes that can be queried across the whole network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkAttribute {
    Length,
    Diameter,
    Roughness,
    MinorLoss,
    Setting,
    Power,
}

impl FromStr for LinkAttribute {
    type Err = ComponentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "length" => Ok(LinkAttribute::Length),
            "diameter" => Ok(LinkAttribute::Diameter),
            "roughness" => Ok(LinkAttribute::Roughness),
            "minor_loss" => Ok(LinkAttribute::MinorLoss),
            "setting" => Ok(LinkAttribute::Setting),
            "power" => Ok(LinkAttribute::Power),
            _ => Err(ComponentError::UnknownVariant {
                kind: "link attribute",
                value: s.to_string(),
            }),
        }
    }
}

/// Link variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LinkKind {
    Pipe(Pipe),
    Pump(Pump),
    Valve(Valve),
}

/// A named link between a start node and an end node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    name: String,
    start_node: String,
    end_node: String,
    kind: LinkKind,
}

impl Link {
    pub fn new(
        name: impl Into<String>,
        start_node: impl Into<String>,
        end_node: impl Into<String>,
        kind: LinkKind,
    ) -> Self {
        Self {
            name: name.into(),
            start_node: start_node.into(),
            end_node: end_node.into(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start_node(&self) -> &str {
        &self.start_node
    }

    pub fn end_node(&self) -> &str {
        &self.end_node
    }

    pub fn kind(&self) -> &LinkKind {
        &self.kind
    }

    pub fn link_type(&self) -> LinkType {
        match self.kind {
            LinkKind::Pipe(_) => LinkType::Pipe,
            LinkKind::Pump(_) => LinkType::Pump,
            LinkKind::Valve(_) => LinkType::Valve,
        }
    }

    /// Base status: pipes carry their own, pumps start open, valves active.
    pub fn status(&self) -> LinkStatus {
        match &self.kind {
            LinkKind::Pipe(p) => p.status,
            LinkKind::Pump(_) => LinkStatus::Open,
            LinkKind::Valve(_) => LinkStatus::Active,
        }
    }

    /// True for pipes registered as check valves.
    pub fn is_check_valve(&self) -> bool {
        matches!(&self.kind, LinkKind::Pipe(p) if p.status == LinkStatus::CheckValve)
    }

    /// Value of `attr` if this link kind carries it.
    pub fn attribute(&self, attr: LinkAttribute) -> Option<f64> {
        match (&self.kind, attr) {
            (LinkKind::Pipe(p), LinkAttribute::Length) => Some(p.length),
            (LinkKind::Pipe(p), LinkAttribute::Diameter) => Some(p.diameter),
            (LinkKind::Pipe(p), LinkAttribute::Roughness) => Some(p.roughness),
            (LinkKind::Pipe(p), LinkAttribute::MinorLoss) => Some(p.minor_loss),
            (LinkKind::Pump(p), LinkAttribute::Power) => p.power(),
            (LinkKind::Valve(v), LinkAttribute::Diameter) => Some(v.diameter),
            (LinkKind::Valve(v), LinkAttribute::MinorLoss) => Some(v.minor_loss),
            (LinkKind::Valve(v), LinkAttribute::Setting) => Some(v.setting),
            _ => None,
        }
    }

    pub fn as_pipe(&self) -> Option<&Pipe> {
        match &self.kind {
            LinkKind::Pipe(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_pump(&self) -> Option<&Pump> {
        match &self.kind {
            LinkKind::Pump(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_valve(&self) -> Option<&Valve> {
        match &self.kind {
            LinkKind::Valve(v) => Some(v),
            _ => None,
        }
    }
}
