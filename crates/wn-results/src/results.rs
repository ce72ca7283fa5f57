//! Simulation result sets.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::frame::ResultFrame;

/// Frames keyed by attribute name ("head", "pressure", "flowrate", ...).
pub type FrameMap = BTreeMap<String, ResultFrame>;

/// Output of one hydraulic simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResults {
    pub network_name: String,
    /// Creation time, RFC 3339.
    pub timestamp: String,
    /// Simulated duration in seconds.
    pub sim_time: i64,
    pub node: FrameMap,
    pub link: FrameMap,
}

impl SimulationResults {
    pub fn new(network_name: impl Into<String>) -> Self {
        Self {
            network_name: network_name.into(),
            timestamp: chrono::Local::now().to_rfc3339(),
            sim_time: 0,
            node: FrameMap::new(),
            link: FrameMap::new(),
        }
    }

    pub fn with_node(mut self, key: impl Into<String>, frame: ResultFrame) -> Self {
        self.node.insert(key.into(), frame);
        self
    }

    pub fn with_link(mut self, key: impl Into<String>, frame: ResultFrame) -> Self {
        self.link.insert(key.into(), frame);
        self
    }

    /// `name[timestamp]`, the label operators use for their operands.
    pub fn label(&self) -> String {
        format!("{}[{}]", self.network_name, self.timestamp)
    }

    /// Shift every frame's time index by `seconds`.
    pub fn shift_time(&mut self, seconds: i64) {
        self.node
            .par_iter_mut()
            .chain(self.link.par_iter_mut())
            .for_each(|(_, frame)| frame.shift_time(seconds));
    }

    /// Apply `f` to every cell of every frame.
    pub(crate) fn map_cells<F>(&self, name: String, f: F) -> Self
    where
        F: Fn(f64) -> f64 + Sync + Send,
    {
        let map_group = |group: &FrameMap| -> FrameMap {
            group
                .par_iter()
                .map(|(k, frame)| (k.clone(), frame.map(&f)))
                .collect()
        };
        Self {
            node: map_group(&self.node),
            link: map_group(&self.link),
            ..Self::new(name)
        }
    }

    /// Combine frames present under the same key in both sets; keys only
    /// one side has are skipped.
    pub(crate) fn zip_cells<F>(&self, other: &Self, name: String, f: F) -> Self
    where
        F: Fn(f64, f64) -> f64 + Sync + Send,
    {
        let zip_group = |mine: &FrameMap, theirs: &FrameMap| -> FrameMap {
            mine.par_iter()
                .filter_map(|(k, a)| theirs.get(k).map(|b| (k.clone(), a.zip_with(b, &f))))
                .collect()
        };
        Self {
            node: zip_group(&self.node, &other.node),
            link: zip_group(&self.link, &other.link),
            ..Self::new(name)
        }
    }
}
