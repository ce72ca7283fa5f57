//! Splicing a later run onto an earlier one.

use rayon::prelude::*;
use tracing::debug;

use crate::error::{ResultsError, ResultsResult};
use crate::frame::ResultFrame;
use crate::results::{FrameMap, SimulationResults};

/// Node frame whose first time is the splice point, and the shape used
/// for node keys one side lacks.
pub const NODE_REFERENCE_KEY: &str = "head";
/// Shape used for link keys one side lacks.
pub const LINK_REFERENCE_KEY: &str = "flowrate";

impl SimulationResults {
    /// Append the rows of `other`, a subsequent run, in place.
    ///
    /// The splice point is the first time of `other.node["head"]`. Rows of
    /// `self` at or after it are dropped and `other`'s rows follow, so no
    /// timestamp appears twice. Metadata such as `sim_time` is left alone.
    /// A key only `self` has is padded with NaN
    /// rows shaped like `other`'s reference frame; a key only `other` has
    /// gets NaN rows shaped like `self`'s reference frame before its own.
    ///
    /// # Errors
    /// [`ResultsError::MissingKey`] when a needed reference frame is absent
    /// and [`ResultsError::EmptyFrame`] when `other.node["head"]` has no
    /// rows. `self` is unchanged on error.
    pub fn append_results_from(&mut self, other: &SimulationResults) -> ResultsResult<()> {
        let reference = reference(&other.node, "node", NODE_REFERENCE_KEY)?;
        let cut = *reference
            .times()
            .first()
            .ok_or_else(|| ResultsError::EmptyFrame {
                key: NODE_REFERENCE_KEY.to_string(),
            })?;

        let link = splice(&self.link, &other.link, "link", LINK_REFERENCE_KEY, cut)?;
        let node = splice(&self.node, &other.node, "node", NODE_REFERENCE_KEY, cut)?;
        self.link = link;
        self.node = node;

        debug!(cut, network = %self.network_name, "appended results");
        Ok(())
    }
}

fn reference<'a>(
    group: &'a FrameMap,
    group_name: &'static str,
    key: &str,
) -> ResultsResult<&'a ResultFrame> {
    group.get(key).ok_or_else(|| ResultsError::MissingKey {
        group: group_name,
        key: key.to_string(),
    })
}

fn splice(
    mine: &FrameMap,
    theirs: &FrameMap,
    group: &'static str,
    reference_key: &str,
    cut: i64,
) -> ResultsResult<FrameMap> {
    let mut out: FrameMap = mine
        .par_iter()
        .map(|(key, frame)| -> ResultsResult<(String, ResultFrame)> {
            let tail = match theirs.get(key) {
                Some(f) => f.clone(),
                None => reference(theirs, group, reference_key)?.nan_like(),
            };
            Ok((key.clone(), frame.rows_before(cut).concat(&tail)?))
        })
        .collect::<ResultsResult<_>>()?;

    for (key, frame) in theirs {
        if mine.contains_key(key) {
            continue;
        }
        let head = reference(mine, group, reference_key)?
            .rows_before(cut)
            .nan_like();
        out.insert(key.clone(), head.concat(frame)?);
    }
    Ok(out)
}
