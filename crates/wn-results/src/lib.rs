//! wn-results: time-indexed simulation output.
//!
//! A [`SimulationResults`] holds one [`ResultFrame`] per attribute for nodes
//! and for links. Result sets support elementwise arithmetic (`+`, `-`, `/`,
//! negation, `abs`, `powf`, division by a count) and splicing a subsequent
//! run onto an earlier one with [`SimulationResults::append_results_from`].
//!
//! # Example
//!
//! ```
//! use wn_results::{ResultFrame, SimulationResults};
//!
//! let head = |h: f64| {
//!     ResultFrame::new(vec![0, 3600]).unwrap().with_column("J1", vec![h, h]).unwrap()
//! };
//! let a = SimulationResults::new("base").with_node("head", head(10.0));
//! let b = SimulationResults::new("alt").with_node("head", head(12.5));
//!
//! let diff = &b - &a;
//! assert_eq!(diff.node["head"].value(3600, "J1"), Some(2.5));
//! ```

pub mod error;
pub mod frame;
pub mod merge;
pub mod ops;
pub mod results;

pub use error::{ResultsError, ResultsResult};
pub use frame::ResultFrame;
pub use merge::{LINK_REFERENCE_KEY, NODE_REFERENCE_KEY};
pub use results::{FrameMap, SimulationResults};
