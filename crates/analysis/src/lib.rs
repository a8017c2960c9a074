//! Headless analysis over the live buffers: reference-lap recording and
//! input statistics.

mod nearest;
mod smoothing;
mod summary;
mod tracker;

pub use nearest::{nearest_point, NearestPoint};
pub use smoothing::{smooth_positions, DEFAULT_HALF_WIDTH};
pub use summary::{input_summary, InputSummary};
pub use tracker::{ReferenceTracker, TrackerConfig, TrackerState};
