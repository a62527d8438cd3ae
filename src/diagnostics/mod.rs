//! Serializable report of a detection run: the segments, how each one was
//! obtained, rejection counters and per-stage timings.

mod report;
mod timing;

pub use report::{DetectionReport, DetectionStats, InputDescriptor, SegmentTrace};
pub use timing::{StageTiming, TimingBreakdown};

pub(crate) use timing::elapsed_ms;
