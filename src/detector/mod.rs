//! Orchestration of a detection run.
//!
//! - [`params`]: [`LsdParams`], the knobs of a run, and their validation.
//! - `error`: [`LsdError`], raised for malformed input only.
//! - `pipeline`: [`LineSegmentDetector`], which resamples the input, builds
//!   the gradient field and its pseudo-ordering, and drives every seed
//!   through growth, fitting, refinement and validation.
//! - [`flanks`]: folds the two edges of a thin line into one segment.
//!
//! Candidates rejected along the way are not errors; they only show up as
//! counters in [`crate::diagnostics::DetectionStats`].

mod error;
pub mod flanks;
pub mod params;
mod pipeline;

pub use error::LsdError;
pub use params::{LsdParams, SeedRoi};
pub use pipeline::{detect_segments, LineSegmentDetector};
