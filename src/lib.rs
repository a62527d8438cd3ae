#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod detector;
pub mod diagnostics;
pub mod image;
pub mod segment;

// Stage modules, public so tools and tests can drive each step.
pub mod angle;
pub mod gradient;
pub mod nfa;
pub mod rect;
pub mod refine;
pub mod region;
pub mod scale;
pub mod traversal;

pub mod config;

// --- High-level re-exports -------------------------------------------------

pub use crate::detector::{detect_segments, LineSegmentDetector, LsdError, LsdParams, SeedRoi};
pub use crate::diagnostics::DetectionReport;
pub use crate::segment::LineSegment;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use lsd_detector::prelude::*;
///
/// # fn main() -> Result<(), LsdError> {
/// let (w, h) = (640usize, 480usize);
/// let gray = vec![0u8; w * h];
/// let img = ImageU8 { w, h, stride: w, data: &gray };
///
/// let det = LineSegmentDetector::new(LsdParams::default());
/// let segments = det.detect_u8(img)?;
/// println!("segments={}", segments.len());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ImageF32, ImageU8};
    pub use crate::{LineSegment, LineSegmentDetector, LsdError, LsdParams};
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    pub use crate::gradient::{GradientField, UNDEFINED_ANGLE};
    pub use crate::nfa::{improve_rectangle, log_number_of_tests, min_region_size, rect_log_nfa};
    pub use crate::rect::{fit_rectangle, Rectangle};
    pub use crate::refine::{Refinement, RegionRefiner};
    pub use crate::region::{Region, RegionGrower, UsedMask};
    pub use crate::scale::gaussian_sample;
    pub use crate::traversal::PseudoOrder;
}
