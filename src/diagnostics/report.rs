use super::TimingBreakdown;
use crate::refine::Refinement;
use crate::segment::LineSegment;
use serde::Serialize;

/// Result of [`crate::LineSegmentDetector::detect_with_report`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub input: InputDescriptor,
    pub segments: Vec<LineSegment>,
    /// One entry per segment, same order.
    pub traces: Vec<SegmentTrace>,
    pub stats: DetectionStats,
    pub timing: TimingBreakdown,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    /// Grid size the detector ran on after resampling.
    pub working_width: usize,
    pub working_height: usize,
    pub scale: f64,
}

/// How an accepted segment came about.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentTrace {
    /// Seed pixel in input-grid coordinates.
    pub seed: [usize; 2],
    /// Region size after refinement, both flanks counted for a merged line.
    pub region_size: usize,
    pub refinement: Refinement,
    /// Seed of the opposite flank folded into this segment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_seed: Option<[usize; 2]>,
}

/// Counters over all seeds of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionStats {
    /// Pixels in the traversal.
    pub ordered_pixels: usize,
    /// Seeds that started a region.
    pub seeds: usize,
    pub rejected_small: usize,
    pub rejected_degenerate: usize,
    pub rejected_density: usize,
    pub rejected_nfa: usize,
    pub truncated: usize,
    pub angle_halved: usize,
    pub accepted: usize,
    /// Flank pairs folded into single segments.
    pub merged_flanks: usize,
}
