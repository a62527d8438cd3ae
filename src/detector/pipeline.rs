//! Detection run: resample, gradient, pseudo-ordering, then one pass over
//! the seeds in descending magnitude order.
//!
//! Each seed goes through a small state machine
//! `grow → fit → refine → validate`; every step may reject the candidate,
//! which only leaves its pixels marked used.
//!
//! ```no_run
//! use lsd_detector::{LineSegmentDetector, LsdParams};
//! use lsd_detector::image::ImageF32;
//!
//! # fn example(img: ImageF32) -> Result<(), lsd_detector::LsdError> {
//! let detector = LineSegmentDetector::new(LsdParams::default());
//! for s in detector.detect(&img)? {
//!     println!("({:.1},{:.1}) -> ({:.1},{:.1})", s.x1, s.y1, s.x2, s.y2);
//! }
//! # Ok(())
//! # }
//! ```
use super::error::LsdError;
use super::flanks::{merge_flanks, pair_flanks, FLANK_GAP};
use super::params::{to_input_pixel, LsdParams, Thresholds};
use crate::diagnostics::{
    elapsed_ms, DetectionReport, DetectionStats, InputDescriptor, SegmentTrace, TimingBreakdown,
};
use crate::gradient::GradientField;
use crate::image::{ImageF32, ImageU8};
use crate::nfa::improve_rectangle;
use crate::rect::{fit_rectangle, Rectangle};
use crate::refine::{Refined, Refinement, RegionRefiner};
use crate::region::{RegionGrower, UsedMask};
use crate::scale::{gaussian_sample, sampled_size};
use crate::segment::LineSegment;
use crate::traversal::PseudoOrder;
use log::{debug, trace};
use std::borrow::Cow;
use std::time::Instant;

/// Line segment detector configured once and reusable across images.
#[derive(Clone, Debug, Default)]
pub struct LineSegmentDetector {
    params: LsdParams,
}

/// Why a seed produced no segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Rejection {
    SmallRegion,
    Degenerate,
    LowDensity,
    NotMeaningful,
}

/// Accepted candidate in working-grid coordinates.
struct Candidate {
    rect: Rectangle,
    neg_log_nfa: f64,
    region_size: usize,
    refinement: Refinement,
}

impl LineSegmentDetector {
    pub fn new(params: LsdParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &LsdParams {
        &self.params
    }

    /// Detect segments in `image`; coordinates are in the input grid.
    pub fn detect(&self, image: &ImageF32) -> Result<Vec<LineSegment>, LsdError> {
        Ok(self.detect_with_report(image)?.segments)
    }

    /// Detect segments in an 8-bit view.
    pub fn detect_u8(&self, gray: ImageU8<'_>) -> Result<Vec<LineSegment>, LsdError> {
        if !gray.is_well_formed() {
            return Err(LsdError::BufferSizeMismatch {
                expected: gray.h.saturating_sub(1) * gray.stride + gray.w,
                actual: gray.data.len(),
            });
        }
        self.detect(&ImageF32::from_u8(&gray))
    }

    /// Detect segments and report how each was obtained along with
    /// rejection counters and stage timings.
    pub fn detect_with_report(&self, image: &ImageF32) -> Result<DetectionReport, LsdError> {
        self.params.validate()?;
        check_image(image)?;
        let total_start = Instant::now();
        let mut timing = TimingBreakdown::default();
        let scale = self.params.scale;

        if scale != 1.0 {
            let (width, height) = sampled_size(image.w, image.h, scale);
            if width < 2 || height < 2 {
                return Err(LsdError::ImageTooSmall { width, height });
            }
        }

        let stage = Instant::now();
        let working: Cow<'_, ImageF32> = if scale != 1.0 {
            Cow::Owned(gaussian_sample(image, scale, self.params.sigma_scale))
        } else {
            Cow::Borrowed(image)
        };
        timing.record("resample", stage);
        let (width, height) = (working.w, working.h);

        let thresholds = self.params.thresholds(width, height);
        debug!(
            "LineSegmentDetector::detect start w={} h={} working={}x{} rho={:.3} log_nt={:.3} min_region={}",
            image.w, image.h, width, height, thresholds.rho, thresholds.log_nt, thresholds.min_region_size
        );

        let stage = Instant::now();
        let field = GradientField::compute(&working, thresholds.rho);
        timing.record("gradient", stage);

        let stage = Instant::now();
        let order = PseudoOrder::build(&field, self.params.bucket_count);
        timing.record("ordering", stage);

        let stage = Instant::now();
        let search = SeedSearch::new(&field, &self.params, thresholds);
        let mut used = UsedMask::new(width, height);
        let mut stats = DetectionStats {
            ordered_pixels: order.len(),
            ..Default::default()
        };
        let mut segments = Vec::new();
        let mut traces = Vec::new();
        for (x, y) in order.iter() {
            if used.is_used(x, y) || !field.is_defined_at(x, y) {
                continue;
            }
            let seed = [to_input_pixel(x, scale), to_input_pixel(y, scale)];
            if let Some(roi) = &self.params.seed_roi {
                if !roi.contains(seed[0], seed[1]) {
                    continue;
                }
            }
            stats.seeds += 1;
            match search.run(&mut used, (x, y)) {
                Ok(candidate) => {
                    match candidate.refinement {
                        Refinement::None => {}
                        Refinement::Truncated => stats.truncated += 1,
                        Refinement::AngleHalved => stats.angle_halved += 1,
                    }
                    stats.accepted += 1;
                    segments.push(to_segment(&candidate, scale));
                    traces.push(SegmentTrace {
                        seed,
                        region_size: candidate.region_size,
                        refinement: candidate.refinement,
                        partner_seed: None,
                    });
                }
                Err(rejection) => {
                    trace!("seed ({x},{y}) rejected: {rejection:?}");
                    match rejection {
                        Rejection::SmallRegion => stats.rejected_small += 1,
                        Rejection::Degenerate => stats.rejected_degenerate += 1,
                        Rejection::LowDensity => stats.rejected_density += 1,
                        Rejection::NotMeaningful => stats.rejected_nfa += 1,
                    }
                }
            }
        }
        timing.record("search", stage);

        if self.params.merge_flanks {
            stats.merged_flanks = fold_flank_pairs(&mut segments, &mut traces);
        }
        timing.total_ms = elapsed_ms(total_start);

        debug!(
            "LineSegmentDetector::detect done ordered={} seeds={} accepted={} merged={} elapsed_ms={:.3}",
            stats.ordered_pixels, stats.seeds, stats.accepted, stats.merged_flanks, timing.total_ms
        );

        Ok(DetectionReport {
            input: InputDescriptor {
                width: image.w,
                height: image.h,
                working_width: width,
                working_height: height,
                scale,
            },
            segments,
            traces,
            stats,
            timing,
        })
    }
}

/// One-shot detection with `params`.
pub fn detect_segments(image: &ImageF32, params: &LsdParams) -> Result<Vec<LineSegment>, LsdError> {
    LineSegmentDetector::new(params.clone()).detect(image)
}

fn check_image(image: &ImageF32) -> Result<(), LsdError> {
    if image.w < 2 || image.h < 2 {
        return Err(LsdError::ImageTooSmall {
            width: image.w,
            height: image.h,
        });
    }
    let expected = image.w * image.h;
    if image.stride != image.w || image.data.len() != expected {
        return Err(LsdError::BufferSizeMismatch {
            expected,
            actual: image.data.len(),
        });
    }
    if let Some(i) = image.data.iter().position(|v| !v.is_finite()) {
        return Err(LsdError::NonFiniteSample {
            x: i % image.w,
            y: i / image.w,
        });
    }
    Ok(())
}

/// Replace each flank pair by its centre-line segment, in place of the
/// earlier member. Returns the number of pairs folded.
fn fold_flank_pairs(segments: &mut Vec<LineSegment>, traces: &mut Vec<SegmentTrace>) -> usize {
    let pairs = pair_flanks(segments, FLANK_GAP);
    if pairs.is_empty() {
        return 0;
    }
    let mut dropped = vec![false; segments.len()];
    for &(i, j) in &pairs {
        segments[i] = merge_flanks(&segments[i], &segments[j]);
        traces[i].partner_seed = Some(traces[j].seed);
        traces[i].region_size += traces[j].region_size;
        dropped[j] = true;
    }
    let (kept_segments, kept_traces): (Vec<_>, Vec<_>) = segments
        .iter()
        .zip(traces.iter())
        .zip(&dropped)
        .filter(|(_, gone)| !**gone)
        .map(|((s, t), _)| (*s, *t))
        .unzip();
    *segments = kept_segments;
    *traces = kept_traces;
    trace!("folded {} flank pairs", pairs.len());
    pairs.len()
}

/// Working-grid rectangle to an input-grid segment. The 2x2 gradient sits
/// at `(x + 0.5, y + 0.5)`.
fn to_segment(candidate: &Candidate, scale: f64) -> LineSegment {
    let r = &candidate.rect;
    LineSegment {
        x1: (r.x1 + 0.5) / scale,
        y1: (r.y1 + 0.5) / scale,
        x2: (r.x2 + 0.5) / scale,
        y2: (r.y2 + 0.5) / scale,
        width: r.width / scale,
        precision: r.precision,
        neg_log_nfa: candidate.neg_log_nfa,
    }
}

/// Per-run state shared by all seeds.
struct SeedSearch<'a> {
    field: &'a GradientField,
    grower: RegionGrower<'a>,
    refiner: RegionRefiner<'a>,
    thresholds: Thresholds,
    coverage: f64,
    log_eps: f64,
}

impl<'a> SeedSearch<'a> {
    fn new(field: &'a GradientField, params: &LsdParams, thresholds: Thresholds) -> Self {
        Self {
            field,
            grower: RegionGrower::new(field),
            refiner: RegionRefiner::new(
                RegionGrower::new(field),
                params.density_threshold,
                thresholds.min_region_size,
                params.mass_coverage,
            ),
            thresholds,
            coverage: params.mass_coverage,
            log_eps: params.log_eps,
        }
    }

    fn run(&self, used: &mut UsedMask, seed: (usize, usize)) -> Result<Candidate, Rejection> {
        let region = self.grower.grow(used, seed, self.thresholds.precision);
        if region.len() < self.thresholds.min_region_size {
            return Err(Rejection::SmallRegion);
        }

        let rect = fit_rectangle(&region, self.coverage).ok_or(Rejection::Degenerate)?;

        let Refined {
            region,
            rect,
            refinement,
        } = self
            .refiner
            .refine(used, region, rect)
            .ok_or(Rejection::LowDensity)?;

        let (neg_log_nfa, rect) =
            improve_rectangle(&rect, self.field, self.thresholds.log_nt, self.log_eps);
        if neg_log_nfa <= self.log_eps {
            return Err(Rejection::NotMeaningful);
        }

        Ok(Candidate {
            rect,
            neg_log_nfa,
            region_size: region.len(),
            refinement,
        })
    }
}
