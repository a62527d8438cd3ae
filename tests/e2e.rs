mod common;

use common::synthetic_image::{
    diagonal_half_plane, diagonal_line, flat, shapes_scene, vertical_step,
};
use lsd_detector::image::{ImageF32, ImageU8};
use lsd_detector::stages::{GradientField, PseudoOrder};
use lsd_detector::{detect_segments, LineSegment, LineSegmentDetector, LsdParams, SeedRoi};
use std::collections::HashSet;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn detect(img: &ImageF32, params: LsdParams) -> Vec<LineSegment> {
    LineSegmentDetector::new(params)
        .detect(img)
        .expect("valid input")
}

/// Endpoints ordered by x, then y.
fn ordered(s: &LineSegment) -> ((f64, f64), (f64, f64)) {
    let a = (s.x1, s.y1);
    let b = (s.x2, s.y2);
    if (a.0, a.1) <= (b.0, b.1) {
        (a, b)
    } else {
        (b, a)
    }
}

#[test]
fn flat_image_yields_no_segments() {
    init_logger();
    let report = LineSegmentDetector::new(LsdParams::default())
        .detect_with_report(&flat(64, 48, 128.0))
        .expect("detect");
    assert!(report.segments.is_empty());
    assert_eq!(report.stats.ordered_pixels, 0);
    assert_eq!(report.stats.seeds, 0);
}

#[test]
fn bright_diagonal_line_gives_one_segment() {
    init_logger();
    // 36 pixels from (25, 25) to (60, 60): length 35·√2 ≈ 49.5
    let report = LineSegmentDetector::new(LsdParams::default())
        .detect_with_report(&diagonal_line(100, 25, 36))
        .expect("detect");
    let segments = &report.segments;
    assert_eq!(segments.len(), 1, "segments={segments:?}");
    assert_eq!(report.stats.merged_flanks, 1);
    assert!(report.traces[0].partner_seed.is_some());

    let (a, b) = ordered(&segments[0]);
    for (got, want) in [(a, (25.0, 25.0)), (b, (60.0, 60.0))] {
        assert!(
            (got.0 - want.0).abs() <= 1.0 && (got.1 - want.1).abs() <= 1.0,
            "endpoint {got:?} too far from {want:?}"
        );
    }
    let deg = segments[0].angle().to_degrees().rem_euclid(180.0);
    assert!((deg - 45.0).abs() <= 22.5, "angle={deg}");
    assert!(segments[0].neg_log_nfa > 0.0);
}

#[test]
fn line_flanks_stay_separate_without_merging() {
    let params = LsdParams {
        merge_flanks: false,
        ..Default::default()
    };
    let segments = detect(&diagonal_line(100, 25, 36), params);
    assert_eq!(segments.len(), 2, "segments={segments:?}");
    let d0 = segments[0].angle();
    let d1 = segments[1].angle();
    // opposite polarity: directions differ by π
    assert!((((d0 - d1).abs() - std::f64::consts::PI).abs()) < 0.4, "{d0} vs {d1}");
}

#[test]
fn single_diagonal_edge_is_recovered() {
    init_logger();
    let segments = detect(&diagonal_half_plane(100, 65), LsdParams::default());
    assert_eq!(segments.len(), 1, "segments={segments:?}");

    // the edge is the line x - y = 64.5 between the image borders
    let (a, b) = ordered(&segments[0]);
    let (ta, tb) = ((64.0, -0.5), (99.5, 35.0));
    for (got, want) in [(a, ta), (b, tb)] {
        assert!(
            (got.0 - want.0).abs() <= 1.0 && (got.1 - want.1).abs() <= 1.0,
            "endpoint {got:?} too far from {want:?}"
        );
    }

    let deg = segments[0].angle().to_degrees().rem_euclid(180.0);
    assert!((deg - 45.0).abs() <= 22.5, "angle={deg}");
}

#[test]
fn detection_is_deterministic() {
    init_logger();
    let img = shapes_scene();
    let first = detect(&img, LsdParams::default());
    let second = detect(&img, LsdParams::default());
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn accepted_rectangles_are_valid_and_meaningful() {
    init_logger();
    let img = shapes_scene();
    for log_eps in [0.0, 2.0] {
        let params = LsdParams {
            log_eps,
            ..Default::default()
        };
        for s in detect(&img, params) {
            assert!(s.width > 0.0, "{s:?}");
            assert!(s.length() >= s.width, "{s:?}");
            assert!(s.neg_log_nfa > log_eps, "{s:?}");
        }
    }
}

#[test]
fn raising_the_acceptance_threshold_never_adds_segments() {
    init_logger();
    let img = shapes_scene();
    let mut previous = usize::MAX;
    for log_eps in [-2.0, 0.0, 5.0, 20.0, 60.0] {
        let params = LsdParams {
            log_eps,
            ..Default::default()
        };
        let count = detect(&img, params).len();
        assert!(count <= previous, "log_eps={log_eps}: {count} > {previous}");
        previous = count;
    }
}

#[test]
fn seeds_stay_inside_the_region_of_interest() {
    init_logger();
    let roi = SeedRoi {
        x0: 0,
        y0: 0,
        x1: 49,
        y1: 99,
    };
    let params = LsdParams {
        seed_roi: Some(roi),
        ..Default::default()
    };
    let report = LineSegmentDetector::new(params)
        .detect_with_report(&shapes_scene())
        .expect("detect");
    assert!(!report.segments.is_empty());
    for trace in &report.traces {
        assert!(
            roi.contains(trace.seed[0], trace.seed[1]),
            "seed {:?} outside roi",
            trace.seed
        );
    }
}

#[test]
fn each_seed_starts_at_most_one_segment() {
    init_logger();
    let report = LineSegmentDetector::new(LsdParams::default())
        .detect_with_report(&shapes_scene())
        .expect("detect");
    assert_eq!(report.traces.len(), report.segments.len());
    let seeds: HashSet<[usize; 2]> = report.traces.iter().map(|t| t.seed).collect();
    assert_eq!(seeds.len(), report.traces.len());
    assert!(report.stats.seeds >= report.stats.accepted);
    let rejected = report.stats.rejected_small
        + report.stats.rejected_degenerate
        + report.stats.rejected_density
        + report.stats.rejected_nfa;
    assert_eq!(rejected + report.stats.accepted, report.stats.seeds);
}

#[test]
fn traversal_visits_strongest_buckets_first() {
    let params = LsdParams::default();
    let img = shapes_scene();
    let field = GradientField::compute(&img, params.gradient_threshold() as f32);
    let order = PseudoOrder::build(&field, params.bucket_count);
    let mut last = usize::MAX;
    for (x, y) in order.iter() {
        let bucket = order.bucket_index(field.magnitude_at(x, y));
        assert!(bucket <= last, "bucket {bucket} after {last} at ({x},{y})");
        last = bucket;
    }
    assert_eq!(order.len(), field.defined_count());
}

#[test]
fn u8_and_f32_inputs_agree() {
    init_logger();
    let img = vertical_step(40, 30, 17);
    let bytes: Vec<u8> = img.data.iter().map(|&v| v as u8).collect();
    let view = ImageU8 {
        w: 40,
        h: 30,
        stride: 40,
        data: &bytes,
    };
    let detector = LineSegmentDetector::new(LsdParams::default());
    let from_u8 = detector.detect_u8(view).expect("u8");
    let from_f32 = detect_segments(&img, &LsdParams::default()).expect("f32");
    assert_eq!(from_u8, from_f32);
    assert_eq!(from_u8.len(), 1);
}

#[test]
fn report_serializes_in_camel_case() {
    let report = LineSegmentDetector::new(LsdParams::default())
        .detect_with_report(&vertical_step(40, 30, 17))
        .expect("detect");
    let json = serde_json::to_value(&report).expect("serialize");
    assert!(json["segments"][0]["negLogNfa"].as_f64().expect("score") > 0.0);
    assert_eq!(json["traces"][0]["refinement"], "none");
    assert_eq!(json["input"]["workingWidth"], 40);
    assert!(json["timing"]["stages"].as_array().expect("stages").len() >= 4);
}

#[test]
fn invalid_parameters_fail_before_detection() {
    let params = LsdParams {
        scale: -1.0,
        ..Default::default()
    };
    assert!(detect_segments(&flat(10, 10, 0.0), &params).is_err());
}
