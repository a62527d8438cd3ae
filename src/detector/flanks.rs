//! Pairing of the two edges of a thin line.
//!
//! A thin bright (or dark) line has two level-line regions of opposite
//! polarity, one per flank, so the search accepts two antiparallel
//! segments a pixel or two apart. Such pairs are folded into one segment
//! on the line's centre, the way near-collinear segments are bundled.
use crate::segment::LineSegment;

/// Extra perpendicular slack, in pixels, on top of the half-widths.
pub const FLANK_GAP: f64 = 1.5;
/// Minimal shared extent along the axis, as a fraction of the shorter segment.
const MIN_OVERLAP: f64 = 0.5;

/// Local frame of a segment: origin, unit direction, unit normal.
struct Frame {
    origin: (f64, f64),
    dir: (f64, f64),
    normal: (f64, f64),
    length: f64,
}

impl Frame {
    fn of(s: &LineSegment) -> Option<Self> {
        let length = s.length();
        if !(length > 0.0) {
            return None;
        }
        let dir = ((s.x2 - s.x1) / length, (s.y2 - s.y1) / length);
        Some(Self {
            origin: (s.x1, s.y1),
            dir,
            normal: (-dir.1, dir.0),
            length,
        })
    }

    /// Coordinates of `(x, y)` along and across the axis.
    fn project(&self, x: f64, y: f64) -> (f64, f64) {
        let px = x - self.origin.0;
        let py = y - self.origin.1;
        (
            px * self.dir.0 + py * self.dir.1,
            px * self.normal.0 + py * self.normal.1,
        )
    }

    fn point(&self, along: f64, across: f64) -> (f64, f64) {
        (
            self.origin.0 + along * self.dir.0 + across * self.normal.0,
            self.origin.1 + along * self.dir.1 + across * self.normal.1,
        )
    }
}

/// True when `a` and `b` look like the two flanks of one thin line:
/// antiparallel within the tighter precision, overlapping along the axis,
/// and no farther apart than their half-widths plus `gap`.
pub fn is_flank_pair(a: &LineSegment, b: &LineSegment, gap: f64) -> bool {
    let (Some(fa), Some(fb)) = (Frame::of(a), Frame::of(b)) else {
        return false;
    };
    let precision = a.precision.min(b.precision);
    let dot = fa.dir.0 * fb.dir.0 + fa.dir.1 * fb.dir.1;
    if dot > -precision.cos() {
        return false;
    }

    let (mx, my) = b.midpoint();
    let (_, offset) = fa.project(mx, my);
    if offset.abs() > 0.5 * (a.width + b.width) + gap {
        return false;
    }

    let (t1, _) = fa.project(b.x1, b.y1);
    let (t2, _) = fa.project(b.x2, b.y2);
    let overlap = t1.max(t2).min(fa.length) - t1.min(t2).max(0.0);
    overlap >= MIN_OVERLAP * fa.length.min(fb.length)
}

/// Single segment on the centre line of a flank pair, spanning both.
/// Keeps the direction of `a`, the tighter precision and the stronger score.
pub fn merge_flanks(a: &LineSegment, b: &LineSegment) -> LineSegment {
    let Some(fa) = Frame::of(a) else {
        return *b;
    };
    let (mx, my) = b.midpoint();
    let (_, offset) = fa.project(mx, my);
    let (t1, _) = fa.project(b.x1, b.y1);
    let (t2, _) = fa.project(b.x2, b.y2);
    let start = t1.min(t2).min(0.0);
    let end = t1.max(t2).max(fa.length);
    let (x1, y1) = fa.point(start, 0.5 * offset);
    let (x2, y2) = fa.point(end, 0.5 * offset);
    LineSegment {
        x1,
        y1,
        x2,
        y2,
        width: offset.abs() + 0.5 * (a.width + b.width),
        precision: a.precision.min(b.precision),
        neg_log_nfa: a.neg_log_nfa.max(b.neg_log_nfa),
    }
}

/// Greedy pairing in list order: each segment joins at most one later
/// partner. Returns index pairs `(i, j)` with `i < j`.
pub fn pair_flanks(segments: &[LineSegment], gap: f64) -> Vec<(usize, usize)> {
    let mut taken = vec![false; segments.len()];
    let mut pairs = Vec::new();
    for i in 0..segments.len() {
        if taken[i] {
            continue;
        }
        let partner = (i + 1..segments.len())
            .find(|&j| !taken[j] && is_flank_pair(&segments[i], &segments[j], gap));
        if let Some(j) = partner {
            taken[i] = true;
            taken[j] = true;
            pairs.push((i, j));
        }
    }
    pairs
}
