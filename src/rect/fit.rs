use super::Rectangle;
use crate::angle::{angle_diff, angle_diff_signed};
use crate::region::Region;
use nalgebra::{Matrix2, SymmetricEigen};
use std::f64::consts::PI;

/// Fit an oriented rectangle to `region` from its weighted moments.
///
/// - Centre: gradient-magnitude weighted centroid.
/// - Axis: dominant eigenvector of the weighted inertia matrix, turned by π
///   when it disagrees with the region's mean level-line angle.
/// - Length and width: spans of the projections along and across the axis
///   that hold `coverage` of the region's weight, trimmed evenly from both
///   tails. The axis is re-centred across on the width span, and widths
///   below one pixel are raised to one.
/// - Density: region pixels inside the rectangle over its area.
///
/// Returns `None` for degenerate regions (no weight, zero length, or
/// `length < width`).
pub fn fit_rectangle(region: &Region, coverage: f64) -> Option<Rectangle> {
    let (cx, cy) = region.weighted_centroid()?;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for p in region.pixels() {
        let w = p.weight as f64;
        let ex = p.x as f64 - cx;
        let ey = p.y as f64 - cy;
        sxx += w * ex * ex;
        sxy += w * ex * ey;
        syy += w * ey * ey;
    }
    let eig = SymmetricEigen::new(Matrix2::new(sxx, sxy, sxy, syy));
    let major = if eig.eigenvalues[0] >= eig.eigenvalues[1] {
        eig.eigenvectors.column(0)
    } else {
        eig.eigenvectors.column(1)
    };
    let (vx, vy) = (major[0], major[1]);
    if !vx.is_finite() || !vy.is_finite() || vx.hypot(vy) < 1e-12 {
        return None;
    }

    let mut theta = vy.atan2(vx);
    if angle_diff(theta, region.angle()) > region.precision() {
        theta += PI;
    }
    let theta = angle_diff_signed(theta, 0.0);
    let (dx, dy) = (theta.cos(), theta.sin());

    let n = region.len();
    let mut along = Vec::with_capacity(n);
    let mut across = Vec::with_capacity(n);
    for p in region.pixels() {
        let ex = p.x as f64 - cx;
        let ey = p.y as f64 - cy;
        let w = p.weight as f64;
        along.push((ex * dx + ey * dy, w));
        across.push((-ex * dy + ey * dx, w));
    }
    let (l_min, l_max) = weighted_span(&mut along, coverage)?;
    let (w_min, w_max) = weighted_span(&mut across, coverage)?;

    let length = l_max - l_min;
    let width = (w_max - w_min).max(1.0);
    if !(length >= width) {
        return None;
    }

    let offset = 0.5 * (w_min + w_max);
    let (ox, oy) = (cx - dy * offset, cy + dx * offset);
    let mut rect = Rectangle {
        x1: ox + l_min * dx,
        y1: oy + l_min * dy,
        x2: ox + l_max * dx,
        y2: oy + l_max * dy,
        width,
        theta,
        dx,
        dy,
        precision: region.precision(),
        p: region.precision() / PI,
        density: 0.0,
    };

    let inside = region
        .pixels()
        .iter()
        .filter(|p| rect.contains(p.x as f64, p.y as f64))
        .count();
    rect.density = inside as f64 / rect.area();
    Some(rect)
}

/// Smallest and largest value after trimming `(1 - coverage) / 2` of the
/// total weight from each tail. `coverage >= 1` yields the plain min/max.
/// Sorts `samples` (value, weight) in place.
pub fn weighted_span(samples: &mut [(f64, f64)], coverage: f64) -> Option<(f64, f64)> {
    if samples.is_empty() {
        return None;
    }
    samples.sort_by(|a, b| a.0.total_cmp(&b.0));
    let first = samples[0].0;
    let last = samples[samples.len() - 1].0;
    if coverage >= 1.0 {
        return Some((first, last));
    }
    let total: f64 = samples.iter().map(|s| s.1).sum();
    let tail = 0.5 * (1.0 - coverage.max(0.0)) * total;

    let mut acc = 0.0;
    let mut lo = first;
    for &(v, w) in samples.iter() {
        acc += w;
        if acc > tail {
            lo = v;
            break;
        }
    }
    acc = 0.0;
    let mut hi = last;
    for &(v, w) in samples.iter().rev() {
        acc += w;
        if acc > tail {
            hi = v;
            break;
        }
    }
    Some((lo, hi.max(lo)))
}
