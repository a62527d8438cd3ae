//! Oriented rectangles approximating grown regions.
//!
//! A rectangle is stored by the two ends of its central axis, its width and
//! its orientation. The orientation follows the region's level-line
//! direction (not merely the axis modulo π), so pixel alignment can be
//! tested against it directly.

mod fit;
mod scan;

pub use fit::{fit_rectangle, weighted_span};
pub use scan::RectPixels;

use serde::Serialize;

/// Slack used when testing whether a point lies on the rectangle boundary.
const BOUNDARY_EPS: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rectangle {
    /// First end of the central axis.
    pub x1: f64,
    pub y1: f64,
    /// Second end of the central axis.
    pub x2: f64,
    pub y2: f64,
    /// Extent across the axis, at least one pixel when fitted.
    pub width: f64,
    /// Orientation of the axis from `(x1, y1)` to `(x2, y2)`.
    pub theta: f64,
    /// Unit vector `(cos θ, sin θ)`.
    pub dx: f64,
    pub dy: f64,
    /// Angle tolerance in radians.
    pub precision: f64,
    /// Probability that a random level-line angle is aligned: `precision / π`.
    pub p: f64,
    /// Fraction of the rectangle area covered by region pixels.
    pub density: f64,
}

impl Rectangle {
    pub fn length(&self) -> f64 {
        (self.x2 - self.x1).hypot(self.y2 - self.y1)
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.x1 + self.x2) * 0.5, (self.y1 + self.y2) * 0.5)
    }

    pub fn area(&self) -> f64 {
        self.length() * self.width
    }

    /// Same rectangle tested with another precision; `p` follows.
    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self.p = precision / std::f64::consts::PI;
        self
    }

    /// Closed point-in-rectangle test in pixel-centre coordinates.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let px = x - self.x1;
        let py = y - self.y1;
        let along = px * self.dx + py * self.dy;
        let across = -px * self.dy + py * self.dx;
        along >= -BOUNDARY_EPS
            && along <= self.length() + BOUNDARY_EPS
            && across.abs() <= self.width * 0.5 + BOUNDARY_EPS
    }

    /// Corners in order around the rectangle.
    pub fn corners(&self) -> [(f64, f64); 4] {
        let hx = -self.dy * self.width * 0.5;
        let hy = self.dx * self.width * 0.5;
        [
            (self.x1 + hx, self.y1 + hy),
            (self.x2 + hx, self.y2 + hy),
            (self.x2 - hx, self.y2 - hy),
            (self.x1 - hx, self.y1 - hy),
        ]
    }

    /// Integer pixels whose centres fall inside the rectangle, clipped to a
    /// `width × height` grid.
    pub fn pixels(&self, width: usize, height: usize) -> RectPixels<'_> {
        RectPixels::new(self, width, height)
    }

    /// Shift both axis ends across the axis by `offset` (positive towards
    /// the `(-dy, dx)` side).
    pub fn shifted_across(mut self, offset: f64) -> Self {
        self.x1 += -self.dy * offset;
        self.y1 += self.dx * offset;
        self.x2 += -self.dy * offset;
        self.y2 += self.dx * offset;
        self
    }
}

#[cfg(test)]
pub(crate) fn axis_rect(x1: f64, y1: f64, x2: f64, y2: f64, width: f64) -> Rectangle {
    let theta = (y2 - y1).atan2(x2 - x1);
    Rectangle {
        x1,
        y1,
        x2,
        y2,
        width,
        theta,
        dx: theta.cos(),
        dy: theta.sin(),
        precision: std::f64::consts::PI / 8.0,
        p: 0.125,
        density: 1.0,
    }
}
