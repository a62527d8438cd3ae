use serde::{Deserialize, Serialize};

/// Detected line segment in input-grid coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    /// Width of the supporting rectangle.
    pub width: f64,
    /// Angle tolerance (radians) the segment was validated with.
    pub precision: f64,
    /// `-log10(NFA)`; larger is more significant.
    pub neg_log_nfa: f64,
}

impl LineSegment {
    pub fn length(&self) -> f64 {
        (self.x2 - self.x1).hypot(self.y2 - self.y1)
    }

    /// Direction from the first to the second endpoint, in `(-π, π]`.
    pub fn angle(&self) -> f64 {
        (self.y2 - self.y1).atan2(self.x2 - self.x1)
    }

    pub fn midpoint(&self) -> (f64, f64) {
        (0.5 * (self.x1 + self.x2), 0.5 * (self.y1 + self.y2))
    }
}
