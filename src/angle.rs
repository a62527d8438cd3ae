//! Angle utilities for level-line orientations.
//!
//! Level-line angles carry polarity: two pixels on opposite sides of a thin
//! bright line point in opposite directions and are *not* aligned. All
//! differences are therefore taken modulo 2π, never modulo π.
use std::f64::consts::{PI, TAU};

/// Signed difference `a - b` wrapped into `(-π, π]`.
#[inline]
pub fn angle_diff_signed(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(TAU);
    if d > PI {
        d - TAU
    } else {
        d
    }
}

/// Unsigned circular distance between two angles, in `[0, π]`.
#[inline]
pub fn angle_diff(a: f64, b: f64) -> f64 {
    angle_diff_signed(a, b).abs()
}

/// Running circular mean of a set of angles, kept as a sum of unit vectors.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CircularMean {
    sum_cos: f64,
    sum_sin: f64,
}

impl CircularMean {
    pub fn new(angle: f64) -> Self {
        Self {
            sum_cos: angle.cos(),
            sum_sin: angle.sin(),
        }
    }

    pub fn push(&mut self, angle: f64) {
        self.sum_cos += angle.cos();
        self.sum_sin += angle.sin();
    }

    /// Mean direction in `(-π, π]`.
    pub fn angle(&self) -> f64 {
        self.sum_sin.atan2(self.sum_cos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_4;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn signed_difference_wraps_across_pi() {
        assert!(approx_eq(angle_diff_signed(PI - 0.1, -PI + 0.1), -0.2));
        assert!(approx_eq(angle_diff_signed(-PI + 0.1, PI - 0.1), 0.2));
        assert!(approx_eq(angle_diff_signed(0.3, 0.1), 0.2));
    }

    #[test]
    fn difference_is_symmetric_and_keeps_polarity() {
        assert!(approx_eq(angle_diff(0.25, 1.7), angle_diff(1.7, 0.25)));
        // opposite directions are as far apart as possible
        assert!(approx_eq(angle_diff(0.0, PI), PI));
        assert!(approx_eq(angle_diff(FRAC_PI_4, -FRAC_PI_4), PI / 2.0));
    }

    #[test]
    fn circular_mean_handles_wraparound() {
        let mut mean = CircularMean::new(PI - 0.05);
        mean.push(-PI + 0.05);
        // arithmetic mean would be 0, the circular mean is ±π
        assert!(angle_diff(mean.angle(), PI) < 1e-9);
    }
}
