//! Level-line gradient field from a 2×2 finite-difference stencil.
//!
//! For every pixel except the last row and column the stencil
//!
//! ```text
//!     A B
//!     C D
//! ```
//!
//! gives `gx = (D-A) + (B-C)`, `gy = (D-A) - (B-C)` and
//! `mag = sqrt((gx² + gy²) / 4)`. The stored angle is the *level-line*
//! angle `atan2(gx, -gy)`, perpendicular to the intensity gradient. Pixels
//! whose magnitude does not exceed the threshold, and the whole last row
//! and column, carry [`UNDEFINED_ANGLE`].
//!
//! The stencil is centred at `(x + 0.5, y + 0.5)`; the detector compensates
//! when it emits segment coordinates.
//!
//! Complexity: O(W·H); memory: two float buffers.
use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Sentinel for pixels without a usable orientation. `atan2` never returns
/// a value outside `[-π, π]`, so it cannot collide with a real angle.
pub const UNDEFINED_ANGLE: f32 = -1024.0;

#[inline]
pub fn is_defined(angle: f32) -> bool {
    angle != UNDEFINED_ANGLE
}

/// Per-pixel level-line angle and gradient magnitude.
#[derive(Clone, Debug)]
pub struct GradientField {
    /// Level-line angle in radians, or [`UNDEFINED_ANGLE`].
    pub angle: ImageF32,
    /// Gradient magnitude (zero on the last row/column).
    pub magnitude: ImageF32,
    /// Largest magnitude observed over the computed pixels.
    pub max_magnitude: f32,
}

impl GradientField {
    /// Compute the field for `image`, leaving pixels with `mag <= threshold`
    /// undefined.
    pub fn compute(image: &ImageF32, threshold: f32) -> Self {
        let w = image.w;
        let h = image.h;
        let mut angle = ImageF32::filled(w, h, UNDEFINED_ANGLE);
        let mut magnitude = ImageF32::new(w, h);
        let mut max_magnitude = 0.0f32;

        if w < 2 || h < 2 {
            return Self {
                angle,
                magnitude,
                max_magnitude,
            };
        }

        for y in 0..h - 1 {
            let (top, bottom) = image.row_pair(y);
            let out_angle = angle.row_mut(y);
            let out_mag = magnitude.row_mut(y);
            for x in 0..w - 1 {
                let da = bottom[x + 1] - top[x];
                let bc = top[x + 1] - bottom[x];
                let gx = da + bc;
                let gy = da - bc;
                let norm = ((gx * gx + gy * gy) / 4.0).sqrt();
                out_mag[x] = norm;
                if norm > threshold {
                    out_angle[x] = gx.atan2(-gy);
                }
                if norm > max_magnitude {
                    max_magnitude = norm;
                }
            }
        }

        Self {
            angle,
            magnitude,
            max_magnitude,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.angle.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.angle.h
    }

    #[inline]
    pub fn angle_at(&self, x: usize, y: usize) -> f32 {
        self.angle.get(x, y)
    }

    #[inline]
    pub fn magnitude_at(&self, x: usize, y: usize) -> f32 {
        self.magnitude.get(x, y)
    }

    #[inline]
    pub fn is_defined_at(&self, x: usize, y: usize) -> bool {
        is_defined(self.angle.get(x, y))
    }

    /// Number of pixels with a defined angle.
    pub fn defined_count(&self) -> usize {
        self.angle.data.iter().filter(|a| is_defined(**a)).count()
    }
}
