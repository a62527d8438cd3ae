//! Detector parameters and the thresholds derived from them.
//!
//! Defaults reproduce the classic LSD setting: 22.5° angle tolerance,
//! quantization error bound 2, `log_eps = 0` (at most one false detection
//! per image on average) and 1024 magnitude buckets.

use super::error::LsdError;
use crate::nfa::{log_number_of_tests, min_region_size};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Knobs of a detection run. Deserializes from partial JSON objects; unset
/// fields keep their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LsdParams {
    /// Resampling factor applied before detection (`1.0` keeps the input).
    pub scale: f64,
    /// Gaussian sigma factor: `sigma = sigma_scale / scale` when `scale < 1`.
    pub sigma_scale: f64,
    /// Bound on the gradient quantization error.
    pub quantization_bound: f64,
    /// Angle tolerance in degrees.
    pub angle_tolerance_deg: f64,
    /// Acceptance threshold on `-log10(NFA)`.
    pub log_eps: f64,
    /// Minimal fraction of the rectangle covered by region pixels.
    pub density_threshold: f64,
    /// Number of gradient-magnitude bins for the pseudo-ordering.
    pub bucket_count: usize,
    /// Weighted-mass fraction the rectangle spans must cover.
    pub mass_coverage: f64,
    /// Fold the two antiparallel edges of a thin line into one segment.
    pub merge_flanks: bool,
    /// Pixels allowed to start a region; growth may leave it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_roi: Option<SeedRoi>,
}

impl Default for LsdParams {
    fn default() -> Self {
        Self {
            scale: 1.0,
            sigma_scale: 0.6,
            quantization_bound: 2.0,
            angle_tolerance_deg: 22.5,
            log_eps: 0.0,
            density_threshold: 0.7,
            bucket_count: 1024,
            mass_coverage: 0.99,
            merge_flanks: true,
            seed_roi: None,
        }
    }
}

/// Inclusive pixel bounds in input-grid coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedRoi {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl SeedRoi {
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }
}

/// Input-grid pixel holding the centre of working-grid pixel `v` after
/// resampling by `scale`.
pub(crate) fn to_input_pixel(v: usize, scale: f64) -> usize {
    ((v as f64 + 0.5) / scale).floor() as usize
}

impl LsdParams {
    /// Reject values the detector cannot work with.
    pub fn validate(&self) -> Result<(), LsdError> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(LsdError::InvalidScale(self.scale));
        }
        check(
            "sigma_scale",
            self.sigma_scale.is_finite() && self.sigma_scale > 0.0,
            "must be positive",
        )?;
        check(
            "quantization_bound",
            self.quantization_bound.is_finite() && self.quantization_bound >= 0.0,
            "must be non-negative",
        )?;
        check(
            "angle_tolerance_deg",
            self.angle_tolerance_deg > 0.0 && self.angle_tolerance_deg < 180.0,
            "must lie in (0, 180)",
        )?;
        check("log_eps", !self.log_eps.is_nan(), "must be a number")?;
        check(
            "density_threshold",
            (0.0..=1.0).contains(&self.density_threshold),
            "must lie in [0, 1]",
        )?;
        check("bucket_count", self.bucket_count > 0, "must be positive")?;
        check(
            "mass_coverage",
            self.mass_coverage > 0.0 && self.mass_coverage <= 1.0,
            "must lie in (0, 1]",
        )?;
        if let Some(roi) = &self.seed_roi {
            check(
                "seed_roi",
                roi.x0 <= roi.x1 && roi.y0 <= roi.y1,
                "bounds must be ordered",
            )?;
        }
        Ok(())
    }

    /// Angle tolerance in radians.
    pub fn precision(&self) -> f64 {
        PI * self.angle_tolerance_deg / 180.0
    }

    /// Probability that a random level-line angle is aligned.
    pub fn alignment_probability(&self) -> f64 {
        self.angle_tolerance_deg / 180.0
    }

    /// Gradient magnitude below which angles are unreliable.
    pub fn gradient_threshold(&self) -> f64 {
        self.quantization_bound / self.precision().sin()
    }

    pub(crate) fn thresholds(&self, width: usize, height: usize) -> Thresholds {
        let log_nt = log_number_of_tests(width, height);
        let p = self.alignment_probability();
        Thresholds {
            precision: self.precision(),
            rho: self.gradient_threshold() as f32,
            log_nt,
            min_region_size: min_region_size(log_nt, p),
        }
    }
}

fn check(name: &'static str, ok: bool, reason: &str) -> Result<(), LsdError> {
    if ok {
        Ok(())
    } else {
        Err(LsdError::InvalidParameter {
            name,
            reason: reason.to_string(),
        })
    }
}

/// Per-run values derived from [`LsdParams`] and the working grid size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Thresholds {
    pub precision: f64,
    pub rho: f32,
    pub log_nt: f64,
    pub min_region_size: usize,
}
