//! Recovery of under-dense candidates.
//!
//! A rectangle whose density falls below the threshold usually covers a
//! curved or merged structure. Two strategies are tried in order, each
//! starting from the un-refined candidate:
//!
//! 1) Truncation: keep only the pixels within a radius of the rectangle
//!    centre and re-fit. The radius starts at the half-length and shrinks
//!    by [`TRUNCATION_FACTOR`] per round.
//! 2) Angle halving: grow again from the same seed with half the precision
//!    and re-fit.
//!
//! A strategy is abandoned as soon as its region drops below the minimum
//! region size or its fit degenerates.
use crate::rect::{fit_rectangle, Rectangle};
use crate::region::{Region, RegionGrower, UsedMask};
use log::trace;
use serde::Serialize;

/// Radius multiplier between truncation rounds.
pub const TRUNCATION_FACTOR: f64 = 0.75;

/// Strategy that produced the final candidate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Refinement {
    /// The first fit was already dense enough.
    #[default]
    None,
    Truncated,
    AngleHalved,
}

/// Candidate after refinement.
#[derive(Clone, Debug)]
pub struct Refined {
    pub region: Region,
    pub rect: Rectangle,
    pub refinement: Refinement,
}

pub struct RegionRefiner<'a> {
    grower: RegionGrower<'a>,
    density_threshold: f64,
    min_region_size: usize,
    coverage: f64,
}

impl<'a> RegionRefiner<'a> {
    pub fn new(
        grower: RegionGrower<'a>,
        density_threshold: f64,
        min_region_size: usize,
        coverage: f64,
    ) -> Self {
        Self {
            grower,
            density_threshold,
            min_region_size,
            coverage,
        }
    }

    /// Bring `rect` up to the density threshold, or `None` when every
    /// strategy fails. Only angle halving touches `used`.
    pub fn refine(&self, used: &mut UsedMask, region: Region, rect: Rectangle) -> Option<Refined> {
        if rect.density >= self.density_threshold {
            return Some(Refined {
                region,
                rect,
                refinement: Refinement::None,
            });
        }
        if let Some((region, rect)) = self.truncate(&region, &rect) {
            return Some(Refined {
                region,
                rect,
                refinement: Refinement::Truncated,
            });
        }
        if let Some((region, rect)) = self.halve_angle(used, &region) {
            return Some(Refined {
                region,
                rect,
                refinement: Refinement::AngleHalved,
            });
        }
        None
    }

    fn truncate(&self, region: &Region, rect: &Rectangle) -> Option<(Region, Rectangle)> {
        let (cx, cy) = rect.center();
        let mut radius = 0.5 * rect.length();
        let mut current = region.clone();
        loop {
            let r2 = radius * radius;
            current.retain(|p| {
                let dx = p.x as f64 - cx;
                let dy = p.y as f64 - cy;
                dx * dx + dy * dy <= r2
            });
            if current.len() < self.min_region_size {
                trace!("truncation: region shrank to {} px", current.len());
                return None;
            }
            let fitted = fit_rectangle(&current, self.coverage)?;
            if fitted.density >= self.density_threshold {
                return Some((current, fitted));
            }
            radius *= TRUNCATION_FACTOR;
        }
    }

    fn halve_angle(&self, used: &mut UsedMask, region: &Region) -> Option<(Region, Rectangle)> {
        let regrown = self.grower.regrow(used, region, region.precision() * 0.5);
        if regrown.len() < self.min_region_size {
            trace!("angle halving: regrown region has {} px", regrown.len());
            return None;
        }
        let fitted = fit_rectangle(&regrown, self.coverage)?;
        (fitted.density >= self.density_threshold).then_some((regrown, fitted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::GradientField;
    use crate::image::ImageF32;
    use std::f64::consts::FRAC_PI_8;

    /// 45° edge band of 67 pixels, all with level-line angle π/4.
    fn diagonal_field() -> GradientField {
        let mut img = ImageF32::new(64, 64);
        for y in 0..64 {
            for x in 0..64 {
                if x as i64 - y as i64 >= 30 {
                    img.set(x, y, 255.0);
                }
            }
        }
        GradientField::compute(&img, 5.0)
    }

    fn candidate(field: &GradientField, used: &mut UsedMask) -> (Region, Rectangle) {
        let region = RegionGrower::new(field).grow(used, (45, 15), FRAC_PI_8);
        let rect = fit_rectangle(&region, 1.0).expect("fit");
        (region, rect)
    }

    /// Same rectangle, artificially widened so its density drops.
    fn sparse(rect: Rectangle, region: &Region) -> Rectangle {
        let mut wide = rect;
        wide.width = 10.0;
        wide.density = region.len() as f64 / wide.area();
        wide
    }

    #[test]
    fn dense_candidate_passes_through() {
        let field = diagonal_field();
        let mut used = UsedMask::new(64, 64);
        let (region, rect) = candidate(&field, &mut used);
        let refiner = RegionRefiner::new(RegionGrower::new(&field), 0.7, 10, 1.0);
        let out = refiner.refine(&mut used, region.clone(), rect).expect("kept");
        assert_eq!(out.refinement, Refinement::None);
        assert_eq!(out.rect, rect);
        assert_eq!(out.region.len(), region.len());
    }

    #[test]
    fn sparse_fit_is_fixed_by_truncation() {
        let field = diagonal_field();
        let mut used = UsedMask::new(64, 64);
        let (region, rect) = candidate(&field, &mut used);
        let wide = sparse(rect, &region);
        assert!(wide.density < 0.7);
        let refiner = RegionRefiner::new(RegionGrower::new(&field), 0.7, 10, 1.0);
        let out = refiner.refine(&mut used, region.clone(), wide).expect("refined");
        assert_eq!(out.refinement, Refinement::Truncated);
        assert!(out.rect.density >= 0.7);
        assert!(out.region.len() < region.len());
        assert!(out.region.len() >= 10);
    }

    #[test]
    fn angle_halving_applies_when_truncation_cannot() {
        let field = diagonal_field();
        let mut used = UsedMask::new(64, 64);
        let (region, rect) = candidate(&field, &mut used);
        let before = used.used_count();
        let wide = sparse(rect, &region);
        // the first truncation round drops the two outermost pixels
        let refiner = RegionRefiner::new(RegionGrower::new(&field), 0.7, 66, 1.0);
        let out = refiner.refine(&mut used, region.clone(), wide).expect("refined");
        assert_eq!(out.refinement, Refinement::AngleHalved);
        assert_eq!(out.region.len(), region.len());
        assert!((out.rect.precision - FRAC_PI_8 / 2.0).abs() < 1e-12);
        assert_eq!(used.used_count(), before);
    }

    #[test]
    fn unreachable_density_discards_candidate_and_keeps_pixels_used() {
        let field = diagonal_field();
        let mut used = UsedMask::new(64, 64);
        let (region, rect) = candidate(&field, &mut used);
        let before = used.used_count();
        let refiner = RegionRefiner::new(RegionGrower::new(&field), 1e9, 10, 1.0);
        assert!(refiner.refine(&mut used, region, rect).is_none());
        assert_eq!(used.used_count(), before);
    }
}
