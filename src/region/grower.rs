use super::{Region, RegionPixel, UsedMask};
use crate::angle::angle_diff;
use crate::gradient::{is_defined, GradientField};

/// Greedy 8-connected region growing on level-line angles.
///
/// The region list doubles as the frontier: member `i` is expanded after
/// members `0..i`, and each accepted neighbour is compared against the
/// circular mean of the members accepted before it.
pub struct RegionGrower<'a> {
    field: &'a GradientField,
}

impl<'a> RegionGrower<'a> {
    pub fn new(field: &'a GradientField) -> Self {
        Self { field }
    }

    /// Grow a new region from an unused, angle-defined `seed`.
    pub fn grow(&self, used: &mut UsedMask, seed: (usize, usize), precision: f64) -> Region {
        self.grow_with(used, seed, precision, None)
    }

    /// Grow again from the seed of `previous` with a new precision. Pixels
    /// claimed by `previous` are available again; they stay used whether or
    /// not the new region takes them.
    pub fn regrow(&self, used: &mut UsedMask, previous: &Region, precision: f64) -> Region {
        self.grow_with(used, previous.seed(), precision, Some(previous.stamp()))
    }

    fn grow_with(
        &self,
        used: &mut UsedMask,
        seed: (usize, usize),
        precision: f64,
        reclaim: Option<u32>,
    ) -> Region {
        let width = self.field.width();
        let height = self.field.height();
        let stamp = used.fresh_stamp();
        let mut region = Region::new(seed, precision, stamp);

        let (sx, sy) = seed;
        let seed_angle = self.field.angle_at(sx, sy);
        if !is_defined(seed_angle) {
            return region;
        }
        used.claim(sy * width + sx, stamp);
        region.push(RegionPixel {
            x: sx,
            y: sy,
            angle: seed_angle,
            weight: self.field.magnitude_at(sx, sy),
        });

        let available = |s: u32| s == 0 || Some(s) == reclaim;

        let mut i = 0;
        while i < region.pixels.len() {
            let RegionPixel { x, y, .. } = region.pixels[i];
            let x_lo = x.saturating_sub(1);
            let y_lo = y.saturating_sub(1);
            let x_hi = (x + 1).min(width - 1);
            let y_hi = (y + 1).min(height - 1);
            for xx in x_lo..=x_hi {
                for yy in y_lo..=y_hi {
                    let idx = yy * width + xx;
                    if !available(used.stamp(idx)) {
                        continue;
                    }
                    let angle = self.field.angle_at(xx, yy);
                    if !is_defined(angle) {
                        continue;
                    }
                    if angle_diff(angle as f64, region.angle()) > precision {
                        continue;
                    }
                    used.claim(idx, stamp);
                    region.push(RegionPixel {
                        x: xx,
                        y: yy,
                        angle,
                        weight: self.field.magnitude_at(xx, yy),
                    });
                }
            }
            i += 1;
        }

        region
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageF32;
    use std::f64::consts::PI;

    const PREC: f64 = PI / 8.0;

    /// Bright rectangle on a dark background; its four sides have four
    /// distinct level-line directions.
    fn bright_box(width: usize, height: usize) -> ImageF32 {
        let mut img = ImageF32::new(width, height);
        for y in height / 4..3 * height / 4 {
            for x in width / 4..3 * width / 4 {
                img.set(x, y, 200.0);
            }
        }
        img
    }

    /// Middle of the box's top side.
    const TOP_SEED: (usize, usize) = (16, 7);
    /// Middle of the box's left side.
    const LEFT_SEED: (usize, usize) = (7, 16);

    #[test]
    fn region_members_are_aligned_and_claimed() {
        let field = GradientField::compute(&bright_box(32, 32), 5.0);
        let mut used = UsedMask::new(32, 32);
        assert!(field.is_defined_at(TOP_SEED.0, TOP_SEED.1));
        let region = RegionGrower::new(&field).grow(&mut used, TOP_SEED, PREC);
        // the straight part of the top side, corners excluded
        assert_eq!(region.len(), 15);
        for p in region.pixels() {
            assert!(used.is_used(p.x, p.y));
            assert!(angle_diff(p.angle as f64, region.angle()) <= PREC);
        }
        assert_eq!(used.used_count(), region.len());
    }

    #[test]
    fn adjacent_sides_do_not_merge() {
        let field = GradientField::compute(&bright_box(32, 32), 5.0);
        let mut used = UsedMask::new(32, 32);
        let region = RegionGrower::new(&field).grow(&mut used, TOP_SEED, PREC);
        assert!(region.pixels().iter().all(|p| p.y == TOP_SEED.1));
    }

    #[test]
    fn regions_from_different_seeds_are_disjoint() {
        let field = GradientField::compute(&bright_box(32, 32), 5.0);
        let mut used = UsedMask::new(32, 32);
        let grower = RegionGrower::new(&field);
        let top = grower.grow(&mut used, TOP_SEED, PREC);
        let left = grower.grow(&mut used, LEFT_SEED, PREC);
        assert!(left.len() > 1);
        for p in left.pixels() {
            assert!(
                !top.pixels().iter().any(|q| q.x == p.x && q.y == p.y),
                "pixel ({}, {}) claimed twice",
                p.x,
                p.y
            );
        }
        assert_eq!(used.used_count(), top.len() + left.len());
    }

    #[test]
    fn regrow_reclaims_own_pixels_and_never_releases() {
        let field = GradientField::compute(&bright_box(32, 32), 5.0);
        let mut used = UsedMask::new(32, 32);
        let grower = RegionGrower::new(&field);
        let wide = grower.grow(&mut used, TOP_SEED, PREC);
        let before = used.used_count();
        let narrow = grower.regrow(&mut used, &wide, PREC / 2.0);
        assert_eq!(narrow.len(), wide.len());
        assert_eq!(narrow.seed(), wide.seed());
        assert_ne!(narrow.stamp(), wide.stamp());
        assert_eq!(used.used_count(), before);
        for p in wide.pixels() {
            assert!(used.is_used(p.x, p.y));
        }
    }

    #[test]
    fn weighted_centroid_matches_uniform_weights() {
        let field = GradientField::compute(&bright_box(32, 32), 5.0);
        let mut used = UsedMask::new(32, 32);
        let region = RegionGrower::new(&field).grow(&mut used, TOP_SEED, PREC);
        // every pixel on the straight part of a side has the same magnitude
        let (cx, cy) = region.centroid().unwrap();
        let (wx, wy) = region.weighted_centroid().unwrap();
        assert!((cx - wx).abs() < 1e-6 && (cy - wy).abs() < 1e-6);
        assert!((cx - 15.0).abs() < 1e-9 && (cy - 7.0).abs() < 1e-9);
    }
}
