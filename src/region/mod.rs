//! Region growing over the level-line field.
//!
//! A [`Region`] is the connected set of pixels accreted from one seed whose
//! level-line angles stay within the precision of the region's running
//! circular mean. Alongside the pixel list it keeps running sums so the
//! rectangle fit can read the weighted centroid without another pass.
//!
//! [`UsedMask`] is written only by [`RegionGrower`]; every other stage reads it.

mod grower;
mod used_mask;

pub use grower::RegionGrower;
pub use used_mask::UsedMask;

use crate::angle::CircularMean;

/// Pixel member of a region with the quantities the later stages need.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionPixel {
    pub x: usize,
    pub y: usize,
    /// Level-line angle at the pixel.
    pub angle: f32,
    /// Gradient magnitude, used as the moment weight.
    pub weight: f32,
}

/// Growable pixel set with incremental moments.
#[derive(Clone, Debug)]
pub struct Region {
    pixels: Vec<RegionPixel>,
    seed: (usize, usize),
    precision: f64,
    stamp: u32,
    mean: CircularMean,
    sum_x: f64,
    sum_y: f64,
    sum_wx: f64,
    sum_wy: f64,
    sum_w: f64,
}

impl Region {
    fn new(seed: (usize, usize), precision: f64, stamp: u32) -> Self {
        Self {
            pixels: Vec::with_capacity(64),
            seed,
            precision,
            stamp,
            mean: CircularMean::default(),
            sum_x: 0.0,
            sum_y: 0.0,
            sum_wx: 0.0,
            sum_wy: 0.0,
            sum_w: 0.0,
        }
    }

    fn push(&mut self, pixel: RegionPixel) {
        let xf = pixel.x as f64;
        let yf = pixel.y as f64;
        let w = pixel.weight as f64;
        self.sum_x += xf;
        self.sum_y += yf;
        self.sum_wx += w * xf;
        self.sum_wy += w * yf;
        self.sum_w += w;
        self.mean.push(pixel.angle as f64);
        self.pixels.push(pixel);
    }

    /// Keep only the pixels matching `keep`, rebuilding every running sum.
    /// Dropped pixels stay claimed in the used mask.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&RegionPixel) -> bool,
    {
        let pixels = std::mem::take(&mut self.pixels);
        let mut rebuilt = Region::new(self.seed, self.precision, self.stamp);
        for p in pixels.into_iter().filter(|p| keep(p)) {
            rebuilt.push(p);
        }
        *self = rebuilt;
    }

    pub fn pixels(&self) -> &[RegionPixel] {
        &self.pixels
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn seed(&self) -> (usize, usize) {
        self.seed
    }

    /// Angle tolerance the region was grown with.
    pub fn precision(&self) -> f64 {
        self.precision
    }

    /// Used-mask stamp of the growth pass that produced the region.
    pub fn stamp(&self) -> u32 {
        self.stamp
    }

    /// Circular mean of member level-line angles.
    pub fn angle(&self) -> f64 {
        self.mean.angle()
    }

    /// Unweighted centroid.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.pixels.is_empty() {
            return None;
        }
        let n = self.pixels.len() as f64;
        Some((self.sum_x / n, self.sum_y / n))
    }

    /// Gradient-magnitude weighted centroid.
    pub fn weighted_centroid(&self) -> Option<(f64, f64)> {
        if !(self.sum_w > 0.0) {
            return None;
        }
        Some((self.sum_wx / self.sum_w, self.sum_wy / self.sum_w))
    }
}
