//! Gaussian sub-sampling applied before detection when `scale != 1`.
//!
//! Separable: rows are resampled along x into an intermediate image, then
//! columns along y. For each output sample the kernel is re-centred on the
//! exact source position `x / scale`, so the filter stays symmetric around
//! the sampled point. Borders reflect symmetrically.
use crate::image::{ImageF32, ImageView};

/// Kernel half-size is chosen so tails below `10^-KERNEL_PRECISION` are cut.
const KERNEL_PRECISION: f64 = 3.0;

/// Resample `image` by `scale` (output `ceil(w·scale) × ceil(h·scale)`).
///
/// The Gaussian has `sigma = sigma_scale / scale` when shrinking and
/// `sigma_scale` otherwise. Callers validate `scale > 0` and
/// `sigma_scale > 0`.
pub fn gaussian_sample(image: &ImageF32, scale: f64, sigma_scale: f64) -> ImageF32 {
    let sigma = if scale < 1.0 {
        sigma_scale / scale
    } else {
        sigma_scale
    };
    let half = (sigma * (2.0 * KERNEL_PRECISION * std::f64::consts::LN_10).sqrt()).ceil() as usize;
    let mut kernel = vec![0.0f64; 2 * half + 1];

    let (out_w, out_h) = sampled_size(image.w, image.h, scale);

    // along x
    let mut aux = ImageF32::new(out_w, image.h);
    for x in 0..out_w {
        let src = x as f64 / scale;
        let xc = (src + 0.5).floor();
        fill_kernel(&mut kernel, sigma, half as f64 + src - xc);
        for y in 0..image.h {
            let row = image.row(y);
            let mut sum = 0.0f64;
            for (i, k) in kernel.iter().enumerate() {
                let j = reflect(xc as i64 - half as i64 + i as i64, image.w);
                sum += row[j] as f64 * k;
            }
            aux.set(x, y, sum as f32);
        }
    }

    // along y
    let mut out = ImageF32::new(out_w, out_h);
    for y in 0..out_h {
        let src = y as f64 / scale;
        let yc = (src + 0.5).floor();
        fill_kernel(&mut kernel, sigma, half as f64 + src - yc);
        for x in 0..out_w {
            let mut sum = 0.0f64;
            for (i, k) in kernel.iter().enumerate() {
                let j = reflect(yc as i64 - half as i64 + i as i64, image.h);
                sum += aux.get(x, j) as f64 * k;
            }
            out.set(x, y, sum as f32);
        }
    }
    out
}

/// Output size of [`gaussian_sample`]: `ceil(w·scale) × ceil(h·scale)`,
/// at least one pixel each way.
pub fn sampled_size(width: usize, height: usize, scale: f64) -> (usize, usize) {
    let side = |n: usize| ((n as f64 * scale).ceil() as usize).max(1);
    (side(width), side(height))
}

/// Normalised Gaussian samples centred at `mean` (in kernel index units).
fn fill_kernel(kernel: &mut [f64], sigma: f64, mean: f64) {
    let mut sum = 0.0;
    for (i, k) in kernel.iter_mut().enumerate() {
        let v = (i as f64 - mean) / sigma;
        *k = (-0.5 * v * v).exp();
        sum += *k;
    }
    if sum > 0.0 {
        for k in kernel.iter_mut() {
            *k /= sum;
        }
    }
}

/// Symmetric reflection `... 1 0 | 0 1 ... n-1 | n-1 n-2 ...` into `0..n`.
fn reflect(i: i64, n: usize) -> usize {
    let n = n as i64;
    let period = 2 * n;
    let j = i.rem_euclid(period);
    (if j >= n { period - 1 - j } else { j }) as usize
}
