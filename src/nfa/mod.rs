//! A-contrario validation: Number of False Alarms of a rectangle.
//!
//! Under the null hypothesis every level-line angle is independent and
//! uniform, so each of the `n` pixels in a rectangle is aligned with its
//! orientation with probability `p = precision / π`. The NFA of a rectangle
//! with `k` aligned pixels is
//!
//! ```text
//! NFA = NT · P[Binomial(n, p) >= k]
//! ```
//!
//! where `NT = 11 · (W·H)^(5/2)` counts the rectangles (and precisions) that
//! could have been tested. Everything is evaluated in the log domain and
//! reported as `-log10(NFA)`; larger is more significant, and a rectangle is
//! meaningful when it exceeds the `log_eps` threshold.

mod improve;

pub use improve::improve_rectangle;

use crate::angle::angle_diff;
use crate::gradient::{is_defined, GradientField};
use crate::rect::Rectangle;
use std::f64::consts::LN_10;

/// Relative error accepted when truncating the binomial tail.
const TAIL_TOLERANCE: f64 = 0.1;

/// `log10(NT)` for a `width × height` image: `log10(11) + 2.5·(log10 W + log10 H)`.
pub fn log_number_of_tests(width: usize, height: usize) -> f64 {
    11f64.log10() + 2.5 * ((width as f64).log10() + (height as f64).log10())
}

/// Smallest region that could ever be meaningful: with `k = n` aligned
/// pixels the NFA is `NT · p^n`, which drops below one only when
/// `n > -log10(NT) / log10(p)`.
pub fn min_region_size(log_nt: f64, p: f64) -> usize {
    let size = -log_nt / p.log10();
    if size.is_finite() && size > 0.0 {
        size as usize
    } else {
        0
    }
}

/// Lanczos approximation of `ln Γ(x)`, accurate for small `x`.
fn log_gamma_lanczos(x: f64) -> f64 {
    const Q: [f64; 7] = [
        75122.6331530,
        80916.6278952,
        36308.2951477,
        8687.24529705,
        1168.92649479,
        83.8676043424,
        2.50662827511,
    ];
    let mut a = (x + 0.5) * (x + 5.5).ln() - (x + 5.5);
    let mut b = 0.0;
    let mut xn = 1.0;
    for (n, q) in Q.iter().enumerate() {
        a -= (x + n as f64).ln();
        b += q * xn;
        xn *= x;
    }
    a + b.ln()
}

/// Windschitl approximation of `ln Γ(x)`, accurate for large `x`.
fn log_gamma_windschitl(x: f64) -> f64 {
    0.918938533204673 + (x - 0.5) * x.ln() - x
        + 0.5 * x * (x * (1.0 / x).sinh() + 1.0 / (810.0 * x.powi(6))).ln()
}

/// Natural logarithm of the gamma function for `x > 0`.
pub fn log_gamma(x: f64) -> f64 {
    if x > 15.0 {
        log_gamma_windschitl(x)
    } else {
        log_gamma_lanczos(x)
    }
}

/// `-log10(NFA)` for `k` aligned pixels out of `n` with alignment
/// probability `p`.
///
/// The first tail term comes from log-gamma; later terms follow the ratio
/// `term_i / term_{i-1} = (n-i+1)/i · p/(1-p)` and the sum stops once a
/// geometric bound on the rest is below [`TAIL_TOLERANCE`] of the result.
pub fn log_nfa(n: u64, k: u64, p: f64, log_nt: f64) -> f64 {
    debug_assert!(k <= n && p > 0.0 && p < 1.0, "n={n} k={k} p={p}");
    if n == 0 || k == 0 {
        return -log_nt;
    }
    if n == k {
        return -log_nt - n as f64 * p.log10();
    }

    let nf = n as f64;
    let kf = k as f64;
    let p_term = p / (1.0 - p);
    let log1term = log_gamma(nf + 1.0) - log_gamma(kf + 1.0) - log_gamma(nf - kf + 1.0)
        + kf * p.ln()
        + (nf - kf) * (1.0 - p).ln();
    let mut term = log1term.exp();

    if term < f64::MIN_POSITIVE {
        // underflow: either far in the tail or at its very start
        return if kf > nf * p {
            -log1term / LN_10 - log_nt
        } else {
            -log_nt
        };
    }

    let mut bin_tail = term;
    for i in (k + 1)..=n {
        let bin_term = (n - i + 1) as f64 / i as f64;
        let mult_term = bin_term * p_term;
        term *= mult_term;
        bin_tail += term;
        if bin_term < 1.0 {
            let err =
                term * ((1.0 - mult_term.powf((n - i + 1) as f64)) / (1.0 - mult_term) - 1.0);
            if err < TAIL_TOLERANCE * (-bin_tail.log10() - log_nt).abs() * bin_tail {
                break;
            }
        }
    }
    -bin_tail.log10() - log_nt
}

/// Pixel counts gathered over a rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AlignmentCount {
    /// Pixels inside the rectangle and the grid.
    pub total: u64,
    /// Of those, pixels whose level-line angle is within the precision of
    /// the rectangle orientation.
    pub aligned: u64,
}

pub fn count_aligned(rect: &Rectangle, field: &GradientField) -> AlignmentCount {
    let mut count = AlignmentCount::default();
    for (x, y) in rect.pixels(field.width(), field.height()) {
        count.total += 1;
        let angle = field.angle_at(x, y);
        if is_defined(angle) && angle_diff(angle as f64, rect.theta) <= rect.precision {
            count.aligned += 1;
        }
    }
    count
}

/// `-log10(NFA)` of `rect` over `field`.
pub fn rect_log_nfa(rect: &Rectangle, field: &GradientField, log_nt: f64) -> f64 {
    let count = count_aligned(rect, field);
    log_nfa(count.total, count.aligned, rect.p, log_nt)
}
