//! Standard normal distribution functions.
//!
//! - `norm_cdf`: Cumulative distribution function

/// Abramowitz and Stegun 7.1.26 coefficients.
const ERFC_P: f64 = 0.327_591_1;
const ERFC_A: [f64; 5] = [
    0.254_829_592,
    -0.284_496_736,
    1.421_413_741,
    -1.453_152_027,
    1.061_405_429,
];

/// Complementary error function, maximum absolute error 1.5e-7.
///
/// erfc(x) = 1 - erf(x); negative arguments use erfc(-x) = 2 - erfc(x).
fn erfc(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + ERFC_P * z);
    let poly = ERFC_A.iter().rev().fold(0.0, |acc, &a| acc * t + a) * t;
    let tail = poly * (-z * z).exp();
    if x < 0.0 {
        2.0 - tail
    } else {
        tail
    }
}

/// Standard normal cumulative distribution function.
///
/// Φ(x) = erfc(-x / √2) / 2
///
/// # Accuracy
/// Accurate to about 1e-7 for all finite x.
///
/// # Examples
/// ```
/// use lattice_core::math::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-3.0) < 0.01);
/// assert!(norm_cdf(3.0) > 0.99);
/// ```
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / std::f64::consts::SQRT_2)
}
