// src/math_utils.rs
//! Numerical helpers shared by the pricer and the benchmark.

use std::f64::consts::SQRT_2;

// Abramowitz & Stegun 7.1.26 coefficients for erf.
const A1: f64 = 0.254829592;
const A2: f64 = -0.284496736;
const A3: f64 = 1.421413741;
const A4: f64 = -1.453152027;
const A5: f64 = 1.061405429;
const P: f64 = 0.3275911;

/// Standard normal cumulative distribution function Φ(x)
///
/// # Formula
/// ```text
/// Φ(x) = ½ (1 + sign(x) · erf(|x|/√2))
/// erf(z) ≈ 1 - (a₁t + a₂t² + a₃t³ + a₄t⁴ + a₅t⁵) e^(-z²),  t = 1/(1 + p z)
/// ```
///
/// Absolute error is below 7.5e-8 everywhere. Infinite inputs saturate to
/// exactly 0 or 1.
pub fn norm_cdf(x: f64) -> f64 {
    // erf(0) is exactly 0, so Φ(0) must be exactly ½
    let sign = if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    };
    let z = x.abs() / SQRT_2;

    let t = 1.0 / (1.0 + P * z);
    let poly = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t;
    let erf = 1.0 - poly * (-z * z).exp();

    0.5 * (1.0 + sign * erf)
}

pub struct Timer {
    start_time: std::time::Instant,
}

impl Timer {
    pub fn new() -> Timer {
        Timer {
            start_time: std::time::Instant::now(),
        }
    }

    pub fn start(&mut self) {
        self.start_time = std::time::Instant::now();
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use statrs::distribution::{ContinuousCDF, Normal};

    #[test]
    fn test_norm_cdf_at_zero() {
        assert_eq!(norm_cdf(0.0), 0.5);
        assert_eq!(norm_cdf(-0.0), 0.5);
    }

    #[test]
    fn test_norm_cdf_symmetry() {
        for i in -400..=400 {
            let x = i as f64 * 0.025;
            assert_abs_diff_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_norm_cdf_monotone() {
        let mut previous = norm_cdf(-12.0);
        for i in -1199..=1200 {
            let current = norm_cdf(i as f64 * 0.01);
            assert!(current >= previous, "Φ decreased at x = {}", i as f64 * 0.01);
            previous = current;
        }
    }

    #[test]
    fn test_norm_cdf_against_statrs() {
        let normal = Normal::new(0.0, 1.0).unwrap();
        for i in -80..=80 {
            let x = i as f64 * 0.1;
            assert_abs_diff_eq!(norm_cdf(x), normal.cdf(x), epsilon = 1e-7);
        }
    }

    #[test]
    fn test_norm_cdf_saturates() {
        assert_eq!(norm_cdf(f64::INFINITY), 1.0);
        assert_eq!(norm_cdf(f64::NEG_INFINITY), 0.0);
        for x in [40.0, 1e6, 1e300, f64::MAX] {
            let upper = norm_cdf(x);
            let lower = norm_cdf(-x);
            assert!(upper.is_finite() && lower.is_finite());
            assert_abs_diff_eq!(upper, 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(lower, 0.0, epsilon = 1e-12);
        }
    }
}
