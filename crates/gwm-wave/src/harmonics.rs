//! Spin-weighted spherical harmonics.

use std::f64::consts::PI;

use gwm_core::Mode;
use num_complex::Complex64;

/// Spin weight of gravitational-wave strain modes.
pub const STRAIN_SPIN_WEIGHT: i32 = -2;

fn factorial(n: i64) -> f64 {
    (2..=n).fold(1.0, |acc, k| acc * k as f64)
}

fn binomial(n: i64, k: i64) -> f64 {
    if k < 0 || k > n || n < 0 {
        return 0.0;
    }
    factorial(n) / (factorial(k) * factorial(n - k))
}

fn parity(exponent: i64) -> f64 {
    if exponent.rem_euclid(2) == 0 {
        1.0
    } else {
        -1.0
    }
}

/// Evaluates `sY_lm(iota, phi)` through the Wigner-d closed-form sum.
///
/// ```text
/// sY_lm = (-1)^(l+m-s) sqrt[(l+m)!(l-m)!(2l+1) / (4π(l+s)!(l-s)!)] e^{imφ}
///         Σ_r (-1)^r C(l-s, r) C(l+s, r+s-m) sin(ι/2)^(2l-2r-s+m) cos(ι/2)^(2r+s-m)
/// ```
/// with `r` running from `max(m-s, 0)` to `min(l-s, l+m)`. The harmonic is
/// identically zero for `l < |s|`.
pub fn spin_weighted_harmonic(s: i32, mode: Mode, iota: f64, phi: f64) -> Complex64 {
    let (l, m, s) = (i64::from(mode.l()), i64::from(mode.m()), i64::from(s));
    if l < s.abs() {
        return Complex64::new(0.0, 0.0);
    }
    let norm = (factorial(l + m) * factorial(l - m) * (2 * l + 1) as f64
        / (4.0 * PI * factorial(l + s) * factorial(l - s)))
        .sqrt();
    let prefactor = parity(l + m - s) * norm;

    let (half_sin, half_cos) = (iota / 2.0).sin_cos();
    let lower = (m - s).max(0);
    let upper = (l - s).min(l + m);
    let mut alternating_sum = 0.0;
    for r in lower..=upper {
        let sin_power = (2 * l - 2 * r - s + m) as i32;
        let cos_power = (2 * r + s - m) as i32;
        alternating_sum += parity(r)
            * binomial(l - s, r)
            * binomial(l + s, r + s - m)
            * half_sin.powi(sin_power)
            * half_cos.powi(cos_power);
    }

    Complex64::from_polar(prefactor * alternating_sum, m as f64 * phi)
}

/// Spin −2 harmonic used to weight strain modes during recombination.
pub fn strain_harmonic(mode: Mode, iota: f64, phi: f64) -> Complex64 {
    spin_weighted_harmonic(STRAIN_SPIN_WEIGHT, mode, iota, phi)
}
