//! Amplitude, phase and instantaneous-frequency helpers for sampled series.

use std::f64::consts::PI;

use num_complex::Complex64;

/// Pointwise modulus `|h|`.
pub fn amplitude(strain: &[Complex64]) -> Vec<f64> {
    strain.iter().map(|sample| sample.norm()).collect()
}

/// Removes 2π discontinuities so consecutive samples differ by at most π.
///
/// Follows the usual convention: a jump of exactly π keeps its sign, except
/// that a positive jump of π is kept as `+π`.
pub fn unwrap(angles: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(angles.len());
    let Some(&first) = angles.first() else {
        return out;
    };
    out.push(first);
    let mut correction = 0.0;
    for pair in angles.windows(2) {
        let delta = pair[1] - pair[0];
        if delta.abs() >= PI {
            let mut wrapped = (delta + PI).rem_euclid(2.0 * PI) - PI;
            if wrapped == -PI && delta > 0.0 {
                wrapped = PI;
            }
            correction += wrapped - delta;
        }
        out.push(pair[1] + correction);
    }
    out
}

/// Unwrapped argument of a complex series.
pub fn phase(strain: &[Complex64]) -> Vec<f64> {
    let angles: Vec<f64> = strain.iter().map(|sample| sample.arg()).collect();
    unwrap(&angles)
}

/// Numerical derivative of `values` against `axis`.
///
/// Interior points use the second-order central difference for (possibly)
/// uneven spacing; the two end points use one-sided first differences. Series
/// shorter than two samples have a zero derivative.
pub fn gradient(values: &[f64], axis: &[f64]) -> Vec<f64> {
    let n = values.len().min(axis.len());
    if n < 2 {
        return vec![0.0; n];
    }
    let mut out = vec![0.0; n];
    out[0] = (values[1] - values[0]) / (axis[1] - axis[0]);
    out[n - 1] = (values[n - 1] - values[n - 2]) / (axis[n - 1] - axis[n - 2]);
    for i in 1..n - 1 {
        let dx1 = axis[i] - axis[i - 1];
        let dx2 = axis[i + 1] - axis[i];
        let a = -dx2 / (dx1 * (dx1 + dx2));
        let b = (dx2 - dx1) / (dx1 * dx2);
        let c = dx1 / (dx2 * (dx1 + dx2));
        out[i] = a * values[i - 1] + b * values[i] + c * values[i + 1];
    }
    out
}

/// Instantaneous angular frequency `d/dt[-phase]`.
///
/// Positive for modes whose phase decreases with time.
pub fn angular_frequency(strain: &[Complex64], time: &[f64]) -> Vec<f64> {
    let negated: Vec<f64> = phase(strain).into_iter().map(|value| -value).collect();
    gradient(&negated, time)
}

/// Index of the first maximum of `values`, or `None` for an empty slice.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, &value) in values.iter().enumerate() {
        match best {
            Some((_, current)) if value <= current => {}
            _ => best = Some((idx, value)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Rebuilds `amp * exp(i * phase)` sample by sample.
pub fn from_polar(amplitude: &[f64], phase: &[f64]) -> Vec<Complex64> {
    amplitude
        .iter()
        .zip(phase)
        .map(|(&amp, &phi)| Complex64::from_polar(amp, phi))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwrap_removes_jumps() {
        let wrapped = [3.0, -3.0, -2.9];
        let unwrapped = unwrap(&wrapped);
        assert!((unwrapped[1] - (2.0 * PI - 3.0)).abs() < 1e-12);
        assert!((unwrapped[2] - unwrapped[1] - 0.1).abs() < 1e-12);
    }

    #[test]
    fn gradient_is_exact_for_quadratics_on_uneven_axis() {
        let axis = [0.0, 0.5, 1.5, 1.75, 3.0];
        let values: Vec<f64> = axis.iter().map(|x| x * x).collect();
        let grad = gradient(&values, &axis);
        for i in 1..axis.len() - 1 {
            assert!((grad[i] - 2.0 * axis[i]).abs() < 1e-12);
        }
        assert!((grad[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn argmax_prefers_first_occurrence() {
        assert_eq!(argmax(&[1.0, 3.0, 3.0, 2.0]), Some(1));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn frequency_of_negative_rotation_is_positive() {
        let time: Vec<f64> = (0..200).map(|i| i as f64 * 0.01).collect();
        let strain: Vec<Complex64> = time
            .iter()
            .map(|t| Complex64::from_polar(1.0, -7.0 * t))
            .collect();
        for omega in angular_frequency(&strain, &time) {
            assert!((omega - 7.0).abs() < 1e-9);
        }
    }
}
