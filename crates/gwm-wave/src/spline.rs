//! Not-a-knot cubic spline interpolation.

use gwm_core::{ErrorInfo, WaveError};
use num_complex::Complex64;

fn spline_error(code: &str, message: impl Into<String>) -> WaveError {
    WaveError::Validation(ErrorInfo::new(code, message))
}

/// Interpolating cubic spline with not-a-knot end conditions.
///
/// Two knots give the straight line and three knots the interpolating
/// parabola, matching the degenerate not-a-knot cases. Points outside the knot
/// range are extrapolated with the end polynomial pieces.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    knots: Vec<f64>,
    values: Vec<f64>,
    moments: Vec<f64>,
}

impl CubicSpline {
    /// Fits the spline through `(x, y)`; `x` must be strictly increasing.
    pub fn new(x: &[f64], y: &[f64]) -> Result<Self, WaveError> {
        if x.len() != y.len() {
            return Err(WaveError::Validation(
                ErrorInfo::new("spline-length-mismatch", "knots and values differ in length")
                    .with_context("knots", x.len())
                    .with_context("values", y.len()),
            ));
        }
        if x.len() < 2 {
            return Err(spline_error(
                "spline-too-short",
                "spline interpolation needs at least two knots",
            ));
        }
        if x.windows(2).any(|pair| !(pair[1] > pair[0])) {
            return Err(spline_error(
                "non-monotonic-axis",
                "spline knots must be strictly increasing",
            ));
        }
        let moments = solve_moments(x, y);
        Ok(Self {
            knots: x.to_vec(),
            values: y.to_vec(),
            moments,
        })
    }

    /// Evaluates the spline at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        let n = self.knots.len();
        let upper = self.knots.partition_point(|&knot| knot <= x);
        let i = upper.saturating_sub(1).min(n - 2);
        let (x0, x1) = (self.knots[i], self.knots[i + 1]);
        let (m0, m1) = (self.moments[i], self.moments[i + 1]);
        let (y0, y1) = (self.values[i], self.values[i + 1]);
        let h = x1 - x0;
        let a = x1 - x;
        let b = x - x0;
        m0 * a * a * a / (6.0 * h)
            + m1 * b * b * b / (6.0 * h)
            + (y0 / h - m0 * h / 6.0) * a
            + (y1 / h - m1 * h / 6.0) * b
    }

    /// Evaluates the spline at every point of `points`.
    pub fn eval_many(&self, points: &[f64]) -> Vec<f64> {
        points.iter().map(|&x| self.eval(x)).collect()
    }
}

/// Second derivatives at the knots.
fn solve_moments(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len();
    let h: Vec<f64> = x.windows(2).map(|pair| pair[1] - pair[0]).collect();
    let slope = |i: usize| (y[i + 1] - y[i]) / h[i];

    match n {
        2 => vec![0.0; 2],
        3 => {
            let curvature = 2.0 * (slope(1) - slope(0)) / (h[0] + h[1]);
            vec![curvature; 3]
        }
        _ => {
            // Unknowns M_1..M_{n-2}; M_0 and M_{n-1} are eliminated through the
            // third-derivative continuity at x_1 and x_{n-2}.
            let size = n - 2;
            let mut lower = vec![0.0; size];
            let mut diag = vec![0.0; size];
            let mut upper = vec![0.0; size];
            let mut rhs = vec![0.0; size];
            for row in 0..size {
                let i = row + 1;
                lower[row] = h[i - 1];
                diag[row] = 2.0 * (h[i - 1] + h[i]);
                upper[row] = h[i];
                rhs[row] = 6.0 * (slope(i) - slope(i - 1));
            }
            let (h0, h1) = (h[0], h[1]);
            diag[0] = (h0 + h1) * (h0 + 2.0 * h1) / h1;
            upper[0] = (h1 - h0) * (h1 + h0) / h1;
            let (a, b) = (h[n - 3], h[n - 2]);
            diag[size - 1] = (a + b) * (2.0 * a + b) / a;
            lower[size - 1] = (a - b) * (a + b) / a;

            let inner = solve_tridiagonal(&lower, &diag, &upper, &rhs);
            let mut moments = Vec::with_capacity(n);
            moments.push(inner[0] * (1.0 + h0 / h1) - (h0 / h1) * inner[1.min(size - 1)]);
            moments.extend_from_slice(&inner);
            let last = inner[size - 1] * (1.0 + b / a) - (b / a) * inner[size.saturating_sub(2)];
            moments.push(last);
            moments
        }
    }
}

/// Thomas algorithm; `lower[0]` and `upper[last]` are ignored.
fn solve_tridiagonal(lower: &[f64], diag: &[f64], upper: &[f64], rhs: &[f64]) -> Vec<f64> {
    let n = diag.len();
    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];
    c_prime[0] = upper[0] / diag[0];
    d_prime[0] = rhs[0] / diag[0];
    for i in 1..n {
        let denom = diag[i] - lower[i] * c_prime[i - 1];
        c_prime[i] = upper[i] / denom;
        d_prime[i] = (rhs[i] - lower[i] * d_prime[i - 1]) / denom;
    }
    let mut solution = vec![0.0; n];
    solution[n - 1] = d_prime[n - 1];
    for i in (0..n - 1).rev() {
        solution[i] = d_prime[i] - c_prime[i] * solution[i + 1];
    }
    solution
}

/// Interpolates a complex series onto `points` by splining the real and
/// imaginary parts independently.
pub fn resample_complex(
    x: &[f64],
    y: &[Complex64],
    points: &[f64],
) -> Result<Vec<Complex64>, WaveError> {
    let re: Vec<f64> = y.iter().map(|value| value.re).collect();
    let im: Vec<f64> = y.iter().map(|value| value.im).collect();
    let re_spline = CubicSpline::new(x, &re)?;
    let im_spline = CubicSpline::new(x, &im)?;
    Ok(points
        .iter()
        .map(|&p| Complex64::new(re_spline.eval(p), im_spline.eval(p)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reproduces_cubics_exactly() {
        let x = [0.0, 0.4, 1.0, 1.3, 2.2, 3.0];
        let f = |t: f64| 2.0 * t * t * t - t * t + 0.5 * t - 3.0;
        let y: Vec<f64> = x.iter().map(|&t| f(t)).collect();
        let spline = CubicSpline::new(&x, &y).unwrap();
        for probe in [0.1, 0.7, 1.25, 2.9, -0.2, 3.4] {
            assert!((spline.eval(probe) - f(probe)).abs() < 1e-9, "at {probe}");
        }
    }

    #[test]
    fn reproduces_cubic_with_four_knots() {
        let x = [0.0, 1.0, 2.5, 3.0];
        let f = |t: f64| t * t * t - 4.0 * t;
        let y: Vec<f64> = x.iter().map(|&t| f(t)).collect();
        let spline = CubicSpline::new(&x, &y).unwrap();
        assert!((spline.eval(1.7) - f(1.7)).abs() < 1e-9);
    }

    #[test]
    fn degenerate_knot_counts() {
        let line = CubicSpline::new(&[0.0, 2.0], &[1.0, 5.0]).unwrap();
        assert!((line.eval(0.5) - 2.0).abs() < 1e-12);
        let parabola = CubicSpline::new(&[0.0, 1.0, 3.0], &[0.0, 1.0, 9.0]).unwrap();
        assert!((parabola.eval(2.0) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn interpolates_knots() {
        let x: Vec<f64> = (0..20).map(|i| i as f64 * 0.3).collect();
        let y: Vec<f64> = x.iter().map(|t| t.sin()).collect();
        let spline = CubicSpline::new(&x, &y).unwrap();
        for (xi, yi) in x.iter().zip(&y) {
            assert!((spline.eval(*xi) - yi).abs() < 1e-12);
        }
    }

    #[test]
    fn rejects_unsorted_knots() {
        let err = CubicSpline::new(&[0.0, 0.0, 1.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(err.info().code, "non-monotonic-axis");
    }
}
