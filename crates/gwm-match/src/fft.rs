//! FFT plumbing and one-sided frequency-domain series.

use std::fmt;
use std::sync::Arc;

use gwm_core::WaveError;
use gwm_wave::Waveform;
use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use serde::{Deserialize, Serialize};

/// Forward and inverse transforms of one fixed length.
pub struct FftPlan {
    size: usize,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
}

impl fmt::Debug for FftPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FftPlan").field("size", &self.size).finish()
    }
}

impl FftPlan {
    /// Plans both directions for `size` points.
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            size,
            forward: planner.plan_fft_forward(size),
            inverse: planner.plan_fft_inverse(size),
        }
    }

    /// Transform length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of non-negative frequency bins, `size / 2 + 1`.
    pub fn one_sided_len(&self) -> usize {
        self.size / 2 + 1
    }

    /// One-sided transform of a real series, zero-padded (or truncated) to `size`.
    pub fn forward_real(&self, samples: &[f64]) -> Vec<Complex64> {
        let mut buffer: Vec<Complex64> = samples
            .iter()
            .take(self.size)
            .map(|&x| Complex64::new(x, 0.0))
            .collect();
        buffer.resize(self.size, Complex64::new(0.0, 0.0));
        self.forward.process(&mut buffer);
        buffer.truncate(self.one_sided_len());
        buffer
    }

    /// Unnormalised inverse transform, `x_j = Σ_k X_k exp(2πi jk / size)`.
    pub fn inverse(&self, spectrum: &[Complex64]) -> Vec<Complex64> {
        let mut buffer = spectrum.to_vec();
        buffer.resize(self.size, Complex64::new(0.0, 0.0));
        self.inverse.process(&mut buffer);
        buffer
    }
}

/// One-sided spectrum with uniform bin spacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencySeries {
    /// Bin spacing.
    pub delta_f: f64,
    /// Complex amplitude of every bin from DC upwards.
    pub data: Vec<Complex64>,
}

impl FrequencySeries {
    /// Frequency of every bin.
    pub fn sample_frequencies(&self) -> Vec<f64> {
        (0..self.data.len())
            .map(|k| k as f64 * self.delta_f)
            .collect()
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when there are no bins.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Spectrum of the real part of the recombined strain, scaled by `delta_t`.
pub fn frequency_series(waveform: &Waveform) -> Result<FrequencySeries, WaveError> {
    let signal: Vec<f64> = waveform
        .recombine(None)?
        .into_iter()
        .map(|h| h.re)
        .collect();
    let delta_t = waveform.metadata().delta_t();
    let plan = FftPlan::new(signal.len());
    let data = plan
        .forward_real(&signal)
        .into_iter()
        .map(|bin| bin * delta_t)
        .collect();
    Ok(FrequencySeries {
        delta_f: 1.0 / (signal.len() as f64 * delta_t),
        data,
    })
}
