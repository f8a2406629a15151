//! Mode-indexed waveform container and spherical-harmonic recombination.

use gwm_core::{ErrorInfo, Mode, WaveError};
use nalgebra::DMatrix;
use num_complex::Complex64;
use rayon::prelude::*;

use crate::harmonics::strain_harmonic;
use crate::metadata::Metadata;
use crate::series::{amplitude, angular_frequency, argmax, phase};
use crate::spline::resample_complex;

/// Relative tolerance on sample spacing against `metadata.delta_t`.
pub const SPACING_TOLERANCE: f64 = 1e-6;

fn shape_error(code: &str, message: impl Into<String>) -> WaveError {
    WaveError::Validation(ErrorInfo::new(code, message))
}

/// Multi-mode time-domain waveform.
///
/// Rows of `strain` follow `metadata.modes()`; columns follow `time`. Negative
/// orders are never stored and are derived on access. The public data is
/// immutable; every transformation returns a new waveform with its own copy of
/// the metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    strain: DMatrix<Complex64>,
    time: Vec<f64>,
    metadata: Metadata,
}

impl Waveform {
    /// Builds a waveform after checking shape, monotonicity and spacing.
    pub fn new(
        strain: DMatrix<Complex64>,
        time: Vec<f64>,
        metadata: Metadata,
    ) -> Result<Self, WaveError> {
        if metadata.modes().is_empty() {
            return Err(shape_error("empty-modes", "a waveform needs at least one mode"));
        }
        if strain.nrows() != metadata.modes().len() {
            return Err(WaveError::Validation(
                ErrorInfo::new("mode-count-mismatch", "strain rows must match metadata modes")
                    .with_context("rows", strain.nrows())
                    .with_context("modes", metadata.modes().len()),
            ));
        }
        if strain.ncols() != time.len() {
            return Err(WaveError::Validation(
                ErrorInfo::new("sample-count-mismatch", "strain columns must match time samples")
                    .with_context("columns", strain.ncols())
                    .with_context("samples", time.len()),
            ));
        }
        if time.len() < 2 {
            return Err(shape_error(
                "too-few-samples",
                "a waveform needs at least two samples",
            ));
        }
        let delta_t = metadata.delta_t();
        for (idx, pair) in time.windows(2).enumerate() {
            let step = pair[1] - pair[0];
            if !(step > 0.0) {
                return Err(WaveError::Validation(
                    ErrorInfo::new("non-monotonic-time", "time axis must be strictly increasing")
                        .with_context("index", idx),
                ));
            }
            if ((step - delta_t) / delta_t).abs() > SPACING_TOLERANCE {
                return Err(WaveError::Validation(
                    ErrorInfo::new("non-uniform-time", "time spacing must equal delta_t")
                        .with_context("index", idx)
                        .with_context("step", step)
                        .with_context("delta_t", delta_t),
                ));
            }
        }
        Ok(Self {
            strain,
            time,
            metadata,
        })
    }

    /// Builds a waveform from one sample vector per stored mode.
    pub fn from_modes(
        modes: Vec<Vec<Complex64>>,
        time: Vec<f64>,
        metadata: Metadata,
    ) -> Result<Self, WaveError> {
        let columns = time.len();
        if let Some((row, bad)) = modes
            .iter()
            .enumerate()
            .find(|(_, samples)| samples.len() != columns)
        {
            return Err(WaveError::Validation(
                ErrorInfo::new("sample-count-mismatch", "mode length must match time samples")
                    .with_context("row", row)
                    .with_context("samples", bad.len())
                    .with_context("expected", columns),
            ));
        }
        let rows = modes.len();
        let strain = DMatrix::from_fn(rows, columns, |r, c| modes[r][c]);
        Self::new(strain, time, metadata)
    }

    /// Complex time series of `mode`.
    ///
    /// Negative orders are derived as `(-1)^l conj(h_{l,|m|})`. Fails with
    /// `ModeNotFound` when `(l, |m|)` is not stored.
    pub fn mode(&self, mode: Mode) -> Result<Vec<Complex64>, WaveError> {
        let row = self.metadata.mode_index(mode).ok_or_else(|| {
            WaveError::ModeNotFound(
                ErrorInfo::new("mode-not-found", "mode not found in this waveform")
                    .with_context("mode", mode),
            )
        })?;
        let stored = self.row(row);
        if mode.is_canonical() {
            return Ok(stored);
        }
        let sign = if mode.l() % 2 == 0 { 1.0 } else { -1.0 };
        Ok(stored.into_iter().map(|h| h.conj() * sign).collect())
    }

    pub(crate) fn row(&self, row: usize) -> Vec<Complex64> {
        self.strain.row(row).iter().copied().collect()
    }

    /// Shifts `time` so that the first sample of peak `|strain|` sits at zero.
    pub fn align(strain: &[Complex64], time: &[f64]) -> Vec<f64> {
        let peak = argmax(&amplitude(strain)).unwrap_or(0);
        let offset = time.get(peak).copied().unwrap_or(0.0);
        time.iter().map(|t| t - offset).collect()
    }

    /// Observed complex strain at the metadata inclination and phase.
    ///
    /// Sums `h_lm Y_lm + h_l-m Y_l-m` over every stored mode, `h_l-m` being
    /// what [`Waveform::mode`] returns for `(l, -m)`; an `m = 0` mode is
    /// therefore counted twice. With `resample` set, every mode is spline-interpolated
    /// onto that axis first. Contributions are evaluated in parallel and summed
    /// in storage order, so the result does not depend on scheduling.
    pub fn recombine(&self, resample: Option<&[f64]>) -> Result<Vec<Complex64>, WaveError> {
        let iota = self.metadata.inclination();
        let phi = self.metadata.coa_phase();
        let samples = resample.map_or(self.time.len(), <[f64]>::len);

        let contributions: Vec<Vec<Complex64>> = self
            .metadata
            .modes()
            .par_iter()
            .enumerate()
            .map(|(row, &mode)| -> Result<Vec<Complex64>, WaveError> {
                let stored = self.row(row);
                let positive = match resample {
                    Some(axis) => resample_complex(&self.time, &stored, axis)?,
                    None => stored,
                };
                let weight = strain_harmonic(mode, iota, phi);
                let weight_negative = strain_harmonic(mode.conjugate(), iota, phi);
                if mode.m() == 0 {
                    return Ok(positive
                        .into_iter()
                        .map(|h| h * weight + h * weight_negative)
                        .collect());
                }
                let sign = if mode.l() % 2 == 0 { 1.0 } else { -1.0 };
                Ok(positive
                    .into_iter()
                    .map(|h| h * weight + h.conj() * sign * weight_negative)
                    .collect())
            })
            .collect::<Result<_, _>>()?;

        let mut total = vec![Complex64::new(0.0, 0.0); samples];
        for contribution in contributions {
            for (acc, value) in total.iter_mut().zip(contribution) {
                *acc += value;
            }
        }
        Ok(total)
    }

    /// `|h_lm|`.
    pub fn amplitude(&self, mode: Mode) -> Result<Vec<f64>, WaveError> {
        Ok(amplitude(&self.mode(mode)?))
    }

    /// Unwrapped phase of `h_lm`.
    pub fn phase(&self, mode: Mode) -> Result<Vec<f64>, WaveError> {
        Ok(phase(&self.mode(mode)?))
    }

    /// Instantaneous angular frequency of `h_lm`.
    pub fn angular_frequency(&self, mode: Mode) -> Result<Vec<f64>, WaveError> {
        Ok(angular_frequency(&self.mode(mode)?, &self.time))
    }

    /// Index of the first sample of peak amplitude of `mode`.
    pub fn peak_index(&self, mode: Mode) -> Result<usize, WaveError> {
        Ok(argmax(&self.amplitude(mode)?).unwrap_or(0))
    }

    /// Time of peak amplitude of `mode`.
    pub fn peak_time(&self, mode: Mode) -> Result<f64, WaveError> {
        Ok(self.time[self.peak_index(mode)?])
    }

    /// Stacked strain, one row per stored mode.
    pub fn strain(&self) -> &DMatrix<Complex64> {
        &self.strain
    }

    /// Time axis.
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Metadata describing the waveform.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Always false for a constructed waveform; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Span between first and last sample.
    pub fn duration(&self) -> f64 {
        self.time[self.time.len() - 1] - self.time[0]
    }

    /// Uniform grid `t0, t0 + step, ...` strictly below the last sample.
    pub fn uniform_grid(&self, step: f64) -> Vec<f64> {
        uniform_grid(self.time[0], self.time[self.time.len() - 1], step)
    }
}

/// Samples `start + k * step` for every `k` with the sample below `stop`.
pub fn uniform_grid(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0) || !(stop > start) {
        return Vec::new();
    }
    let count = ((stop - start) / step).ceil() as usize;
    (0..count)
        .map(|k| start + k as f64 * step)
        .filter(|t| *t < stop)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::MetadataParams;

    fn metadata(modes: Vec<Mode>) -> Metadata {
        Metadata::new(MetadataParams {
            library: "test".into(),
            delta_t: 0.5,
            modes,
            dimensionless: true,
            ..MetadataParams::default()
        })
        .unwrap()
    }

    fn time(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64 * 0.5).collect()
    }

    #[test]
    fn rejects_row_mismatch() {
        let strain = DMatrix::from_element(2, 4, Complex64::new(1.0, 0.0));
        let err = Waveform::new(strain, time(4), metadata(vec![Mode::DOMINANT])).unwrap_err();
        assert_eq!(err.info().code, "mode-count-mismatch");
    }

    #[test]
    fn rejects_uneven_spacing() {
        let strain = DMatrix::from_element(1, 3, Complex64::new(1.0, 0.0));
        let err = Waveform::new(strain, vec![0.0, 0.5, 1.2], metadata(vec![Mode::DOMINANT]))
            .unwrap_err();
        assert_eq!(err.info().code, "non-uniform-time");
    }

    #[test]
    fn align_uses_first_peak() {
        let strain = vec![
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 3.0),
            Complex64::new(3.0, 0.0),
        ];
        let aligned = Waveform::align(&strain, &[10.0, 11.0, 12.0]);
        assert_eq!(aligned, vec![-1.0, 0.0, 1.0]);
    }

    #[test]
    fn grid_excludes_stop() {
        assert_eq!(uniform_grid(0.0, 2.0, 0.5), vec![0.0, 0.5, 1.0, 1.5]);
        assert_eq!(uniform_grid(0.0, 2.1, 0.5).len(), 5);
    }
}
