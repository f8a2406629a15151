//! Geometric to SI conversion and band cropping of whole waveforms.

use std::ops::Range;

use gwm_core::{ErrorInfo, WaveError};
use num_complex::Complex64;
use tracing::info;

use crate::metadata::{DimensionalParams, Metadata};
use crate::series::{amplitude, argmax, from_polar, phase};
use crate::units::{strain_scale, time_geometric_to_si};
use crate::waveform::Waveform;
use crate::window::window_range;

/// Crops `strain` to `range` and rotates its phase to zero at peak amplitude.
fn crop_recentered(strain: &[Complex64], range: Range<usize>) -> Vec<Complex64> {
    let amps = amplitude(strain)[range.clone()].to_vec();
    let phases = phase(strain)[range].to_vec();
    let reference = argmax(&amps).map_or(0.0, |peak| phases[peak]);
    let shifted: Vec<f64> = phases.iter().map(|value| value - reference).collect();
    from_polar(&amps, &shifted)
}

impl Waveform {
    /// SI-unit copy of a geometric waveform.
    ///
    /// Time and strain are rescaled, then every mode is cropped to the longest
    /// segment whose angular frequency exceeds `2π f_lower`. The segment is
    /// chosen on the first stored mode; each other mode must also reach above
    /// the floor and is cropped to that same index range. Each cropped mode is
    /// phase-shifted so that its phase is zero at its own peak amplitude.
    pub fn to_dimensional(&self, dims: &DimensionalParams) -> Result<Waveform, WaveError> {
        let metadata = self.metadata().to_dimensional(dims)?;
        let scale = strain_scale(dims.total_mass, dims.distance);
        let time: Vec<f64> = self
            .time()
            .iter()
            .map(|t| time_geometric_to_si(*t, dims.total_mass))
            .collect();
        let rows: Vec<Vec<Complex64>> = (0..metadata.modes().len())
            .map(|row| self.row(row).into_iter().map(|h| h * scale).collect())
            .collect();

        let range = cropping_range(&metadata, &rows, &time, dims.f_lower)?;
        let cropped: Vec<Vec<Complex64>> = rows
            .iter()
            .map(|strain| crop_recentered(strain, range.clone()))
            .collect();
        let cropped_time = time[range.clone()].to_vec();

        info!(
            total_mass = dims.total_mass,
            distance = dims.distance,
            f_lower = dims.f_lower,
            kept = range.len(),
            samples = time.len(),
            "converted waveform to SI units"
        );
        Waveform::from_modes(cropped, cropped_time, metadata)
    }

    /// Copy cropped to the longest segment above `f_lower`, in the current units.
    ///
    /// Uses the same reference-mode policy as [`Waveform::to_dimensional`] but
    /// leaves phases untouched and records `f_lower` in the metadata.
    pub fn crop_to_band(&self, f_lower: f64) -> Result<Waveform, WaveError> {
        let metadata = self.metadata().derive(|params| params.f_lower = Some(f_lower))?;
        let rows: Vec<Vec<Complex64>> = (0..metadata.modes().len())
            .map(|row| self.row(row))
            .collect();
        let range = cropping_range(&metadata, &rows, self.time(), f_lower)?;
        let cropped = rows
            .iter()
            .map(|strain| {
                from_polar(
                    &amplitude(strain)[range.clone()],
                    &phase(strain)[range.clone()],
                )
            })
            .collect();
        Waveform::from_modes(cropped, self.time()[range].to_vec(), metadata)
    }
}

/// Window chosen on the first mode; every mode must reach above the floor.
fn cropping_range(
    metadata: &Metadata,
    rows: &[Vec<Complex64>],
    time: &[f64],
    f_lower: f64,
) -> Result<Range<usize>, WaveError> {
    let mut reference: Option<Range<usize>> = None;
    for (mode, strain) in metadata.modes().iter().zip(rows) {
        let range = window_range(strain, time, f_lower).map_err(|err| match err {
            WaveError::SignalWindow(info) => {
                WaveError::SignalWindow(info.with_context("mode", mode))
            }
            other => other,
        })?;
        if reference.is_none() {
            reference = Some(range);
        }
    }
    let range = reference.unwrap_or(0..0);
    if range.len() < 2 {
        return Err(WaveError::SignalWindow(
            ErrorInfo::new(
                "window-too-short",
                "fewer than two samples lie above the lower frequency",
            )
            .with_context("f_lower", f_lower)
            .with_context("samples", range.len()),
        ));
    }
    Ok(range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::MetadataParams;
    use gwm_core::Mode;

    fn chirping(n: usize) -> Waveform {
        let metadata = Metadata::new(MetadataParams {
            library: "test".into(),
            delta_t: 1.0,
            modes: vec![Mode::DOMINANT],
            dimensionless: true,
            ..MetadataParams::default()
        })
        .unwrap();
        let time: Vec<f64> = (0..n).map(|i| i as f64 - n as f64 + 1.0).collect();
        let strain: Vec<Complex64> = (0..n)
            .map(|i| {
                let i = i as f64;
                Complex64::from_polar(1.0 + i, -(0.01 * i + 0.001 * i * i))
            })
            .collect();
        Waveform::from_modes(vec![strain], time, metadata).unwrap()
    }

    #[test]
    fn refuses_dimensional_input() {
        let dims = DimensionalParams {
            f_lower: 1.0,
            total_mass: 50.0,
            distance: 100.0,
            inclination: 0.0,
            coa_phase: 0.0,
        };
        let converted = chirping(200)
            .to_dimensional(&DimensionalParams {
                f_lower: 1e-3,
                ..dims
            })
            .unwrap();
        let err = converted.to_dimensional(&dims).unwrap_err();
        assert_eq!(err.info().code, "already-dimensional");
    }

    #[test]
    fn recentred_phase_is_zero_at_peak() {
        let strain = vec![
            Complex64::from_polar(1.0, 0.3),
            Complex64::from_polar(2.0, 0.9),
            Complex64::from_polar(1.5, 1.4),
        ];
        let out = crop_recentered(&strain, 0..3);
        assert!(out[1].im.abs() < 1e-12);
        assert!((out[1].re - 2.0).abs() < 1e-12);
    }

    #[test]
    fn floor_above_signal_fails() {
        let err = chirping(100).crop_to_band(10.0).unwrap_err();
        assert!(matches!(err, WaveError::SignalWindow(_)));
        assert_eq!(err.info().context["mode"], "(2,2)");
    }
}
