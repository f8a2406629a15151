#![allow(dead_code)]

use gwm_wave::{Metadata, MetadataParams, Mode, WaveError, Waveform};
use num_complex::Complex64;

/// Geometric metadata for `modes` at spacing `delta_t`.
pub fn dimensionless_metadata(modes: Vec<Mode>, delta_t: f64) -> Result<Metadata, WaveError> {
    Metadata::new(MetadataParams {
        library: "fixture".into(),
        q: 1.5,
        delta_t,
        modes,
        dimensionless: true,
        inclination: 0.4,
        coa_phase: 0.3,
        ..MetadataParams::default()
    })
}

/// Constant-frequency modes `h_lm = A_l exp(-i m omega t / 2)` on `n` samples.
///
/// The amplitude decays by one part in a million per sample so that the peak
/// is unambiguously the first sample.
pub fn constant_frequency(
    modes: Vec<Mode>,
    omega: f64,
    n: usize,
    delta_t: f64,
) -> Result<Waveform, WaveError> {
    let time: Vec<f64> = (0..n).map(|k| k as f64 * delta_t).collect();
    let rows = modes
        .iter()
        .map(|mode| {
            let amplitude = 1.0 / f64::from(mode.l());
            let rate = f64::from(mode.m()) * omega / 2.0;
            time.iter()
                .enumerate()
                .map(|(k, t)| {
                    Complex64::from_polar(amplitude * (1.0 - 1e-6 * k as f64), -rate * t)
                })
                .collect()
        })
        .collect();
    let metadata = dimensionless_metadata(modes, delta_t)?;
    Waveform::from_modes(rows, time, metadata)
}

/// Slowly chirping `(2,2)`-dominated waveform with a Gaussian envelope.
pub fn chirp(modes: Vec<Mode>, n: usize, delta_t: f64) -> Result<Waveform, WaveError> {
    let centre = n as f64 * delta_t * 0.75;
    let width = n as f64 * delta_t * 0.2;
    let time: Vec<f64> = (0..n).map(|k| k as f64 * delta_t).collect();
    let rows = modes
        .iter()
        .map(|mode| {
            let scale = 1.0 / f64::from(mode.l() * mode.l());
            time.iter()
                .map(|t| {
                    let envelope = (-((t - centre) / width).powi(2)).exp();
                    let phase = 0.05 * t + 2e-5 * t * t;
                    Complex64::from_polar(scale * envelope, -f64::from(mode.m()) * phase)
                })
                .collect()
        })
        .collect();
    let metadata = dimensionless_metadata(modes, delta_t)?;
    Waveform::from_modes(rows, time, metadata)
}

pub fn mode(l: u32, m: i32) -> Mode {
    Mode::new(l, m).expect("valid mode")
}
