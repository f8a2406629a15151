//! Replacing modes with eccentric counterparts from an external model.

use gwm_core::{ErrorInfo, Mode, WaveError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::series::from_polar;
use crate::waveform::Waveform;

/// A mode given as amplitude and phase on its own time axis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PolarModeSeries {
    /// Sample times.
    pub time: Vec<f64>,
    /// Phase in radians; `h = amplitude * exp(i * phase)`.
    pub phase: Vec<f64>,
    /// Amplitude.
    pub amplitude: Vec<f64>,
}

impl Waveform {
    /// Rebuilds `modes` from `func` and tags the copy with `eccentricity`.
    ///
    /// `func` receives the receiver and the mode to produce. All returned series
    /// must share one time axis; the new `delta_t` is taken from that axis.
    pub fn with_eccentricity<F>(
        &self,
        func: F,
        eccentricity: f64,
        modes: &[Mode],
    ) -> Result<Waveform, WaveError>
    where
        F: Fn(&Waveform, Mode) -> Result<PolarModeSeries, WaveError>,
    {
        if !(eccentricity.is_finite() && (0.0..1.0).contains(&eccentricity)) {
            return Err(WaveError::Validation(
                ErrorInfo::new("invalid-eccentricity", "eccentricity must lie in [0, 1)")
                    .with_context("eccentricity", eccentricity),
            ));
        }
        let mut time: Option<Vec<f64>> = None;
        let mut rows = Vec::with_capacity(modes.len());
        for &mode in modes {
            let series = func(self, mode)?;
            if series.phase.len() != series.time.len()
                || series.amplitude.len() != series.time.len()
            {
                return Err(WaveError::Validation(
                    ErrorInfo::new("sample-count-mismatch", "phase and amplitude must match time")
                        .with_context("mode", mode)
                        .with_context("samples", series.time.len()),
                ));
            }
            rows.push(from_polar(&series.amplitude, &series.phase));
            match &time {
                None => time = Some(series.time),
                Some(axis) if *axis != series.time => {
                    return Err(WaveError::Validation(
                        ErrorInfo::new("time-axis-mismatch", "modes were returned on different time axes")
                            .with_context("mode", mode),
                    ));
                }
                Some(_) => {}
            }
        }
        let time = time.unwrap_or_default();
        if time.len() < 2 {
            return Err(WaveError::validation(
                "too-few-samples",
                "a waveform needs at least two samples",
            ));
        }
        let delta_t = time[1] - time[0];
        let metadata = self.metadata().derive(|params| {
            params.modes = modes.to_vec();
            params.eccentricity = eccentricity;
            params.delta_t = delta_t;
        })?;
        debug!(eccentricity, modes = modes.len(), delta_t, "substituted eccentric modes");
        Waveform::from_modes(rows, time, metadata)
    }
}
