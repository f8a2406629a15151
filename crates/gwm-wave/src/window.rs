//! Cropping a mode to the segment where its frequency exceeds a floor.
//!
//! The longest contiguous above-threshold run is taken to be the physical
//! signal; shorter excursions (start-up transients, post-merger noise) are
//! discarded. Ties go to the earliest run. This is a noise-rejection heuristic
//! and assumes the true signal sweeps upward in frequency and stays above the
//! floor longer than any spurious excursion.

use std::f64::consts::PI;
use std::ops::Range;

use gwm_core::{ErrorInfo, WaveError};
use num_complex::Complex64;
use tracing::debug;

use crate::series::{amplitude, angular_frequency, from_polar, phase};

/// Longest maximal run of consecutive indices with `values[i] > threshold`.
///
/// Returns a half-open index range; `None` when no value exceeds the threshold.
pub fn longest_run_above(values: &[f64], threshold: f64) -> Option<Range<usize>> {
    let mut best: Option<Range<usize>> = None;
    let mut start: Option<usize> = None;
    for idx in 0..=values.len() {
        let above = values.get(idx).is_some_and(|&value| value > threshold);
        match (above, start) {
            (true, None) => start = Some(idx),
            (false, Some(begin)) => {
                let longer = best.as_ref().map_or(true, |run| idx - begin > run.len());
                if longer {
                    best = Some(begin..idx);
                }
                start = None;
            }
            _ => {}
        }
    }
    best
}

/// Index range of the physically valid segment of `strain`.
///
/// Fails with a `SignalWindow` error when no sample's angular frequency
/// exceeds `2π f_lower`.
pub fn window_range(
    strain: &[Complex64],
    time: &[f64],
    f_lower: f64,
) -> Result<Range<usize>, WaveError> {
    let omega = angular_frequency(strain, time);
    let threshold = 2.0 * PI * f_lower;
    let run = longest_run_above(&omega, threshold).ok_or_else(|| {
        WaveError::SignalWindow(
            ErrorInfo::new(
                "no-signal-above-threshold",
                "no sample exceeds the requested lower frequency",
            )
            .with_context("f_lower", f_lower)
            .with_context("samples", strain.len()),
        )
    })?;
    debug!(
        start = run.start,
        end = run.end,
        samples = strain.len(),
        f_lower,
        "selected frequency window"
    );
    Ok(run)
}

/// Rebuilds `strain` on `range` from its amplitude and unwrapped phase.
///
/// The phase is unwrapped over the full series before restriction so the crop
/// boundary introduces no discontinuity.
pub fn crop_polar(strain: &[Complex64], range: Range<usize>) -> Vec<Complex64> {
    let amps = amplitude(strain);
    let phases = phase(strain);
    from_polar(&amps[range.clone()], &phases[range])
}

/// Crops a single mode and its time axis to the longest run above `f_lower`.
pub fn frequency_window(
    strain: &[Complex64],
    time: &[f64],
    f_lower: f64,
) -> Result<(Vec<Complex64>, Vec<f64>), WaveError> {
    let range = window_range(strain, time, f_lower)?;
    let cropped_time = time[range.clone()].to_vec();
    Ok((crop_polar(strain, range), cropped_time))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_longest_run() {
        let mut trace = vec![0.0; 40];
        for value in &mut trace[3..8] {
            *value = 5.0;
        }
        for value in &mut trace[15..27] {
            *value = 5.0;
        }
        assert_eq!(longest_run_above(&trace, 1.0), Some(15..27));
    }

    #[test]
    fn ties_go_to_earliest_run() {
        let trace = [2.0, 2.0, 0.0, 2.0, 2.0];
        assert_eq!(longest_run_above(&trace, 1.0), Some(0..2));
    }

    #[test]
    fn run_touching_the_end_is_counted() {
        let trace = [0.0, 2.0, 0.0, 2.0, 2.0, 2.0];
        assert_eq!(longest_run_above(&trace, 1.0), Some(3..6));
    }

    #[test]
    fn threshold_is_strict() {
        assert_eq!(longest_run_above(&[1.0, 1.0], 1.0), None);
    }
}
