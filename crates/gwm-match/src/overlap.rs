//! Matched-filter overlap maximised over time and phase.

use gwm_core::{ErrorInfo, WaveError};
use gwm_wave::Waveform;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::fft::FftPlan;
use crate::psd::PsdProvider;

/// Result of [`waveform_match`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Normalised overlap, nominally in `[0, 1]`.
    pub value: f64,
    /// Common sample spacing (the coarser of the two inputs).
    pub delta_t: f64,
    /// Zero-padded transform length.
    pub padded_len: usize,
    /// Frequency resolution `1 / (padded_len * delta_t)`.
    pub delta_f: f64,
    /// Resolved lower frequency cutoff.
    pub f_lower: f64,
    /// Circular lag, in samples, at which the overlap peaks.
    pub peak_index: usize,
    /// Delay of `b` relative to `a` at the peak, including the grid offsets.
    pub time_shift: f64,
}

fn match_error(code: &str, message: impl Into<String>) -> WaveError {
    WaveError::Validation(ErrorInfo::new(code, message))
}

/// Real part of the recombined strain on a uniform grid of spacing `delta_t`.
fn real_signal(waveform: &Waveform, delta_t: f64) -> Result<(f64, Vec<f64>), WaveError> {
    let grid = waveform.uniform_grid(delta_t);
    if grid.len() < 2 {
        return Err(WaveError::Validation(
            ErrorInfo::new("too-few-samples", "resampled signal has fewer than two samples")
                .with_context("delta_t", delta_t)
                .with_context("duration", waveform.duration()),
        ));
    }
    let signal = waveform
        .recombine(Some(&grid))?
        .into_iter()
        .map(|h| h.re)
        .collect();
    Ok((grid[0], signal))
}

/// Explicit cutoff, else the larger of the two metadata floors, else zero.
fn resolve_f_lower(a: &Waveform, b: &Waveform, f_lower: Option<f64>) -> f64 {
    f_lower
        .or_else(|| match (a.metadata().f_lower(), b.metadata().f_lower()) {
            (Some(x), Some(y)) => Some(x.max(y)),
            (x, y) => x.or(y),
        })
        .unwrap_or(0.0)
}

/// `4 Δf Σ |h_k|² w_k`.
fn sigma_sq(spectrum: &[Complex64], weights: &[f64], delta_f: f64) -> f64 {
    4.0 * delta_f
        * spectrum
            .iter()
            .zip(weights)
            .map(|(h, w)| h.norm_sqr() * w)
            .sum::<f64>()
}

/// Noise-weighted match between `a` and `b`.
///
/// Both waveforms are recombined onto their own uniform grid at the coarser of
/// the two spacings, reduced to their real parts, zero-padded to a common
/// power-of-two length and compared in the frequency domain. The overlap is
/// maximised over circular time shift and over phase. Bins below the cutoff,
/// the Nyquist bin and bins where the PSD is zero or non-finite carry no
/// weight.
pub fn waveform_match(
    a: &Waveform,
    b: &Waveform,
    f_lower: Option<f64>,
    psd: &dyn PsdProvider,
) -> Result<MatchOutcome, WaveError> {
    if a.metadata().dimensionless() != b.metadata().dimensionless() {
        return Err(WaveError::Validation(
            ErrorInfo::new("regime-mismatch", "cannot compare dimensional and dimensionless waveforms")
                .with_context("a_dimensionless", a.metadata().dimensionless())
                .with_context("b_dimensionless", b.metadata().dimensionless()),
        ));
    }
    let delta_t = a.metadata().delta_t().max(b.metadata().delta_t());
    let (start_a, signal_a) = real_signal(a, delta_t)?;
    let (start_b, signal_b) = real_signal(b, delta_t)?;

    let padded_len = signal_a.len().max(signal_b.len()).next_power_of_two();
    let delta_f = 1.0 / (padded_len as f64 * delta_t);
    let f_lower = resolve_f_lower(a, b, f_lower);
    if !(f_lower.is_finite() && f_lower >= 0.0) {
        return Err(WaveError::Validation(
            ErrorInfo::new("invalid-frequency", "lower frequency must be finite and >= 0")
                .with_context("f_lower", f_lower),
        ));
    }

    let plan = FftPlan::new(padded_len);
    let bins = plan.one_sided_len();
    let noise = psd.psd(bins, delta_f, f_lower);
    if noise.len() != bins {
        return Err(WaveError::Configuration(
            ErrorInfo::new("psd-length-mismatch", "noise curve has the wrong number of bins")
                .with_context("psd", psd.name())
                .with_context("expected", bins)
                .with_context("actual", noise.len()),
        ));
    }

    let k_min = if f_lower > 0.0 {
        (f_lower / delta_f).floor() as usize
    } else {
        1
    };
    let k_max = padded_len / 2;
    let weights: Vec<f64> = noise
        .iter()
        .enumerate()
        .map(|(k, &s)| {
            if k >= k_min && k < k_max && s.is_finite() && s > 0.0 {
                1.0 / s
            } else {
                0.0
            }
        })
        .collect();

    let spectrum_a: Vec<Complex64> = plan
        .forward_real(&signal_a)
        .into_iter()
        .map(|bin| bin * delta_t)
        .collect();
    let spectrum_b: Vec<Complex64> = plan
        .forward_real(&signal_b)
        .into_iter()
        .map(|bin| bin * delta_t)
        .collect();

    let sigma_a = sigma_sq(&spectrum_a, &weights, delta_f);
    let sigma_b = sigma_sq(&spectrum_b, &weights, delta_f);
    if !(sigma_a > 0.0 && sigma_b > 0.0) {
        return Err(WaveError::SignalWindow(
            ErrorInfo::new("no-power-above-cutoff", "a signal has no weighted power in band")
                .with_context("f_lower", f_lower)
                .with_context("sigma_sq_a", sigma_a)
                .with_context("sigma_sq_b", sigma_b),
        ));
    }

    let integrand: Vec<Complex64> = spectrum_a
        .iter()
        .zip(&spectrum_b)
        .zip(&weights)
        .map(|((ha, hb), w)| ha.conj() * hb * *w)
        .collect();
    let correlation = plan.inverse(&integrand);
    let (peak_index, peak) = correlation
        .iter()
        .enumerate()
        .map(|(idx, z)| (idx, z.norm()))
        .fold((0, f64::NEG_INFINITY), |best, item| {
            if item.1 > best.1 {
                item
            } else {
                best
            }
        });

    let value = 4.0 * delta_f * peak / (sigma_a * sigma_b).sqrt();
    let lag = if peak_index <= padded_len / 2 {
        peak_index as f64
    } else {
        peak_index as f64 - padded_len as f64
    };
    let time_shift = lag * delta_t + (start_b - start_a);

    debug!(k_min, k_max, sigma_a, sigma_b, "match normalisation");
    info!(
        value,
        delta_t,
        padded_len,
        f_lower,
        psd = psd.name(),
        "computed match"
    );
    if !value.is_finite() {
        return Err(match_error("non-finite-match", "overlap evaluated to a non-finite value"));
    }
    Ok(MatchOutcome {
        value,
        delta_t,
        padded_len,
        delta_f,
        f_lower,
        peak_index,
        time_shift,
    })
}
