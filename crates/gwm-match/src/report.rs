//! Match report bundling the outcome with provenance.

use gwm_core::{stable_hash_string, RunProvenance, WaveError};
use gwm_wave::Waveform;
use serde::{Deserialize, Serialize};

use crate::config::MatchConfig;
use crate::overlap::waveform_match;
use crate::psd::PsdKind;

/// Serialisable record of one match computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    /// Normalised overlap.
    pub value: f64,
    /// Common sample spacing.
    pub delta_t: f64,
    /// Zero-padded transform length.
    pub padded_len: usize,
    /// Frequency resolution.
    pub delta_f: f64,
    /// Resolved lower frequency cutoff.
    pub f_lower: f64,
    /// Noise curve used.
    pub psd: PsdKind,
    /// Circular lag of the overlap peak.
    pub peak_index: usize,
    /// Delay of `b` relative to `a` at the peak.
    pub time_shift: f64,
    /// Input hashes, timestamp and tool versions.
    pub provenance: RunProvenance,
    /// Hash over the inputs and results; independent of the timestamp.
    pub analysis_hash: String,
}

/// Runs [`waveform_match`] under `config` and records provenance.
pub fn match_report(
    a: &Waveform,
    b: &Waveform,
    config: &MatchConfig,
) -> Result<MatchReport, WaveError> {
    let provider = config.psd.provider();
    let outcome = waveform_match(a, b, config.f_lower, provider.as_ref())?;
    let provenance = RunProvenance::now("gwm-match", env!("CARGO_PKG_VERSION"))
        .with_input("a", a.content_hash()?)
        .with_input("b", b.content_hash()?)
        .with_input("config", stable_hash_string(config)?);

    let mut report = MatchReport {
        value: outcome.value,
        delta_t: outcome.delta_t,
        padded_len: outcome.padded_len,
        delta_f: outcome.delta_f,
        f_lower: outcome.f_lower,
        psd: config.psd,
        peak_index: outcome.peak_index,
        time_shift: outcome.time_shift,
        provenance,
        analysis_hash: String::new(),
    };
    report.analysis_hash = stable_hash_string(&(
        &report.provenance.input_hashes,
        &report.provenance.tool_versions,
        report.value,
        report.padded_len,
        report.f_lower,
        report.psd,
        report.peak_index,
    ))?;
    Ok(report)
}
