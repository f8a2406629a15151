#![deny(missing_docs)]
#![doc = "PSD-weighted matched-filter overlap between multi-mode gravitational-wave signals."]

pub mod config;
pub mod fft;
pub mod overlap;
pub mod psd;
pub mod report;

pub use config::MatchConfig;
pub use fft::{frequency_series, FftPlan, FrequencySeries};
pub use overlap::{waveform_match, MatchOutcome};
pub use psd::{AdvancedLigoAnalyticPsd, FlatPsd, PsdKind, PsdProvider};
pub use report::{match_report, MatchReport};
