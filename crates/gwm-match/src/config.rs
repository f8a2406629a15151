//! YAML configuration for match runs.

use std::fs;
use std::path::Path;

use gwm_core::{ErrorInfo, WaveError};
use serde::{Deserialize, Serialize};

use crate::psd::PsdKind;

fn default_psd() -> PsdKind {
    PsdKind::AdvancedLigoAnalytic
}

/// Knobs of a match computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Lower frequency cutoff; defaults to the larger metadata floor.
    #[serde(default)]
    pub f_lower: Option<f64>,
    /// Noise curve weighting the overlap.
    #[serde(default = "default_psd")]
    pub psd: PsdKind,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            f_lower: None,
            psd: default_psd(),
        }
    }
}

impl MatchConfig {
    /// Parses a YAML document.
    pub fn from_yaml(text: &str) -> Result<Self, WaveError> {
        serde_yaml::from_str(text).map_err(|err| {
            WaveError::Configuration(ErrorInfo::new("invalid-match-config", err.to_string()))
        })
    }

    /// Reads and parses a YAML file.
    pub fn load(path: &Path) -> Result<Self, WaveError> {
        let text = fs::read_to_string(path).map_err(|err| {
            WaveError::Configuration(
                ErrorInfo::new("config-read-failed", err.to_string())
                    .with_context("path", path.display()),
            )
        })?;
        Self::from_yaml(&text)
    }
}
