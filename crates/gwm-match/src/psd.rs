//! Reference noise curves sampled on a one-sided frequency grid.

use std::fmt::{self, Display};
use std::str::FromStr;

use gwm_core::{ErrorInfo, WaveError};
use serde::{Deserialize, Serialize};

/// Supplies a real noise power spectral density.
pub trait PsdProvider {
    /// Stable name recorded in reports.
    fn name(&self) -> &str;

    /// `len` bins at spacing `delta_f`, starting at DC.
    ///
    /// Bins below `f_lower` are zero and are therefore excluded from every
    /// weighted sum.
    fn psd(&self, len: usize, delta_f: f64, f_lower: f64) -> Vec<f64>;
}

/// White noise of unit height above the cutoff.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlatPsd;

impl PsdProvider for FlatPsd {
    fn name(&self) -> &str {
        PsdKind::Flat.as_str()
    }

    fn psd(&self, len: usize, delta_f: f64, f_lower: f64) -> Vec<f64> {
        (0..len)
            .map(|k| if k as f64 * delta_f >= f_lower { 1.0 } else { 0.0 })
            .collect()
    }
}

/// Analytic fit to the zero-detuned high-power Advanced LIGO design curve.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AdvancedLigoAnalyticPsd;

impl AdvancedLigoAnalyticPsd {
    const SCALE: f64 = 1e-49;
    const KNEE_HZ: f64 = 215.0;

    /// Value of the fit at `frequency` hertz.
    pub fn at(frequency: f64) -> f64 {
        let x = frequency / Self::KNEE_HZ;
        let x2 = x * x;
        Self::SCALE
            * (x.powf(-4.14) - 5.0 / x2
                + 111.0 * (1.0 - x2 + 0.5 * x2 * x2) / (1.0 + 0.5 * x2))
    }
}

impl PsdProvider for AdvancedLigoAnalyticPsd {
    fn name(&self) -> &str {
        PsdKind::AdvancedLigoAnalytic.as_str()
    }

    fn psd(&self, len: usize, delta_f: f64, f_lower: f64) -> Vec<f64> {
        (0..len)
            .map(|k| {
                let f = k as f64 * delta_f;
                if k == 0 || f < f_lower {
                    0.0
                } else {
                    Self::at(f)
                }
            })
            .collect()
    }
}

/// Named selection of a built-in noise curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PsdKind {
    /// [`FlatPsd`].
    Flat,
    /// [`AdvancedLigoAnalyticPsd`].
    #[default]
    AdvancedLigoAnalytic,
}

impl PsdKind {
    /// Kebab-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PsdKind::Flat => "flat",
            PsdKind::AdvancedLigoAnalytic => "advanced-ligo-analytic",
        }
    }

    /// Boxed provider for this curve.
    pub fn provider(&self) -> Box<dyn PsdProvider> {
        match self {
            PsdKind::Flat => Box::new(FlatPsd),
            PsdKind::AdvancedLigoAnalytic => Box::new(AdvancedLigoAnalyticPsd),
        }
    }
}

impl Display for PsdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PsdKind {
    type Err = WaveError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "flat" => Ok(PsdKind::Flat),
            "advanced-ligo-analytic" => Ok(PsdKind::AdvancedLigoAnalytic),
            other => Err(WaveError::Configuration(
                ErrorInfo::new("unknown-psd", "no noise curve with this name")
                    .with_context("psd", other)
                    .with_hint("expected one of: flat, advanced-ligo-analytic"),
            )),
        }
    }
}
