//! Adapters over external waveform producers.
//!
//! Neither model evaluation nor catalog retrieval happens in this crate; both
//! are consumed through the traits below and turned into validated
//! [`Waveform`]s.

use gwm_core::{ErrorInfo, Mode, WaveError};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::info;

use crate::params::normalize;
use crate::spline::resample_complex;
use crate::waveform::{uniform_grid, Waveform};

/// Physical parameters handed to a model evaluator for a single mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRequest {
    /// Approximant name.
    pub approximant: String,
    /// Requested mode.
    pub mode: Mode,
    /// Primary mass in solar masses.
    pub mass1: f64,
    /// Secondary mass in solar masses.
    pub mass2: f64,
    /// Sample spacing in seconds.
    pub delta_t: f64,
    /// Lower frequency bound in hertz.
    pub f_lower: f64,
    /// Luminosity distance in megaparsecs.
    pub distance: f64,
    /// Every other raw parameter, passed through untouched.
    pub extra: Map<String, Value>,
}

impl ModelRequest {
    /// Total mass `mass1 + mass2`.
    pub fn total_mass(&self) -> f64 {
        self.mass1 + self.mass2
    }
}

/// Time axis and complex strain of one mode.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModeSeries {
    /// Sample times.
    pub time: Vec<f64>,
    /// Complex strain samples.
    pub strain: Vec<Complex64>,
}

/// External waveform model: physical parameters to per-mode strain.
pub trait ModelEvaluator: Sync {
    /// Library name recorded in the resulting metadata.
    fn library(&self) -> &str;
    /// True when `approximant` can be evaluated.
    fn supports(&self, approximant: &str) -> bool;
    /// Evaluates one mode.
    fn evaluate(&self, request: &ModelRequest) -> Result<ModeSeries, WaveError>;
}

/// Raw result of a catalog lookup, in simulation units.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogRecord {
    /// Catalog time axis; need not be uniform.
    pub time: Vec<f64>,
    /// Strain of every mode the catalog returned.
    pub modes: Vec<(Mode, Vec<Complex64>)>,
    /// Provenance parameters under the catalog's own key names.
    pub params: Map<String, Value>,
}

/// External numerical-relativity catalog.
pub trait SimulationCatalog {
    /// Library name recorded in the resulting metadata.
    fn library(&self) -> &str;
    /// Loads `modes` of simulation `sim_id`.
    fn load(&self, sim_id: &str, modes: &[Mode]) -> Result<CatalogRecord, WaveError>;
}

fn required(raw: &Map<String, Value>, key: &str) -> Result<f64, WaveError> {
    let value = raw.get(key).ok_or_else(|| {
        WaveError::Validation(
            ErrorInfo::new("missing-parameter", "required model parameter is missing")
                .with_context("field", key),
        )
    })?;
    value.as_f64().ok_or_else(|| {
        WaveError::Validation(
            ErrorInfo::new("invalid-parameter", format!("{key} must be a number"))
                .with_context("field", key)
                .with_context("value", value),
        )
    })
}

fn mode_not_found(mode: Mode, source: &str) -> WaveError {
    WaveError::ModeNotFound(
        ErrorInfo::new("mode-not-found", "requested mode missing from source output")
            .with_context("mode", mode)
            .with_context("source", source),
    )
}

impl Waveform {
    /// Evaluates `modes` of `approximant` and wraps them as an SI waveform.
    ///
    /// `raw` must carry `mass1`, `mass2`, `delta_t`, `f_lower` and `distance`;
    /// everything else is normalised through the parameter adapter. The time
    /// axis is aligned to the peak of the first requested mode.
    pub fn from_model(
        evaluator: &dyn ModelEvaluator,
        approximant: &str,
        modes: &[Mode],
        raw: &Map<String, Value>,
    ) -> Result<Waveform, WaveError> {
        if !evaluator.supports(approximant) {
            return Err(WaveError::Configuration(
                ErrorInfo::new("unsupported-approximant", "model cannot evaluate approximant")
                    .with_context("approximant", approximant)
                    .with_context("library", evaluator.library()),
            ));
        }
        let Some(&first) = modes.first() else {
            return Err(WaveError::validation(
                "empty-modes",
                "at least one mode must be requested",
            ));
        };
        let mass1 = required(raw, "mass1")?;
        let mass2 = required(raw, "mass2")?;
        let delta_t = required(raw, "delta_t")?;
        let f_lower = required(raw, "f_lower")?;
        let distance = required(raw, "distance")?;
        if !(mass1 > 0.0 && mass2 > 0.0) {
            return Err(WaveError::Validation(
                ErrorInfo::new("invalid-mass", "component masses must be positive")
                    .with_context("mass1", mass1)
                    .with_context("mass2", mass2),
            ));
        }

        let mut extra = raw.clone();
        for key in ["mass1", "mass2", "delta_t", "f_lower", "distance"] {
            extra.remove(key);
        }

        let mut time: Option<Vec<f64>> = None;
        let mut rows = Vec::with_capacity(modes.len());
        for &mode in modes {
            let request = ModelRequest {
                approximant: approximant.to_string(),
                mode,
                mass1,
                mass2,
                delta_t,
                f_lower,
                distance,
                extra: extra.clone(),
            };
            let series = evaluator.evaluate(&request)?;
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
            rows.push(series.strain);
        }
        let time = time.unwrap_or_default();
        let aligned = Waveform::align(&rows[0], &time);

        let mut bundle = raw.clone();
        bundle.insert("library".into(), json!(evaluator.library()));
        bundle.insert("approximant".into(), json!(approximant));
        bundle.insert("q".into(), json!((mass1 / mass2).max(mass2 / mass1)));
        bundle.insert("total_mass".into(), json!(mass1 + mass2));
        bundle.insert("modes".into(), json!(modes));
        bundle.insert("dimensionless".into(), json!(false));
        bundle.insert("aligned_to_peak".into(), json!(true));
        let metadata = normalize(&bundle)?;

        info!(
            library = evaluator.library(),
            approximant,
            reference = %first,
            modes = modes.len(),
            samples = time.len(),
            "evaluated model waveform"
        );
        Waveform::from_modes(rows, aligned, metadata)
    }

    /// Loads `modes` of simulation `sim_id` as a geometric waveform.
    ///
    /// The catalog axis is resampled by cubic spline onto a uniform grid at the
    /// smallest catalog spacing, starting at the first sample and stopping
    /// before the last, then aligned to the peak of the first requested mode.
    pub fn from_catalog(
        catalog: &dyn SimulationCatalog,
        sim_id: &str,
        modes: &[Mode],
    ) -> Result<Waveform, WaveError> {
        if modes.is_empty() {
            return Err(WaveError::validation(
                "empty-modes",
                "at least one mode must be requested",
            ));
        }
        let record = catalog.load(sim_id, modes)?;
        let delta_t = record
            .time
            .windows(2)
            .map(|pair| pair[1] - pair[0])
            .fold(f64::INFINITY, f64::min);
        if !(delta_t.is_finite() && delta_t > 0.0) {
            return Err(WaveError::Validation(
                ErrorInfo::new("non-monotonic-time", "catalog time axis must be strictly increasing")
                    .with_context("simulation_id", sim_id),
            ));
        }
        let first = record.time[0];
        let last = record.time[record.time.len() - 1];
        let grid = uniform_grid(first, last, delta_t);

        let mut rows = Vec::with_capacity(modes.len());
        for &mode in modes {
            let (_, samples) = record
                .modes
                .iter()
                .find(|(stored, _)| *stored == mode)
                .ok_or_else(|| mode_not_found(mode, sim_id))?;
            rows.push(resample_complex(&record.time, samples, &grid)?);
        }
        let aligned = Waveform::align(&rows[0], &grid);

        let mut bundle = record.params.clone();
        bundle.insert("library".into(), json!(catalog.library()));
        bundle.insert("simulation_id".into(), json!(sim_id));
        bundle.insert("delta_t".into(), json!(delta_t));
        bundle.insert("modes".into(), json!(modes));
        bundle.insert("dimensionless".into(), json!(true));
        bundle.insert("aligned_to_peak".into(), json!(true));
        let metadata = normalize(&bundle)?;

        info!(
            library = catalog.library(),
            simulation_id = sim_id,
            modes = modes.len(),
            catalog_samples = record.time.len(),
            samples = grid.len(),
            "loaded catalog waveform"
        );
        Waveform::from_modes(rows, aligned, metadata)
    }
}
