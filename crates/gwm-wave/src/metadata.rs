//! Validated provenance and physical-parameter record for a waveform.

use std::collections::BTreeSet;
use std::fmt::{self, Display};

use gwm_core::{ErrorInfo, Mode, WaveError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::units::time_geometric_to_si;

fn metadata_error(code: &str, message: impl Into<String>) -> WaveError {
    WaveError::Validation(ErrorInfo::new(code, message))
}

fn default_true() -> bool {
    true
}

/// Unvalidated metadata fields.
///
/// This is the input of [`Metadata::new`] and the serialized form of
/// [`Metadata`]; every deserialized record passes through the validating
/// constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataParams {
    /// Producer of the data (model library or simulation catalog).
    pub library: String,
    /// Mass ratio; stored as `q >= 1`.
    pub q: f64,
    /// Sample spacing in the waveform's own time units.
    pub delta_t: f64,
    /// Approximant name for model-generated waveforms.
    #[serde(default)]
    pub approximant: Option<String>,
    /// Catalog identifier for simulation waveforms.
    #[serde(default)]
    pub simulation_id: Option<String>,
    /// Total mass in solar masses (dimensional waveforms only).
    #[serde(default)]
    pub total_mass: Option<f64>,
    /// Luminosity distance in megaparsecs (dimensional waveforms only).
    #[serde(default)]
    pub distance: Option<f64>,
    /// Dimensionless spin vector of the primary.
    #[serde(default)]
    pub spin1: [f64; 3],
    /// Dimensionless spin vector of the secondary.
    #[serde(default)]
    pub spin2: [f64; 3],
    /// Orbital eccentricity.
    #[serde(default)]
    pub eccentricity: f64,
    /// Inclination angle in radians.
    #[serde(default)]
    pub inclination: f64,
    /// Coalescence phase in radians.
    #[serde(default)]
    pub coa_phase: f64,
    /// Lower frequency bound.
    #[serde(default)]
    pub f_lower: Option<f64>,
    /// Reference frequency.
    #[serde(default)]
    pub f_ref: Option<f64>,
    /// Canonical `(l, m >= 0)` modes in storage order.
    #[serde(default)]
    pub modes: Vec<Mode>,
    /// True for geometric-unit waveforms.
    #[serde(default)]
    pub dimensionless: bool,
    /// True when the time axis is zero at peak amplitude.
    #[serde(default = "default_true")]
    pub aligned_to_peak: bool,
}

impl Default for MetadataParams {
    fn default() -> Self {
        Self {
            library: String::new(),
            q: 1.0,
            delta_t: 1.0,
            approximant: None,
            simulation_id: None,
            total_mass: None,
            distance: None,
            spin1: [0.0; 3],
            spin2: [0.0; 3],
            eccentricity: 0.0,
            inclination: 0.0,
            coa_phase: 0.0,
            f_lower: None,
            f_ref: None,
            modes: Vec::new(),
            dimensionless: false,
            aligned_to_peak: true,
        }
    }
}

/// Parameters applied when converting a geometric waveform to SI units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionalParams {
    /// Lower frequency bound in hertz.
    pub f_lower: f64,
    /// Total mass in solar masses.
    pub total_mass: f64,
    /// Luminosity distance in megaparsecs.
    pub distance: f64,
    /// Inclination angle in radians.
    #[serde(default)]
    pub inclination: f64,
    /// Coalescence phase in radians.
    #[serde(default)]
    pub coa_phase: f64,
}

impl DimensionalParams {
    /// Checks that mass, distance and frequency floor are usable.
    pub fn validate(&self) -> Result<(), WaveError> {
        for (name, value) in [
            ("f_lower", self.f_lower),
            ("total_mass", self.total_mass),
            ("distance", self.distance),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(WaveError::Validation(
                    ErrorInfo::new("invalid-dimensional-parameter", "must be finite and positive")
                        .with_context("parameter", name)
                        .with_context("value", value),
                ));
            }
        }
        Ok(())
    }
}

/// Validated waveform metadata.
///
/// Invariants:
/// * dimensionless metadata never carries `total_mass` or `distance`;
/// * dimensional metadata always carries both, finite and positive;
/// * `q >= 1`, `delta_t > 0`;
/// * `modes` are canonical (`m >= 0`) and unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MetadataParams", into = "MetadataParams")]
pub struct Metadata {
    params: MetadataParams,
}

impl Metadata {
    /// Validates and normalises the supplied fields.
    pub fn new(mut params: MetadataParams) -> Result<Self, WaveError> {
        if !(params.q.is_finite() && params.q > 0.0) {
            return Err(WaveError::Validation(
                ErrorInfo::new("invalid-mass-ratio", "mass ratio must be finite and positive")
                    .with_context("q", params.q),
            ));
        }
        if params.q < 1.0 {
            params.q = 1.0 / params.q;
        }
        if !(params.delta_t.is_finite() && params.delta_t > 0.0) {
            return Err(WaveError::Validation(
                ErrorInfo::new("invalid-delta-t", "sample spacing must be finite and positive")
                    .with_context("delta_t", params.delta_t),
            ));
        }
        for (name, value) in [("f_lower", params.f_lower), ("f_ref", params.f_ref)] {
            if let Some(value) = value {
                if !(value.is_finite() && value >= 0.0) {
                    return Err(WaveError::Validation(
                        ErrorInfo::new("invalid-frequency", "frequency must be finite and >= 0")
                            .with_context("parameter", name)
                            .with_context("value", value),
                    ));
                }
            }
        }

        let mut seen = BTreeSet::new();
        for mode in &params.modes {
            if !mode.is_canonical() {
                return Err(WaveError::Validation(
                    ErrorInfo::new("non-canonical-mode", "stored modes must have m >= 0")
                        .with_context("mode", mode)
                        .with_hint("negative orders are derived from their (l, |m|) partner"),
                ));
            }
            if !seen.insert(*mode) {
                return Err(WaveError::Validation(
                    ErrorInfo::new("duplicate-mode", "mode listed more than once")
                        .with_context("mode", mode),
                ));
            }
        }

        if params.dimensionless {
            params.total_mass = None;
            params.distance = None;
        } else {
            let (Some(total_mass), Some(distance)) = (params.total_mass, params.distance) else {
                return Err(metadata_error(
                    "missing-dimensional-parameters",
                    "both total_mass and distance must be defined for dimensional waveforms",
                ));
            };
            for (name, value) in [("total_mass", total_mass), ("distance", distance)] {
                if !(value.is_finite() && value > 0.0) {
                    return Err(WaveError::Validation(
                        ErrorInfo::new("invalid-dimensional-parameter", "must be finite and positive")
                            .with_context("parameter", name)
                            .with_context("value", value),
                    ));
                }
            }
        }

        Ok(Self { params })
    }

    /// Returns a copy of the underlying fields.
    pub fn params(&self) -> MetadataParams {
        self.params.clone()
    }

    /// Copies the fields, applies `edit` and re-validates.
    ///
    /// The receiver is never modified.
    pub fn derive(&self, edit: impl FnOnce(&mut MetadataParams)) -> Result<Self, WaveError> {
        let mut params = self.params.clone();
        edit(&mut params);
        Self::new(params)
    }

    /// Dimensional copy of geometric metadata.
    ///
    /// Sets mass, distance, angles and frequency floor, converts `delta_t` to
    /// seconds and clears the `dimensionless` flag.
    pub fn to_dimensional(&self, dims: &DimensionalParams) -> Result<Self, WaveError> {
        if !self.params.dimensionless {
            return Err(metadata_error(
                "already-dimensional",
                "metadata is already in SI units",
            ));
        }
        dims.validate()?;
        self.derive(|params| {
            params.f_lower = Some(dims.f_lower);
            params.total_mass = Some(dims.total_mass);
            params.distance = Some(dims.distance);
            params.inclination = dims.inclination;
            params.coa_phase = dims.coa_phase;
            params.delta_t = time_geometric_to_si(params.delta_t, dims.total_mass);
            params.dimensionless = false;
        })
    }

    /// Field-by-field export as a JSON object.
    pub fn to_record(&self) -> Map<String, Value> {
        match serde_json::to_value(&self.params) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Producer of the data.
    pub fn library(&self) -> &str {
        &self.params.library
    }

    /// Mass ratio, always `>= 1`.
    pub fn q(&self) -> f64 {
        self.params.q
    }

    /// Sample spacing.
    pub fn delta_t(&self) -> f64 {
        self.params.delta_t
    }

    /// Approximant name, if model generated.
    pub fn approximant(&self) -> Option<&str> {
        self.params.approximant.as_deref()
    }

    /// Simulation identifier, if catalog loaded.
    pub fn simulation_id(&self) -> Option<&str> {
        self.params.simulation_id.as_deref()
    }

    /// Total mass in solar masses; `None` for dimensionless metadata.
    pub fn total_mass(&self) -> Option<f64> {
        self.params.total_mass
    }

    /// Distance in megaparsecs; `None` for dimensionless metadata.
    pub fn distance(&self) -> Option<f64> {
        self.params.distance
    }

    /// Primary spin vector.
    pub fn spin1(&self) -> [f64; 3] {
        self.params.spin1
    }

    /// Secondary spin vector.
    pub fn spin2(&self) -> [f64; 3] {
        self.params.spin2
    }

    /// Orbital eccentricity.
    pub fn eccentricity(&self) -> f64 {
        self.params.eccentricity
    }

    /// Inclination angle.
    pub fn inclination(&self) -> f64 {
        self.params.inclination
    }

    /// Coalescence phase.
    pub fn coa_phase(&self) -> f64 {
        self.params.coa_phase
    }

    /// Lower frequency bound.
    pub fn f_lower(&self) -> Option<f64> {
        self.params.f_lower
    }

    /// Reference frequency.
    pub fn f_ref(&self) -> Option<f64> {
        self.params.f_ref
    }

    /// Canonical modes in storage order.
    pub fn modes(&self) -> &[Mode] {
        &self.params.modes
    }

    /// Storage row of `mode`, looked up by its canonical form.
    pub fn mode_index(&self, mode: Mode) -> Option<usize> {
        let canonical = mode.canonical();
        self.params.modes.iter().position(|stored| *stored == canonical)
    }

    /// True for geometric-unit metadata.
    pub fn dimensionless(&self) -> bool {
        self.params.dimensionless
    }

    /// True when the time axis is zero at peak amplitude.
    pub fn aligned_to_peak(&self) -> bool {
        self.params.aligned_to_peak
    }
}

impl TryFrom<MetadataParams> for Metadata {
    type Error = WaveError;

    fn try_from(params: MetadataParams) -> Result<Self, Self::Error> {
        Metadata::new(params)
    }
}

impl From<Metadata> for MetadataParams {
    fn from(metadata: Metadata) -> Self {
        metadata.params
    }
}

impl Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.params;
        let modes = p
            .modes
            .iter()
            .map(|mode| mode.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let mut parts = vec![format!("library={}", p.library)];
        if let Some(approximant) = &p.approximant {
            parts.push(format!("approximant={approximant}"));
        }
        if let Some(simulation_id) = &p.simulation_id {
            parts.push(format!("simulation_id={simulation_id}"));
        }
        parts.push(format!("q={}", p.q));
        if let Some(total_mass) = p.total_mass {
            parts.push(format!("total_mass={total_mass}"));
        }
        if let Some(distance) = p.distance {
            parts.push(format!("distance={distance}"));
        }
        parts.push(format!("spin1={:?}", p.spin1));
        parts.push(format!("spin2={:?}", p.spin2));
        parts.push(format!("eccentricity={}", p.eccentricity));
        parts.push(format!("inclination={}", p.inclination));
        parts.push(format!("coa_phase={}", p.coa_phase));
        if let Some(f_lower) = p.f_lower {
            parts.push(format!("f_lower={f_lower}"));
        }
        if let Some(f_ref) = p.f_ref {
            parts.push(format!("f_ref={f_ref}"));
        }
        parts.push(format!("delta_t={}", p.delta_t));
        parts.push(format!("modes=[{modes}]"));
        parts.push(format!("dimensionless={}", p.dimensionless));
        parts.push(format!("aligned_to_peak={}", p.aligned_to_peak));
        write!(f, "Metadata({})", parts.join(", "))
    }
}
