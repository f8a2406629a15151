//! Normalising adapter from heterogeneous parameter bundles to [`Metadata`].
//!
//! Model evaluators and simulation catalogs name the same quantities
//! differently. The alias table maps every known spelling onto a canonical
//! field; keys with no canonical counterpart are dropped.

use gwm_core::{ErrorInfo, Mode, WaveError};
use serde_json::{Map, Value};
use tracing::debug;

use crate::metadata::{Metadata, MetadataParams};

/// Alternative spellings mapped onto canonical field names.
pub const ALIASES: &[(&str, &str)] = &[
    ("reference_dimensionless_spin1", "spin1"),
    ("reference_dimensionless_spin2", "spin2"),
    ("reference_eccentricity", "eccentricity"),
    ("initial_mass_ratio", "q"),
    ("reference_mass_ratio", "q"),
    ("mass_ratio", "q"),
    ("approx", "approximant"),
    ("sim_id", "simulation_id"),
    ("iota", "inclination"),
    ("phi_ref", "coa_phase"),
    ("f_min", "f_lower"),
    ("dt", "delta_t"),
];

/// Canonical field names understood by [`normalize`].
pub const FIELDS: &[&str] = &[
    "library",
    "q",
    "delta_t",
    "approximant",
    "simulation_id",
    "total_mass",
    "distance",
    "spin1",
    "spin2",
    "eccentricity",
    "inclination",
    "coa_phase",
    "f_lower",
    "f_ref",
    "modes",
    "dimensionless",
    "aligned_to_peak",
];

/// Resolves a raw key to its canonical field name, if any.
pub fn canonical_key(key: &str) -> Option<&'static str> {
    if let Some(field) = FIELDS.iter().copied().find(|field| *field == key) {
        return Some(field);
    }
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, field)| *field)
}

fn invalid(field: &str, expected: &str, value: &Value) -> WaveError {
    WaveError::Validation(
        ErrorInfo::new("invalid-parameter", format!("{field} must be {expected}"))
            .with_context("field", field)
            .with_context("value", value),
    )
}

fn number(field: &str, value: &Value) -> Result<f64, WaveError> {
    value
        .as_f64()
        .ok_or_else(|| invalid(field, "a number", value))
}

fn optional_number(field: &str, value: &Value) -> Result<Option<f64>, WaveError> {
    if value.is_null() {
        Ok(None)
    } else {
        number(field, value).map(Some)
    }
}

fn optional_text(field: &str, value: &Value) -> Result<Option<String>, WaveError> {
    match value {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text.clone())),
        other => Err(invalid(field, "a string", other)),
    }
}

fn flag(field: &str, value: &Value) -> Result<bool, WaveError> {
    value.as_bool().ok_or_else(|| invalid(field, "a boolean", value))
}

fn spin(field: &str, value: &Value) -> Result<[f64; 3], WaveError> {
    if value.is_null() {
        return Ok([0.0; 3]);
    }
    let items = value
        .as_array()
        .filter(|items| items.len() == 3)
        .ok_or_else(|| invalid(field, "a three-component vector", value))?;
    let mut out = [0.0; 3];
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = number(field, item)?;
    }
    Ok(out)
}

fn modes(value: &Value) -> Result<Vec<Mode>, WaveError> {
    serde_json::from_value(value.clone())
        .map_err(|_| invalid("modes", "a list of [l, m] pairs", value))
}

fn apply(params: &mut MetadataParams, field: &str, value: &Value) -> Result<(), WaveError> {
    match field {
        "library" => {
            params.library = optional_text(field, value)?
                .ok_or_else(|| invalid(field, "a string", value))?
        }
        "q" => params.q = number(field, value)?,
        "delta_t" => params.delta_t = number(field, value)?,
        "approximant" => params.approximant = optional_text(field, value)?,
        "simulation_id" => params.simulation_id = optional_text(field, value)?,
        "total_mass" => params.total_mass = optional_number(field, value)?,
        "distance" => params.distance = optional_number(field, value)?,
        "spin1" => params.spin1 = spin(field, value)?,
        "spin2" => params.spin2 = spin(field, value)?,
        "eccentricity" => params.eccentricity = number(field, value)?,
        "inclination" => params.inclination = number(field, value)?,
        "coa_phase" => params.coa_phase = number(field, value)?,
        "f_lower" => params.f_lower = optional_number(field, value)?,
        "f_ref" => params.f_ref = optional_number(field, value)?,
        "modes" => params.modes = modes(value)?,
        "dimensionless" => params.dimensionless = flag(field, value)?,
        "aligned_to_peak" => params.aligned_to_peak = flag(field, value)?,
        _ => {}
    }
    Ok(())
}

/// Maps a raw parameter bundle onto validated [`Metadata`].
///
/// Aliased keys are applied first so that an explicit canonical key always
/// wins over its aliases. `library`, `q` and `delta_t` are required.
pub fn normalize(raw: &Map<String, Value>) -> Result<Metadata, WaveError> {
    let mut params = MetadataParams::default();
    let mut aliased = Vec::new();
    let mut canonical = Vec::new();
    for (key, value) in raw {
        match canonical_key(key) {
            Some(field) if field == key.as_str() => canonical.push((field, value)),
            Some(field) => aliased.push((field, value)),
            None => debug!(key = %key, "dropping unrecognised waveform parameter"),
        }
    }

    for required in ["library", "q", "delta_t"] {
        let present = canonical
            .iter()
            .chain(aliased.iter())
            .any(|(field, _)| *field == required);
        if !present {
            return Err(WaveError::Validation(
                ErrorInfo::new("missing-parameter", "required metadata field is missing")
                    .with_context("field", required),
            ));
        }
    }

    for (field, value) in aliased.into_iter().chain(canonical) {
        apply(&mut params, field, value)?;
    }
    Metadata::new(params)
}
