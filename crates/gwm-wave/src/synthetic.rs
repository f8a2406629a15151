//! Analytic test signals exposed through the model-evaluator interface.
//!
//! These are generators for exercising the pipeline, not physical models: the
//! chirp is the leading-order quadrupole inspiral truncated at the innermost
//! stable circular orbit, with no merger or ringdown.

use std::f64::consts::PI;

use gwm_core::{ErrorInfo, Mode, WaveError};
use num_complex::Complex64;

use crate::sources::{ModeSeries, ModelEvaluator, ModelRequest};
use crate::units::{strain_scale, C_SI, MTSUN_SI, PC_SI};

/// Approximant producing fixed-frequency, fixed-amplitude modes.
pub const CONSTANT_FREQUENCY: &str = "constant-frequency";
/// Approximant producing a leading-order inspiral chirp in the `(2,2)` mode.
pub const NEWTONIAN_CHIRP: &str = "newtonian-chirp";

const DEFAULT_DURATION: f64 = 1.0;
const GEOMETRIC_AMPLITUDE: f64 = 0.1;

/// Built-in evaluator for the analytic approximants.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticModel;

impl SyntheticModel {
    /// Approximant names understood by this evaluator.
    pub fn approximants() -> [&'static str; 2] {
        [CONSTANT_FREQUENCY, NEWTONIAN_CHIRP]
    }
}

fn extra_number(request: &ModelRequest, key: &str, default: f64) -> Result<f64, WaveError> {
    match request.extra.get(key) {
        None => Ok(default),
        Some(value) => value.as_f64().ok_or_else(|| {
            WaveError::Validation(
                ErrorInfo::new("invalid-parameter", format!("{key} must be a number"))
                    .with_context("field", key)
                    .with_context("value", value),
            )
        }),
    }
}

fn positive(name: &str, value: f64) -> Result<f64, WaveError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(WaveError::Validation(
            ErrorInfo::new("invalid-parameter", "must be finite and positive")
                .with_context("field", name)
                .with_context("value", value),
        ))
    }
}

/// `h_lm = A exp(-i m 2π f_orb t)` over `duration` seconds ending at zero.
///
/// The orbital frequency defaults to `f_lower`, so the dominant mode sits at
/// twice the floor.
fn constant_frequency(request: &ModelRequest) -> Result<ModeSeries, WaveError> {
    let delta_t = positive("delta_t", request.delta_t)?;
    let duration = positive("duration", extra_number(request, "duration", DEFAULT_DURATION)?)?;
    let orbital = positive(
        "orbital_frequency",
        extra_number(request, "orbital_frequency", request.f_lower)?,
    )?;
    let amplitude = GEOMETRIC_AMPLITUDE / f64::from(request.mode.l().max(1))
        * strain_scale(request.total_mass(), request.distance);
    let count = (duration / delta_t).floor() as usize;
    let omega = f64::from(request.mode.m()) * 2.0 * PI * orbital;
    let time: Vec<f64> = (0..count)
        .map(|k| k as f64 * delta_t - duration)
        .collect();
    let strain = time
        .iter()
        .map(|t| Complex64::from_polar(amplitude, -omega * t))
        .collect();
    Ok(ModeSeries { time, strain })
}

/// Leading-order quadrupole chirp from `f_lower` up to the ISCO frequency.
fn newtonian_chirp(request: &ModelRequest) -> Result<ModeSeries, WaveError> {
    if request.mode != Mode::DOMINANT {
        return Err(WaveError::ModeNotFound(
            ErrorInfo::new("mode-not-found", "newtonian-chirp only provides the (2,2) mode")
                .with_context("mode", request.mode),
        ));
    }
    let delta_t = positive("delta_t", request.delta_t)?;
    let f_lower = positive("f_lower", request.f_lower)?;
    let total_mass = request.total_mass();
    let chirp_mass = (request.mass1 * request.mass2).powf(0.6) / total_mass.powf(0.2);
    let mc = chirp_mass * MTSUN_SI;
    let f_isco = 1.0 / (6f64.powf(1.5) * PI * total_mass * MTSUN_SI);
    if f_lower >= f_isco {
        return Err(WaveError::Validation(
            ErrorInfo::new("f-lower-above-isco", "lower frequency lies above the ISCO frequency")
                .with_context("f_lower", f_lower)
                .with_context("f_isco", f_isco),
        ));
    }

    let tau_at = |f: f64| 5.0 / 256.0 * (PI * f).powf(-8.0 / 3.0) * mc.powf(-5.0 / 3.0);
    let tau_start = tau_at(f_lower);
    let tau_end = tau_at(f_isco);
    let distance_m = request.distance * 1e6 * PC_SI;

    let mut time = Vec::new();
    let mut strain = Vec::new();
    let mut k = 0usize;
    loop {
        let t = k as f64 * delta_t;
        let tau = tau_start - t;
        if tau <= tau_end {
            break;
        }
        let frequency = (5.0 / (256.0 * tau)).powf(3.0 / 8.0) * mc.powf(-5.0 / 8.0) / PI;
        let amplitude = 4.0 * mc * C_SI / distance_m * (PI * frequency * mc).powf(2.0 / 3.0);
        let orbital_phase = -2.0 * (tau / (5.0 * mc)).powf(5.0 / 8.0);
        time.push(t);
        strain.push(Complex64::from_polar(amplitude, -orbital_phase));
        k += 1;
    }
    Ok(ModeSeries { time, strain })
}

impl ModelEvaluator for SyntheticModel {
    fn library(&self) -> &str {
        "gwm-synthetic"
    }

    fn supports(&self, approximant: &str) -> bool {
        Self::approximants().contains(&approximant)
    }

    fn evaluate(&self, request: &ModelRequest) -> Result<ModeSeries, WaveError> {
        match request.approximant.as_str() {
            CONSTANT_FREQUENCY => constant_frequency(request),
            NEWTONIAN_CHIRP => newtonian_chirp(request),
            other => Err(WaveError::Configuration(
                ErrorInfo::new("unsupported-approximant", "model cannot evaluate approximant")
                    .with_context("approximant", other),
            )),
        }
    }
}
