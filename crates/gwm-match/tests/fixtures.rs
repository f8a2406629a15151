#![allow(dead_code)]

use gwm_wave::synthetic::NEWTONIAN_CHIRP;
use gwm_wave::{Mode, SyntheticModel, WaveError, Waveform};
use serde_json::{json, Value};

/// Leading-order chirp for the given component masses.
pub fn chirp(mass1: f64, mass2: f64, delta_t: f64) -> Result<Waveform, WaveError> {
    let params = json!({
        "mass1": mass1,
        "mass2": mass2,
        "delta_t": delta_t,
        "f_lower": 20.0,
        "distance": 100.0,
        "inclination": 0.4,
    });
    let Value::Object(map) = params else {
        unreachable!("fixture is an object");
    };
    Waveform::from_model(&SyntheticModel, NEWTONIAN_CHIRP, &[Mode::DOMINANT], &map)
}

/// Same samples and metadata with the time axis moved by `offset`.
pub fn shifted(waveform: &Waveform, offset: f64) -> Result<Waveform, WaveError> {
    let time = waveform.time().iter().map(|t| t + offset).collect();
    Waveform::new(waveform.strain().clone(), time, waveform.metadata().clone())
}
