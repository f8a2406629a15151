use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use gwm_wave::{SyntheticModel, Waveform};
use serde_json::{Map, Value};
use tracing::info;

use super::{ensure_parent, parse_mode};

#[derive(Args, Debug)]
pub struct SynthArgs {
    /// Approximant: `constant-frequency` or `newtonian-chirp`.
    #[arg(long, default_value = "constant-frequency")]
    pub approximant: String,
    /// YAML mapping with mass1, mass2, delta_t, f_lower, distance and extras.
    #[arg(long)]
    pub params: PathBuf,
    /// Modes to generate as `l,m`; repeat for several.
    #[arg(long = "mode", default_values_t = [String::from("2,2")])]
    pub modes: Vec<String>,
    /// Destination waveform file.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &SynthArgs) -> Result<(), Box<dyn Error>> {
    let text = fs::read_to_string(&args.params)?;
    let params: Map<String, Value> = serde_yaml::from_str(&text)?;
    let modes = args
        .modes
        .iter()
        .map(|text| parse_mode(text))
        .collect::<Result<Vec<_>, _>>()?;
    let waveform = Waveform::from_model(&SyntheticModel, &args.approximant, &modes, &params)?;
    ensure_parent(&args.out)?;
    waveform.save(&args.out)?;
    info!(
        approximant = %args.approximant,
        samples = waveform.len(),
        out = %args.out.display(),
        "wrote synthetic waveform"
    );
    Ok(())
}
