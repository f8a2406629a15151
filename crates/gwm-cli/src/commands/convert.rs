use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use gwm_wave::{DimensionalParams, Waveform};
use serde::Deserialize;
use tracing::info;

use super::ensure_parent;

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Geometric-unit waveform file.
    #[arg(long)]
    pub input: PathBuf,
    /// Destination for the SI-unit waveform.
    #[arg(long)]
    pub out: PathBuf,
    /// YAML file with f_lower, total_mass, distance, inclination, coa_phase.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Lower frequency bound in hertz.
    #[arg(long)]
    pub f_lower: Option<f64>,
    /// Total mass in solar masses.
    #[arg(long)]
    pub total_mass: Option<f64>,
    /// Luminosity distance in megaparsecs.
    #[arg(long)]
    pub distance: Option<f64>,
    /// Inclination in radians.
    #[arg(long)]
    pub inclination: Option<f64>,
    /// Coalescence phase in radians.
    #[arg(long)]
    pub coa_phase: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct ConvertFile {
    f_lower: Option<f64>,
    total_mass: Option<f64>,
    distance: Option<f64>,
    inclination: Option<f64>,
    coa_phase: Option<f64>,
}

fn resolve(args: &ConvertArgs) -> Result<DimensionalParams, Box<dyn Error>> {
    let file: ConvertFile = match &args.config {
        Some(path) => serde_yaml::from_str(&fs::read_to_string(path)?)?,
        None => ConvertFile::default(),
    };
    let pick = |flag: Option<f64>, value: Option<f64>, name: &str| {
        flag.or(value)
            .ok_or_else(|| format!("--{name} is required (flag or config file)"))
    };
    Ok(DimensionalParams {
        f_lower: pick(args.f_lower, file.f_lower, "f-lower")?,
        total_mass: pick(args.total_mass, file.total_mass, "total-mass")?,
        distance: pick(args.distance, file.distance, "distance")?,
        inclination: args.inclination.or(file.inclination).unwrap_or(0.0),
        coa_phase: args.coa_phase.or(file.coa_phase).unwrap_or(0.0),
    })
}

pub fn run(args: &ConvertArgs) -> Result<(), Box<dyn Error>> {
    let dims = resolve(args)?;
    let waveform = Waveform::load(&args.input)?;
    let converted = waveform.to_dimensional(&dims)?;
    ensure_parent(&args.out)?;
    converted.save(&args.out)?;
    info!(out = %args.out.display(), samples = converted.len(), "wrote converted waveform");
    Ok(())
}
