use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use gwm_core::to_canonical_json_bytes;
use gwm_match::{match_report, MatchConfig, PsdKind};
use gwm_wave::Waveform;

#[derive(Args, Debug)]
pub struct MatchArgs {
    /// First waveform file.
    #[arg(long)]
    pub a: PathBuf,
    /// Second waveform file.
    #[arg(long)]
    pub b: PathBuf,
    /// YAML match configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Lower frequency cutoff, overriding the configuration.
    #[arg(long)]
    pub f_lower: Option<f64>,
    /// Noise curve name (`flat` or `advanced-ligo-analytic`).
    #[arg(long)]
    pub psd: Option<String>,
    /// Output directory for `match_report.json`.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &MatchArgs) -> Result<(), Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => MatchConfig::load(path)?,
        None => MatchConfig::default(),
    };
    if let Some(f_lower) = args.f_lower {
        config.f_lower = Some(f_lower);
    }
    if let Some(name) = &args.psd {
        config.psd = name.parse::<PsdKind>()?;
    }

    let a = Waveform::load(&args.a)?;
    let b = Waveform::load(&args.b)?;
    let report = match_report(&a, &b, &config)?;

    fs::create_dir_all(&args.out)?;
    fs::write(
        args.out.join("match_report.json"),
        to_canonical_json_bytes(&report)?,
    )?;
    println!("{:.12}", report.value);
    Ok(())
}
