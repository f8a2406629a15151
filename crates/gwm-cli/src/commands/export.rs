use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use gwm_wave::series::{amplitude, angular_frequency, phase};
use gwm_wave::Waveform;

use super::{ensure_parent, parse_mode};

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Waveform file.
    #[arg(long)]
    pub input: PathBuf,
    /// Destination CSV.
    #[arg(long)]
    pub out: PathBuf,
    /// Mode to export as `l,m`; negative orders are derived.
    #[arg(long, default_value = "2,2", allow_hyphen_values = true)]
    pub mode: String,
}

pub fn run(args: &ExportArgs) -> Result<(), Box<dyn Error>> {
    let waveform = Waveform::load(&args.input)?;
    let mode = parse_mode(&args.mode)?;
    let strain = waveform.mode(mode)?;
    let amps = amplitude(&strain);
    let phases = phase(&strain);
    let omega = angular_frequency(&strain, waveform.time());

    ensure_parent(&args.out)?;
    let mut writer = csv::Writer::from_path(&args.out)?;
    writer.write_record([
        "time",
        "real",
        "imag",
        "amplitude",
        "phase",
        "angular_frequency",
    ])?;
    for (idx, h) in strain.iter().enumerate() {
        writer.write_record([
            waveform.time()[idx].to_string(),
            h.re.to_string(),
            h.im.to_string(),
            amps[idx].to_string(),
            phases[idx].to_string(),
            omega[idx].to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
