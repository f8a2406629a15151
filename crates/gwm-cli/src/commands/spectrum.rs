use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use gwm_match::frequency_series;
use gwm_wave::Waveform;

use super::ensure_parent;

#[derive(Args, Debug)]
pub struct SpectrumArgs {
    /// Waveform file.
    #[arg(long)]
    pub input: PathBuf,
    /// Destination CSV.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &SpectrumArgs) -> Result<(), Box<dyn Error>> {
    let waveform = Waveform::load(&args.input)?;
    let series = frequency_series(&waveform)?;
    ensure_parent(&args.out)?;
    let mut writer = csv::Writer::from_path(&args.out)?;
    writer.write_record(["frequency", "real", "imag", "magnitude"])?;
    for (frequency, bin) in series.sample_frequencies().into_iter().zip(&series.data) {
        writer.write_record([
            frequency.to_string(),
            bin.re.to_string(),
            bin.im.to_string(),
            bin.norm().to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
