use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use gwm_wave::Waveform;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Waveform file (`.json` or `.bin`).
    #[arg(long)]
    pub input: PathBuf,
    /// Emit the summary as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ModeSummary {
    mode: String,
    samples: usize,
    peak_amplitude: f64,
    peak_time: f64,
}

#[derive(Debug, Serialize)]
struct Summary {
    metadata: serde_json::Map<String, serde_json::Value>,
    content_hash: String,
    duration: f64,
    modes: Vec<ModeSummary>,
}

pub fn run(args: &InspectArgs) -> Result<(), Box<dyn Error>> {
    let waveform = Waveform::load(&args.input)?;
    let mut modes = Vec::new();
    for &mode in waveform.metadata().modes() {
        let peak = waveform.peak_index(mode)?;
        modes.push(ModeSummary {
            mode: mode.to_string(),
            samples: waveform.len(),
            peak_amplitude: waveform.amplitude(mode)?[peak],
            peak_time: waveform.time()[peak],
        });
    }

    if args.json {
        let summary = Summary {
            metadata: waveform.metadata().to_record(),
            content_hash: waveform.content_hash()?,
            duration: waveform.duration(),
            modes,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", waveform.metadata());
    println!("content_hash: {}", waveform.content_hash()?);
    println!("duration: {}", waveform.duration());
    for entry in modes {
        println!(
            "{}  samples={}  peak_amplitude={:.6e}  peak_time={}",
            entry.mode, entry.samples, entry.peak_amplitude, entry.peak_time
        );
    }
    Ok(())
}
