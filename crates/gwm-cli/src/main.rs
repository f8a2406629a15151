use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    convert::{self, ConvertArgs},
    export::{self, ExportArgs},
    inspect::{self, InspectArgs},
    matching::{self, MatchArgs},
    spectrum::{self, SpectrumArgs},
    synth::{self, SynthArgs},
    version::{self, VersionArgs},
};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "gwm", about = "Multi-mode gravitational-wave waveform toolkit")]
struct Cli {
    /// Log at debug level regardless of RUST_LOG.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print metadata and a per-mode summary of a waveform file.
    Inspect(InspectArgs),
    /// Convert a geometric waveform to SI units and crop it to band.
    Convert(ConvertArgs),
    /// Compute the noise-weighted match between two waveforms.
    Match(MatchArgs),
    /// Write the one-sided spectrum of the recombined strain as CSV.
    Spectrum(SpectrumArgs),
    /// Write the time series of one mode as CSV.
    Export(ExportArgs),
    /// Generate an analytic waveform through the model interface.
    Synth(SynthArgs),
    /// Print version information.
    Version(VersionArgs),
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Command::Inspect(args) => inspect::run(&args),
        Command::Convert(args) => convert::run(&args),
        Command::Match(args) => matching::run(&args),
        Command::Spectrum(args) => spectrum::run(&args),
        Command::Export(args) => export::run(&args),
        Command::Synth(args) => synth::run(&args),
        Command::Version(args) => version::run(&args),
    }
}
