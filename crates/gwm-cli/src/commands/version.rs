use std::error::Error;
use std::process::Command;

use clap::Args;
use gwm_core::to_canonical_json_bytes;
use gwm_match::PsdKind;
use gwm_wave::SyntheticModel;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Emit extended metadata including toolchain, noise curves and approximants.
    #[arg(long)]
    pub long: bool,
}

#[derive(Debug, Serialize)]
struct VersionInfo {
    version: String,
    rustc: String,
    psds: Vec<String>,
    approximants: Vec<String>,
}

pub fn run(args: &VersionArgs) -> Result<(), Box<dyn Error>> {
    if !args.long {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    let json = to_canonical_json_bytes(&gather_info())?;
    println!("{}", String::from_utf8(json)?);
    Ok(())
}

fn gather_info() -> VersionInfo {
    let rustc = Command::new("rustc")
        .arg("--version")
        .output()
        .ok()
        .filter(|out| out.status.success())
        .map(|out| String::from_utf8_lossy(&out.stdout).trim().to_string())
        .unwrap_or_else(|| "rustc unavailable".into());
    VersionInfo {
        version: env!("CARGO_PKG_VERSION").into(),
        rustc,
        psds: [PsdKind::Flat, PsdKind::AdvancedLigoAnalytic]
            .iter()
            .map(|kind| kind.as_str().to_string())
            .collect(),
        approximants: SyntheticModel::approximants()
            .into_iter()
            .map(String::from)
            .collect(),
    }
}
