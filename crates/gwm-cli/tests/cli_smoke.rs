use std::error::Error;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use gwm_wave::{Metadata, MetadataParams, Mode, Waveform};
use num_complex::Complex64;
use serde_json::Value;
use tempfile::tempdir;

fn gwm(args: &[&str]) -> Result<Output, Box<dyn Error>> {
    let output = Command::new(env!("CARGO_BIN_EXE_gwm")).args(args).output()?;
    if !output.status.success() {
        return Err(format!(
            "gwm {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        )
        .into());
    }
    Ok(output)
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap_or_default()
}

fn write_params(dir: &Path) -> Result<std::path::PathBuf, Box<dyn Error>> {
    let path = dir.join("params.yaml");
    fs::write(
        &path,
        "mass1: 30.0\nmass2: 20.0\ndelta_t: 0.0009765625\nf_lower: 20.0\ndistance: 100.0\nduration: 0.5\n",
    )?;
    Ok(path)
}

fn geometric_waveform(path: &Path) -> Result<(), Box<dyn Error>> {
    let time: Vec<f64> = (0..2000).map(f64::from).collect();
    let row = time
        .iter()
        .enumerate()
        .map(|(k, t)| Complex64::from_polar(1.0 - 1e-6 * k as f64, -0.1 * t))
        .collect();
    let metadata = Metadata::new(MetadataParams {
        library: "cli-test".into(),
        q: 1.5,
        delta_t: 1.0,
        modes: vec![Mode::DOMINANT],
        dimensionless: true,
        ..MetadataParams::default()
    })?;
    Waveform::from_modes(vec![row], time, metadata)?.save(path)?;
    Ok(())
}

#[test]
fn synth_inspect_export_and_self_match() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let params = write_params(dir.path())?;
    let wave = dir.path().join("synth.json");
    gwm(&[
        "synth",
        "--params",
        path_str(&params),
        "--mode",
        "2,2",
        "--mode",
        "3,3",
        "--out",
        path_str(&wave),
    ])?;
    assert!(wave.exists());

    let inspect = gwm(&["inspect", "--input", path_str(&wave), "--json"])?;
    let summary: Value = serde_json::from_slice(&inspect.stdout)?;
    assert_eq!(summary["metadata"]["approximant"], "constant-frequency");
    assert_eq!(summary["metadata"]["dimensionless"], false);
    assert_eq!(summary["modes"].as_array().map(Vec::len), Some(2));

    let csv_path = dir.path().join("export/mode.csv");
    gwm(&[
        "export",
        "--input",
        path_str(&wave),
        "--out",
        path_str(&csv_path),
        "--mode",
        "2,-2",
    ])?;
    let text = fs::read_to_string(&csv_path)?;
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("time,real,imag,amplitude,phase,angular_frequency")
    );
    assert!(lines.count() > 100);

    let out = dir.path().join("match");
    gwm(&[
        "match",
        "--a",
        path_str(&wave),
        "--b",
        path_str(&wave),
        "--psd",
        "flat",
        "--out",
        path_str(&out),
    ])?;
    let report: Value = serde_json::from_slice(&fs::read(out.join("match_report.json"))?)?;
    let value = report["value"].as_f64().unwrap_or_default();
    assert!((value - 1.0).abs() < 1e-9, "self match was {value}");
    assert_eq!(report["psd"], "flat");
    assert_eq!(report["f_lower"], 20.0);
    Ok(())
}

#[test]
fn convert_then_spectrum() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let geometric = dir.path().join("geometric.bin");
    geometric_waveform(&geometric)?;

    let config = dir.path().join("dims.yaml");
    fs::write(&config, "f_lower: 20.0\ntotal_mass: 50.0\ndistance: 100.0\n")?;
    let converted = dir.path().join("si.json");
    gwm(&[
        "convert",
        "--input",
        path_str(&geometric),
        "--out",
        path_str(&converted),
        "--config",
        path_str(&config),
        "--inclination",
        "0.3",
    ])?;
    let waveform = Waveform::load(&converted)?;
    assert!(!waveform.metadata().dimensionless());
    assert_eq!(waveform.metadata().total_mass(), Some(50.0));
    assert_eq!(waveform.metadata().inclination(), 0.3);

    let spectrum = dir.path().join("spectrum.csv");
    gwm(&[
        "spectrum",
        "--input",
        path_str(&converted),
        "--out",
        path_str(&spectrum),
    ])?;
    let text = fs::read_to_string(&spectrum)?;
    assert_eq!(text.lines().next(), Some("frequency,real,imag,magnitude"));
    assert_eq!(text.lines().count(), 1 + waveform.len() / 2 + 1);
    Ok(())
}

#[test]
fn convert_requires_total_mass() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let geometric = dir.path().join("geometric.json");
    geometric_waveform(&geometric)?;
    let output = Command::new(env!("CARGO_BIN_EXE_gwm"))
        .args([
            "convert",
            "--input",
            path_str(&geometric),
            "--out",
            path_str(&dir.path().join("si.json")),
            "--f-lower",
            "20",
            "--distance",
            "100",
        ])
        .output()?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("total-mass"));
    Ok(())
}

#[test]
fn unknown_psd_is_rejected() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let params = write_params(dir.path())?;
    let wave = dir.path().join("synth.bin");
    gwm(&["synth", "--params", path_str(&params), "--out", path_str(&wave)])?;
    let output = Command::new(env!("CARGO_BIN_EXE_gwm"))
        .args([
            "match",
            "--a",
            path_str(&wave),
            "--b",
            path_str(&wave),
            "--psd",
            "white",
            "--out",
            path_str(dir.path()),
        ])
        .output()?;
    assert!(!output.status.success());
    Ok(())
}

#[test]
fn version_reports_package_version() -> Result<(), Box<dyn Error>> {
    let short = gwm(&["version"])?;
    assert_eq!(
        String::from_utf8(short.stdout)?.trim(),
        env!("CARGO_PKG_VERSION")
    );
    let long = gwm(&["version", "--long"])?;
    let info: Value = serde_json::from_slice(&long.stdout)?;
    assert_eq!(info["version"], env!("CARGO_PKG_VERSION"));
    assert!(info["psds"]
        .as_array()
        .is_some_and(|names| names.iter().any(|n| n == "flat")));
    Ok(())
}
