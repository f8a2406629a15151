//! Waveform interchange records in JSON and bincode.

use std::fs;
use std::path::Path;

use gwm_core::{series_hash, stable_hash_string, ErrorInfo, Mode, WaveError};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::metadata::Metadata;
use crate::waveform::Waveform;

/// One stored mode split into real and imaginary parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeRecord {
    /// Canonical mode index.
    pub mode: Mode,
    /// Real parts.
    pub re: Vec<f64>,
    /// Imaginary parts.
    pub im: Vec<f64>,
}

/// Serialized form of a [`Waveform`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveformRecord {
    /// Waveform metadata; validated again when loaded.
    pub metadata: Metadata,
    /// Time axis.
    pub time: Vec<f64>,
    /// Stored modes in metadata order.
    pub modes: Vec<ModeRecord>,
}

impl From<&Waveform> for WaveformRecord {
    fn from(waveform: &Waveform) -> Self {
        let modes = waveform
            .metadata()
            .modes()
            .iter()
            .enumerate()
            .map(|(row, &mode)| {
                let samples = waveform.row(row);
                ModeRecord {
                    mode,
                    re: samples.iter().map(|h| h.re).collect(),
                    im: samples.iter().map(|h| h.im).collect(),
                }
            })
            .collect();
        Self {
            metadata: waveform.metadata().clone(),
            time: waveform.time().to_vec(),
            modes,
        }
    }
}

impl TryFrom<WaveformRecord> for Waveform {
    type Error = WaveError;

    fn try_from(record: WaveformRecord) -> Result<Self, Self::Error> {
        let stored: Vec<Mode> = record.modes.iter().map(|entry| entry.mode).collect();
        if stored != record.metadata.modes() {
            return Err(WaveError::validation(
                "mode-order-mismatch",
                "mode entries must follow the metadata mode list",
            ));
        }
        let rows = record
            .modes
            .into_iter()
            .map(|entry| {
                if entry.re.len() != entry.im.len() {
                    return Err(WaveError::Validation(
                        ErrorInfo::new(
                            "sample-count-mismatch",
                            "real and imaginary parts differ in length",
                        )
                        .with_context("mode", entry.mode),
                    ));
                }
                Ok(entry
                    .re
                    .into_iter()
                    .zip(entry.im)
                    .map(|(re, im)| Complex64::new(re, im))
                    .collect())
            })
            .collect::<Result<Vec<Vec<Complex64>>, WaveError>>()?;
        Waveform::from_modes(rows, record.time, record.metadata)
    }
}

impl Waveform {
    /// Pretty JSON encoding.
    pub fn to_json(&self) -> Result<String, WaveError> {
        serde_json::to_string_pretty(&WaveformRecord::from(self))
            .map_err(|err| WaveError::serde("json-encode", err))
    }

    /// Decodes and re-validates a JSON record.
    pub fn from_json(text: &str) -> Result<Waveform, WaveError> {
        let record: WaveformRecord =
            serde_json::from_str(text).map_err(|err| WaveError::serde("json-decode", err))?;
        Waveform::try_from(record)
    }

    /// Compact binary encoding.
    pub fn to_bincode(&self) -> Result<Vec<u8>, WaveError> {
        bincode::serialize(&WaveformRecord::from(self))
            .map_err(|err| WaveError::serde("bincode-encode", err))
    }

    /// Decodes and re-validates a binary record.
    pub fn from_bincode(bytes: &[u8]) -> Result<Waveform, WaveError> {
        let record: WaveformRecord =
            bincode::deserialize(bytes).map_err(|err| WaveError::serde("bincode-decode", err))?;
        Waveform::try_from(record)
    }

    /// Writes the waveform, choosing bincode for `.bin` paths and JSON otherwise.
    pub fn save(&self, path: &Path) -> Result<(), WaveError> {
        let bytes = if is_binary(path) {
            self.to_bincode()?
        } else {
            self.to_json()?.into_bytes()
        };
        fs::write(path, bytes).map_err(|err| io_error("write-failed", path, err))
    }

    /// Reads a waveform written by [`Waveform::save`].
    pub fn load(path: &Path) -> Result<Waveform, WaveError> {
        let bytes = fs::read(path).map_err(|err| io_error("read-failed", path, err))?;
        if is_binary(path) {
            Waveform::from_bincode(&bytes)
        } else {
            let text =
                String::from_utf8(bytes).map_err(|err| WaveError::serde("json-decode", err))?;
            Waveform::from_json(&text)
        }
    }

    /// Stable SHA-256 of the canonical metadata plus every sample.
    pub fn content_hash(&self) -> Result<String, WaveError> {
        let mode_hashes: Vec<String> = (0..self.metadata().modes().len())
            .map(|row| {
                let interleaved: Vec<f64> =
                    self.row(row).iter().flat_map(|h| [h.re, h.im]).collect();
                series_hash(&interleaved)
            })
            .collect();
        stable_hash_string(&(self.metadata(), series_hash(self.time()), mode_hashes))
    }
}

fn is_binary(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("bin")
}

fn io_error(code: &str, path: &Path, err: std::io::Error) -> WaveError {
    WaveError::Serde(
        ErrorInfo::new(code, err.to_string()).with_context("path", path.display()),
    )
}
