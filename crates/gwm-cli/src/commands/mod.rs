pub mod convert;
pub mod export;
pub mod inspect;
pub mod matching;
pub mod spectrum;
pub mod synth;
pub mod version;

use std::error::Error;
use std::fs;
use std::path::Path;

use gwm_core::Mode;

/// Parses `l,m` into a mode.
pub fn parse_mode(text: &str) -> Result<Mode, Box<dyn Error>> {
    let (l, m) = text
        .split_once(',')
        .ok_or_else(|| format!("mode '{text}' must be written as l,m"))?;
    Ok(Mode::new(l.trim().parse()?, m.trim().parse()?)?)
}

/// Creates the parent directory of `path` when it has one.
pub fn ensure_parent(path: &Path) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
