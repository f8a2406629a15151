//! Provenance and schema descriptors shared across GWM artifacts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Semantic version describing the schema of serialized payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version incremented for breaking changes.
    pub major: u32,
    /// Minor version incremented for additive changes.
    pub minor: u32,
    /// Patch version incremented for bug fixes and documentation updates.
    pub patch: u32,
}

impl SchemaVersion {
    /// Creates a new schema version descriptor.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

/// Provenance information attached to every emitted report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RunProvenance {
    /// Schema of the payload carrying this provenance.
    pub schema_version: SchemaVersion,
    /// Stable hashes of the inputs, keyed by role (e.g. `a`, `b`, `config`).
    pub input_hashes: BTreeMap<String, String>,
    /// ISO-8601 timestamp recording when the artifact was generated.
    pub created_at: String,
    /// Version map for all tools involved in the run.
    pub tool_versions: BTreeMap<String, String>,
}

impl RunProvenance {
    /// Creates a provenance record stamped with the current UTC time.
    pub fn now(tool: &str, version: &str) -> Self {
        Self {
            schema_version: SchemaVersion::default(),
            input_hashes: BTreeMap::new(),
            created_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            tool_versions: [(tool.to_string(), version.to_string())]
                .into_iter()
                .collect(),
        }
    }

    /// Records the hash of a named input.
    pub fn with_input(mut self, role: impl Into<String>, hash: impl Into<String>) -> Self {
        self.input_hashes.insert(role.into(), hash.into());
        self
    }
}
