#![deny(missing_docs)]
#![doc = "Shared error taxonomy, mode indices and provenance records for multi-mode gravitational-wave signals."]

pub mod errors;
/// Stable hashing helpers for reports and sampled series.
pub mod hash;
pub mod mode;
pub mod provenance;
/// Canonical JSON serde helpers.
pub mod serde;

pub use errors::{ErrorInfo, WaveError};
pub use hash::{series_hash, stable_hash_string};
pub use mode::Mode;
pub use provenance::{RunProvenance, SchemaVersion};
pub use serde::{from_json_slice, to_canonical_json_bytes};
