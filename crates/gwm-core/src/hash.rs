use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::errors::WaveError;
use crate::serde::to_canonical_json_bytes;

/// Computes a stable hexadecimal hash for the provided serialisable payload.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, WaveError> {
    let bytes = to_canonical_json_bytes(value)?;
    Ok(hex::encode(Sha256::digest(bytes)))
}

/// Hashes a sampled series by its exact bit patterns.
///
/// JSON float formatting is not relied upon, so two series hash equal only when
/// every sample is bit-identical.
pub fn series_hash<'a>(series: impl IntoIterator<Item = &'a f64>) -> String {
    let mut hasher = Sha256::new();
    let mut count: u64 = 0;
    for value in series {
        hasher.update(value.to_bits().to_le_bytes());
        count += 1;
    }
    hasher.update(count.to_le_bytes());
    hex::encode(hasher.finalize())
}
