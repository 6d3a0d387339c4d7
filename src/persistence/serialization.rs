//! Serialization utilities: JSON for snapshots and manifests.

use crate::error::{Result, VectorDbError};
use crate::storage::Record;
use serde::{Deserialize, Serialize};

/// Current snapshot layout version.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Serializable representation of the full store, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub format_version: u32,
    pub records: Vec<Record>,
}

impl StoreSnapshot {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            format_version: SNAPSHOT_FORMAT_VERSION,
            records,
        }
    }

    /// Distinct embedding dimensions present, ascending.
    pub fn dimensions(&self) -> Vec<usize> {
        let mut dims: Vec<usize> = self
            .records
            .iter()
            .map(|r| r.embedding.dimension())
            .collect();
        dims.sort_unstable();
        dims.dedup();
        dims
    }

    /// Unwrap the records, checking the layout version first.
    pub fn into_records(self) -> Result<Vec<Record>> {
        if self.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(VectorDbError::SerializationError(format!(
                "unsupported snapshot format version {}",
                self.format_version
            )));
        }
        Ok(self.records)
    }
}

/// Encode data to JSON bytes.
pub fn to_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| VectorDbError::SerializationError(e.to_string()))
}

/// Decode data from JSON bytes.
pub fn from_json<'a, T: Deserialize<'a>>(bytes: &'a [u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| VectorDbError::SerializationError(e.to_string()))
}
