//! Store configuration

use crate::error::{Result, VectorDbError};
use serde::{Deserialize, Serialize};

/// What a search does with a record whose dimension differs from the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MismatchPolicy {
    /// Fail the whole query with a dimension mismatch error
    #[default]
    Reject,
    /// Leave the record out of the ranking
    Skip,
}

/// Configuration for a [`VectorStore`](crate::storage::VectorStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Result count used when a query passes no k, or k <= 0.
    pub default_k: usize,
    /// Accept zero-length embeddings on insert.
    pub allow_empty_embedding: bool,
    pub mismatch_policy: MismatchPolicy,
    /// Record count at which scoring moves onto the rayon pool.
    pub parallel_threshold: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_k: 5,
            allow_empty_embedding: false,
            mismatch_policy: MismatchPolicy::Reject,
            parallel_threshold: 10_000,
        }
    }
}

impl StoreConfig {
    /// Parse a JSON config fragment; absent fields keep their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        let config: StoreConfig = serde_json::from_str(s)
            .map_err(|e| VectorDbError::SerializationError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_k == 0 {
            return Err(VectorDbError::invalid("default_k must be positive"));
        }
        Ok(())
    }

    /// Resolve a caller-supplied k.
    pub fn effective_k(&self, k: Option<i64>) -> usize {
        match k {
            Some(k) if k > 0 => usize::try_from(k).unwrap_or(usize::MAX),
            _ => self.default_k,
        }
    }
}
