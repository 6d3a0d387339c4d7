//! Snapshot: save/load the record store to/from a directory.

use crate::error::{Result, VectorDbError};
use crate::persistence::serialization::{self, StoreSnapshot};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Manages saving and loading store snapshots.
pub struct SnapshotManager {
    dir: PathBuf,
}

impl SnapshotManager {
    /// Create a snapshot manager for the given directory.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn snapshot_path(&self) -> PathBuf {
        self.dir.join("snapshot.json")
    }

    fn manifest_path(&self) -> PathBuf {
        self.dir.join("manifest.json")
    }

    /// Save a snapshot, plus a small human-readable manifest.
    pub fn save(&self, snapshot: &StoreSnapshot) -> Result<()> {
        let data = serialization::to_json(snapshot)?;
        fs::write(self.snapshot_path(), &data)?;

        let manifest = serde_json::json!({
            "format_version": snapshot.format_version,
            "record_count": snapshot.records.len(),
            "dimensions": snapshot.dimensions(),
        });
        let manifest_bytes = serde_json::to_vec_pretty(&manifest)
            .map_err(|e| VectorDbError::SerializationError(e.to_string()))?;
        fs::write(self.manifest_path(), &manifest_bytes)?;

        info!(
            records = snapshot.records.len(),
            dir = %self.dir.display(),
            "snapshot saved"
        );
        Ok(())
    }

    /// Load a snapshot from disk, or return None if no snapshot exists.
    pub fn load(&self) -> Result<Option<StoreSnapshot>> {
        let path = self.snapshot_path();
        if !path.exists() {
            return Ok(None);
        }

        let data = fs::read(&path)?;
        let snapshot: StoreSnapshot = serialization::from_json(&data)?;
        Ok(Some(snapshot))
    }

    /// Check if a snapshot exists.
    pub fn exists(&self) -> bool {
        self.snapshot_path().exists()
    }
}
