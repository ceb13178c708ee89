//! JSON snapshot file.

use landchain_core::{Block, Event};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// The persisted shape of a ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainSnapshot {
    /// Mined blocks, genesis first.
    pub chain: Vec<Block>,
    /// Difficulty the chain was mined at.
    pub difficulty: u32,
    /// Events that had not been mined yet.
    pub pending_transactions: Vec<Event>,
}

impl ChainSnapshot {
    /// Capture the given ledger parts.
    pub fn new(chain: &[Block], difficulty: u32, pending: &[Event]) -> Self {
        Self {
            chain: chain.to_vec(),
            difficulty,
            pending_transactions: pending.to_vec(),
        }
    }

    /// Number of blocks in the snapshot.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Check if the snapshot holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}

/// A snapshot file on disk.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Create a store writing to `path`. Nothing is touched until `save`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the snapshot, replacing any previous one.
    ///
    /// The document is written to a sibling temp file first and then renamed
    /// so a crash never leaves a half-written snapshot behind.
    pub fn save(&self, snapshot: &ChainSnapshot) -> Result<()> {
        let encoded = serde_json::to_vec_pretty(snapshot)?;
        let tmp = self.path.with_extension("json.tmp");

        fs::write(&tmp, encoded).map_err(|source| StorageError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), blocks = snapshot.len(), "snapshot saved");
        Ok(())
    }

    /// Read the snapshot if the file exists.
    pub fn load(&self) -> Result<Option<ChainSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use landchain_core::Details;
    use tempfile::tempdir;

    fn sample_snapshot() -> ChainSnapshot {
        let genesis = Block::genesis(Utc::now()).unwrap();
        let event = Event::register("SYSTEM", "123 Main St", "LAND001", Details::new());
        let mut block = Block::new(1, vec![event], Utc::now(), genesis.digest.clone()).unwrap();
        block.mine(1).unwrap();
        ChainSnapshot::new(&[genesis, block], 1, &[])
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("blockchain_data.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("blockchain_data.json"));
        let snapshot = sample_snapshot();

        store.save(&snapshot).unwrap();
        let loaded = store.load().unwrap().unwrap();

        assert_eq!(loaded, snapshot);
        assert_eq!(loaded.len(), 2);
        assert!(loaded.chain[1].has_consistent_digest().unwrap());
        assert!(!dir.path().join("blockchain_data.json.tmp").exists());
    }

    #[test]
    fn test_document_shape() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blockchain_data.json");
        SnapshotStore::new(&path).save(&sample_snapshot()).unwrap();

        let doc: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc["difficulty"], 1);
        assert!(doc["pending_transactions"].as_array().unwrap().is_empty());
        assert_eq!(doc["chain"][0]["previous_hash"], "0");
        assert_eq!(doc["chain"][1]["transactions"][0]["land_id"], "LAND001");
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("missing").join("chain.json"));
        assert!(matches!(
            store.save(&sample_snapshot()),
            Err(StorageError::Io { .. })
        ));
    }

    #[test]
    fn test_corrupt_file_reports_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blockchain_data.json");
        fs::write(&path, b"{ not json").unwrap();
        assert!(matches!(
            SnapshotStore::new(&path).load(),
            Err(StorageError::Json(_))
        ));
    }
}
