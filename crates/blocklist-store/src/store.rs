//! Durable blocklist keyed by correspondent id.

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

/// Data version for schema migrations.
const DATA_VERSION: u32 = 1;

/// Persistent snapshot of the blocklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BlocklistData {
    /// Schema version for migrations.
    version: u32,
    /// Blocked correspondent ids.
    blocked: HashSet<u64>,
}

impl Default for BlocklistData {
    fn default() -> Self {
        Self {
            version: DATA_VERSION,
            blocked: HashSet::new(),
        }
    }
}

/// Durable blocklist store.
///
/// The full set is kept in memory behind an `RwLock` and snapshotted to a
/// JSON file on every mutation, before the mutation returns. Writes go
/// through a temp file and rename so a crash never leaves a torn snapshot,
/// and the write lock is held across the snapshot so mutations serialize.
#[derive(Clone)]
pub struct BlocklistStore {
    data: Arc<RwLock<BlocklistData>>,
    storage_path: PathBuf,
}

impl BlocklistStore {
    /// Open a store, loading the existing snapshot if one is present.
    ///
    /// A missing file is not an error; the store starts empty and the file
    /// is created on the first block.
    pub async fn open(storage_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let storage_path = storage_path.into();

        let data = if storage_path.exists() {
            let bytes = fs::read(&storage_path).await?;
            let data: BlocklistData = serde_json::from_slice(&bytes)?;
            info!(
                "Loaded blocklist: {} blocked ids from {:?}",
                data.blocked.len(),
                storage_path
            );
            data
        } else {
            info!(
                "Blocklist not found at {:?}, starting empty",
                storage_path
            );
            BlocklistData::default()
        };

        Ok(Self {
            data: Arc::new(RwLock::new(data)),
            storage_path,
        })
    }

    /// Check whether a correspondent is blocked.
    pub async fn is_blocked(&self, id: u64) -> bool {
        self.data.read().await.blocked.contains(&id)
    }

    /// Block a correspondent. Idempotent; durable before returning.
    #[instrument(skip(self))]
    pub async fn block(&self, id: u64) -> Result<(), StoreError> {
        let mut data = self.data.write().await;
        if data.blocked.insert(id) {
            debug!("Blocked {}", id);
        }
        self.persist(&data).await
    }

    /// Unblock a correspondent. A no-op for ids that were never blocked.
    #[instrument(skip(self))]
    pub async fn unblock(&self, id: u64) -> Result<(), StoreError> {
        let mut data = self.data.write().await;
        if data.blocked.remove(&id) {
            debug!("Unblocked {}", id);
        }
        self.persist(&data).await
    }

    /// Number of blocked correspondents.
    pub async fn count(&self) -> usize {
        self.data.read().await.blocked.len()
    }

    /// Write the snapshot atomically. Called with the write lock held.
    async fn persist(&self, data: &BlocklistData) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(data)?;

        if let Some(parent) = self.storage_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let temp_path = self.storage_path.with_extension("tmp");
        fs::write(&temp_path, &bytes).await?;
        fs::rename(&temp_path, &self.storage_path).await?;

        debug!(
            "Saved blocklist ({} bytes) to {:?}",
            bytes.len(),
            self.storage_path
        );

        Ok(())
    }
}
