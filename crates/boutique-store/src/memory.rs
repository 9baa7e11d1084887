//! In-memory [`KeyValueStore`] for tests and report previews.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::StoreResult;
use crate::store::{KeyValueStore, StorageKey};

/// Keeps blobs in a map. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<StorageKey, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Number of keys currently written.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn load(&self, key: StorageKey) -> StoreResult<Option<String>> {
        Ok(self.entries.read().await.get(&key).cloned())
    }

    async fn save(&self, key: StorageKey, json: &str) -> StoreResult<()> {
        self.entries.write().await.insert(key, json.to_string());
        Ok(())
    }

    async fn clear(&self) -> StoreResult<()> {
        self.entries.write().await.clear();
        Ok(())
    }
}
