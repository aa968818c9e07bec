//! In-memory key-value store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{KeyValueStore, StorageScope};
use crate::errors::AppError;

/// Key-value store held in process memory.
///
/// Nothing written here outlives the process, which is what session scope
/// means for a server.
pub struct MemoryKvStore {
    scope: StorageScope,
    entries: RwLock<HashMap<String, String>>,
    revision: AtomicI64,
}

impl MemoryKvStore {
    pub fn new(scope: StorageScope) -> Self {
        Self {
            scope,
            entries: RwLock::new(HashMap::new()),
            revision: AtomicI64::new(0),
        }
    }

    /// A session-scoped store.
    pub fn session() -> Self {
        Self::new(StorageScope::Session)
    }
}

#[async_trait]
impl KeyValueStore for MemoryKvStore {
    fn scope(&self) -> StorageScope {
        self.scope
    }

    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        self.revision.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        if self.entries.write().await.remove(key).is_some() {
            self.revision.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }

    async fn revision(&self) -> Result<i64, AppError> {
        Ok(self.revision.load(Ordering::SeqCst))
    }
}
