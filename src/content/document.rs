//! Single editable document with a built-in default.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::storage::{require_scope, KeyValueStore, StorageScope};

/// A value stored whole under one key.
pub trait Document: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const STORAGE_KEY: &'static str;

    /// Value shown when nothing usable is persisted.
    fn seed() -> Self;
}

/// Persisted single-document store.
pub struct DocumentStore<T: Document> {
    kv: Arc<dyn KeyValueStore>,
    current: RwLock<T>,
}

impl<T: Document> DocumentStore<T> {
    pub async fn open(kv: Arc<dyn KeyValueStore>) -> Result<Self, AppError> {
        require_scope(kv.as_ref(), StorageScope::Durable)?;

        let current = match kv.get(T::STORAGE_KEY).await? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::debug!(key = T::STORAGE_KEY, "Unparsable document, using seed: {}", e);
                T::seed()
            }),
            None => T::seed(),
        };

        Ok(Self {
            kv,
            current: RwLock::new(current),
        })
    }

    pub async fn get(&self) -> T {
        self.current.read().await.clone()
    }

    /// Replace the document and persist it.
    pub async fn replace(&self, value: T) -> Result<T, AppError> {
        let mut current = self.current.write().await;
        let raw = serde_json::to_string(&value)?;
        self.kv.set(T::STORAGE_KEY, &raw).await?;
        *current = value.clone();
        tracing::info!(key = T::STORAGE_KEY, "Replaced document");
        Ok(value)
    }
}
