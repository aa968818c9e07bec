//! Local content store.
//!
//! One generic store per content kind (slides, gallery photos, members,
//! events). A store owns the in-memory collection, loads it once from durable
//! storage on open, and writes the full collection back after every mutation.

mod carousel;
mod document;

pub use carousel::*;
pub use document::*;

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::errors::AppError;
use crate::storage::{require_scope, KeyValueStore, StorageScope};

/// An entity kept in a content collection.
pub trait ContentItem: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Durable storage key holding the serialized collection.
    const STORAGE_KEY: &'static str;

    fn id(&self) -> i64;

    fn set_id(&mut self, id: i64);

    /// Collection shown when nothing usable is persisted. Never empty.
    fn seed() -> Vec<Self>;

    /// Normalize derived fields before the item enters the collection.
    fn prepare(&mut self) {}

    /// Restore the collection's standing order after an add or update.
    fn arrange(_items: &mut Vec<Self>) {}
}

/// What saving an empty collection does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyPolicy {
    /// Skip the write; storage keeps the last non-empty snapshot, so the next
    /// load shows that snapshot again (or the seed if there never was one).
    RetainSnapshot,
    /// Write the empty collection; it stays empty across restarts.
    PersistEmpty,
}

impl EmptyPolicy {
    pub fn from_flag(persist_empty: bool) -> Self {
        if persist_empty {
            EmptyPolicy::PersistEmpty
        } else {
            EmptyPolicy::RetainSnapshot
        }
    }
}

/// A fresh id: the current time in milliseconds, bumped past every id already
/// in `items` so two adds in the same millisecond still differ.
///
/// When the largest id is `i64::MAX`, the first positive id not in use wins.
pub fn fresh_id<T: ContentItem>(items: &[T]) -> i64 {
    let now = Utc::now().timestamp_millis().max(1);
    let max = items.iter().map(|i| i.id()).max().unwrap_or(0);

    match max.checked_add(1) {
        Some(next) => now.max(next),
        None => (now..i64::MAX)
            .chain(1..now)
            .find(|id| !items.iter().any(|i| i.id() == *id))
            .unwrap_or(now),
    }
}

/// Persisted, editable collection of one content kind.
pub struct ContentStore<T: ContentItem> {
    kv: Arc<dyn KeyValueStore>,
    policy: EmptyPolicy,
    items: Mutex<Vec<T>>,
}

impl<T: ContentItem> ContentStore<T> {
    /// Open the store over durable storage and load its collection.
    pub async fn open(kv: Arc<dyn KeyValueStore>, policy: EmptyPolicy) -> Result<Self, AppError> {
        require_scope(kv.as_ref(), StorageScope::Durable)?;
        let items = Self::load(kv.as_ref(), policy).await?;
        tracing::debug!(key = T::STORAGE_KEY, count = items.len(), "Loaded content");

        Ok(Self {
            kv,
            policy,
            items: Mutex::new(items),
        })
    }

    /// Read the persisted collection.
    ///
    /// A missing key or an unparsable value yields the seed collection. A
    /// persisted empty collection is honored only under
    /// [`EmptyPolicy::PersistEmpty`].
    pub async fn load(kv: &dyn KeyValueStore, policy: EmptyPolicy) -> Result<Vec<T>, AppError> {
        let Some(raw) = kv.get(T::STORAGE_KEY).await? else {
            return Ok(T::seed());
        };

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(items) if items.is_empty() && policy == EmptyPolicy::RetainSnapshot => Ok(T::seed()),
            Ok(items) => Ok(items),
            Err(e) => {
                tracing::debug!(key = T::STORAGE_KEY, "Unparsable content, using seed: {}", e);
                Ok(T::seed())
            }
        }
    }

    /// Serialize and persist `items`, subject to the empty-collection policy.
    pub async fn save(&self, items: &[T]) -> Result<(), AppError> {
        if items.is_empty() && self.policy == EmptyPolicy::RetainSnapshot {
            tracing::debug!(key = T::STORAGE_KEY, "Skipping save of empty collection");
            return Ok(());
        }
        let raw = serde_json::to_string(items)?;
        self.kv.set(T::STORAGE_KEY, &raw).await
    }

    /// Current collection.
    pub async fn list(&self) -> Vec<T> {
        self.items.lock().await.clone()
    }

    pub async fn get(&self, id: i64) -> Option<T> {
        self.items.lock().await.iter().find(|i| i.id() == id).cloned()
    }

    pub async fn contains(&self, id: i64) -> bool {
        self.items.lock().await.iter().any(|i| i.id() == id)
    }

    /// Append `item`, giving it a fresh id when it has none (id `0`) or when
    /// its id is already taken. Returns the stored item and the new collection.
    pub async fn add(&self, mut item: T) -> Result<(T, Vec<T>), AppError> {
        let mut items = self.items.lock().await;

        if item.id() == 0 || items.iter().any(|i| i.id() == item.id()) {
            item.set_id(fresh_id(items.as_slice()));
        }
        item.prepare();

        let mut next = items.clone();
        next.push(item.clone());
        T::arrange(&mut next);

        self.save(&next).await?;
        *items = next.clone();
        tracing::info!(key = T::STORAGE_KEY, id = item.id(), "Added item");
        Ok((item, next))
    }

    /// Replace the item whose id is `id`. Unknown ids leave the collection
    /// untouched and nothing is written.
    pub async fn update(&self, id: i64, mut item: T) -> Result<Vec<T>, AppError> {
        let mut items = self.items.lock().await;

        let Some(index) = items.iter().position(|i| i.id() == id) else {
            tracing::debug!(key = T::STORAGE_KEY, id, "Update of unknown id ignored");
            return Ok(items.clone());
        };

        item.set_id(id);
        item.prepare();

        let mut next = items.clone();
        next[index] = item;
        T::arrange(&mut next);

        self.save(&next).await?;
        *items = next.clone();
        tracing::info!(key = T::STORAGE_KEY, id, "Updated item");
        Ok(next)
    }

    /// Drop the item whose id is `id`. Callers confirm with the user first.
    ///
    /// Removing an absent id is a no-op.
    pub async fn remove(&self, id: i64) -> Result<Vec<T>, AppError> {
        let mut items = self.items.lock().await;

        let next: Vec<T> = items.iter().filter(|i| i.id() != id).cloned().collect();
        if next.len() == items.len() {
            return Ok(next);
        }

        self.save(&next).await?;
        *items = next.clone();
        tracing::info!(key = T::STORAGE_KEY, id, remaining = next.len(), "Removed item");
        Ok(next)
    }

    /// Sort the items matching `predicate` with `comparator` and move them,
    /// sorted, after all other items. The others keep their relative order.
    pub async fn reorder<P, C>(&self, predicate: P, comparator: C) -> Result<Vec<T>, AppError>
    where
        P: Fn(&T) -> bool,
        C: FnMut(&T, &T) -> Ordering,
    {
        let mut items = self.items.lock().await;

        let (mut matching, mut next): (Vec<T>, Vec<T>) =
            items.iter().cloned().partition(|i| predicate(i));
        matching.sort_by(comparator);
        next.extend(matching);

        self.save(&next).await?;
        *items = next.clone();
        tracing::info!(key = T::STORAGE_KEY, "Reordered items");
        Ok(next)
    }
}
