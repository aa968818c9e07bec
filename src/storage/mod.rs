//! Key-value persistence port.
//!
//! Every persisted value is a serialized JSON document stored under a fixed key.
//! Two scopes exist: durable storage survives restarts, session storage lives
//! only as long as the process.

mod memory;
mod sqlite;

pub use memory::*;
pub use sqlite::*;

use async_trait::async_trait;

use crate::errors::AppError;

/// Durable storage keys, one per content kind.
pub mod keys {
    pub const SLIDES: &str = "shingwang_carousel";
    pub const GALLERY: &str = "shingwang_gallery";
    pub const MEMBERS: &str = "shingwang_members";
    pub const EVENTS: &str = "shingwang_choir_events";
    pub const INTRO: &str = "shingwang_intro";
    pub const COMPANION_FEEDBACK: &str = "ai_companion_feedback";

    /// Session-scoped marker for the admin gate.
    pub const ADMIN_SESSION: &str = "shingwang_admin";
}

/// Lifetime of the values held by a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageScope {
    /// Cleared when the process (browser session) ends.
    Session,
    /// Survives restarts.
    Durable,
}

/// String-keyed storage of serialized values.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// The scope this store provides.
    fn scope(&self) -> StorageScope;

    /// Read the raw value under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Write `value` under `key`, replacing whatever was there.
    async fn set(&self, key: &str, value: &str) -> Result<(), AppError>;

    /// Delete `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), AppError>;

    /// Counter bumped on every write; used for change detection by clients.
    async fn revision(&self) -> Result<i64, AppError>;
}

/// Fail unless `store` provides `expected` scope.
pub fn require_scope(store: &dyn KeyValueStore, expected: StorageScope) -> Result<(), AppError> {
    if store.scope() == expected {
        Ok(())
    } else {
        Err(AppError::Internal(format!(
            "Expected {:?} storage, got {:?}",
            expected,
            store.scope()
        )))
    }
}
