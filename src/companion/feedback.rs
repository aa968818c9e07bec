//! Visitor feedback on companion replies.
//!
//! Kept as one JSON array under a durable key, trimmed to the newest entries.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::errors::AppError;
use crate::storage::{keys, require_scope, KeyValueStore, StorageScope};

/// Oldest entries are dropped past this many.
pub const FEEDBACK_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedbackKind {
    Rating { rating: Rating },
    VoiceNote { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// What the visitor originally asked
    pub original_input: String,
    #[serde(flatten)]
    pub kind: FeedbackKind,
}

/// Append-only feedback history with a size cap.
pub struct FeedbackLog {
    kv: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl FeedbackLog {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Result<Self, AppError> {
        require_scope(kv.as_ref(), StorageScope::Durable)?;
        Ok(Self {
            kv,
            write_lock: Mutex::new(()),
        })
    }

    /// Stored entries, oldest first. An unreadable log reads as empty.
    pub async fn entries(&self) -> Result<Vec<FeedbackEntry>, AppError> {
        Ok(self.stored().await?.unwrap_or_default())
    }

    /// Parsed log, or `None` when what is stored cannot be read.
    async fn stored(&self) -> Result<Option<Vec<FeedbackEntry>>, AppError> {
        let Some(raw) = self.kv.get(keys::COMPANION_FEEDBACK).await? else {
            return Ok(Some(Vec::new()));
        };
        Ok(serde_json::from_str(&raw)
            .map_err(|e| tracing::warn!("Unreadable feedback log: {}", e))
            .ok())
    }

    /// Record feedback. Yields `None` when nothing was written: blank voice
    /// notes are ignored, and an unreadable stored log is left as it is.
    pub async fn record(
        &self,
        original_input: &str,
        kind: FeedbackKind,
    ) -> Result<Option<FeedbackEntry>, AppError> {
        let kind = match kind {
            FeedbackKind::VoiceNote { text } if text.trim().is_empty() => return Ok(None),
            FeedbackKind::VoiceNote { text } => FeedbackKind::VoiceNote {
                text: text.trim().to_string(),
            },
            rating => rating,
        };

        let entry = FeedbackEntry {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            original_input: original_input.to_string(),
            kind,
        };

        let _guard = self.write_lock.lock().await;
        let Some(mut history) = self.stored().await? else {
            return Ok(None);
        };
        history.push(entry.clone());
        if history.len() > FEEDBACK_LIMIT {
            let excess = history.len() - FEEDBACK_LIMIT;
            history.drain(..excess);
        }

        let raw = serde_json::to_string(&history)?;
        self.kv.set(keys::COMPANION_FEEDBACK, &raw).await?;
        tracing::debug!(entries = history.len(), "Recorded companion feedback");

        Ok(Some(entry))
    }
}
