//! Admin session gate.
//!
//! Holds the single shared "may edit content" flag. The flag is mirrored into a
//! session-scoped store so it is restored for the rest of the session and lost
//! when the session ends.
//!
//! This is a presentation-level gate around a shared secret. It does not
//! authenticate anyone and gives no real protection to the content.

use std::sync::Arc;

use subtle::ConstantTimeEq;
use tokio::sync::watch;

use crate::errors::AppError;
use crate::storage::{keys, require_scope, KeyValueStore, StorageScope};

/// Value written under the session key while the gate is open.
pub const SESSION_SENTINEL: &str = "true";

/// Shared authorization flag for content editors.
pub struct AdminGate {
    secret: String,
    store: Arc<dyn KeyValueStore>,
    authorized: watch::Sender<bool>,
}

impl AdminGate {
    /// Build the gate, restoring the flag from the session marker.
    ///
    /// `store` must be session-scoped.
    pub async fn open(
        secret: impl Into<String>,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, AppError> {
        require_scope(store.as_ref(), StorageScope::Session)?;

        let restored = store.get(keys::ADMIN_SESSION).await?.as_deref() == Some(SESSION_SENTINEL);
        if restored {
            tracing::info!("Admin session restored from session storage");
        }

        let (authorized, _) = watch::channel(restored);
        Ok(Self {
            secret: secret.into(),
            store,
            authorized,
        })
    }

    /// Current value of the flag.
    pub fn is_authorized(&self) -> bool {
        *self.authorized.borrow()
    }

    /// Receiver notified every time the flag flips.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.authorized.subscribe()
    }

    /// Compare `candidate` against the secret and open the gate on a match.
    ///
    /// A mismatch leaves every piece of state untouched. There is no lockout;
    /// callers may retry as often as they like.
    pub async fn login(&self, candidate: &str) -> Result<bool, AppError> {
        if !constant_time_compare(candidate, &self.secret) {
            tracing::info!("Admin login rejected");
            return Ok(false);
        }

        self.store
            .set(keys::ADMIN_SESSION, SESSION_SENTINEL)
            .await?;
        self.set_flag(true);
        tracing::info!("Admin login accepted");
        Ok(true)
    }

    /// Close the gate and drop the session marker.
    pub async fn logout(&self) -> Result<(), AppError> {
        self.store.remove(keys::ADMIN_SESSION).await?;
        self.set_flag(false);
        tracing::info!("Admin logged out");
        Ok(())
    }

    fn set_flag(&self, value: bool) {
        self.authorized.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        });
    }
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
