//! Contact and application form submission.
//!
//! Each form owns a small status machine (`Idle -> Submitting -> Success`,
//! or `Failed` when the port reports an error). Submissions go through a
//! [`SubmissionPort`]; the default port only waits and reports success.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::errors::AppError;
use crate::models::VoicePart;

/// Where a form currently is in its submission lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SubmissionStatus {
    Idle,
    Submitting,
    Success,
    Failed { reason: String },
}

/// Which of the two site forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormKind {
    Contact,
    Application,
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormKind::Contact => f.write_str("contact"),
            FormKind::Application => f.write_str("application"),
        }
    }
}

impl FromStr for FormKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contact" => Ok(FormKind::Contact),
            "application" => Ok(FormKind::Application),
            other => Err(AppError::NotFound(format!("Form {} not found", other))),
        }
    }
}

/// General enquiry form in the footer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Choir membership application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationForm {
    pub name: String,
    pub phone: String,
    pub part: VoicePart,
    pub experience: String,
}

/// A validated submission for either form.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum FormPayload {
    Contact(ContactForm),
    Application(ApplicationForm),
}

impl FormPayload {
    pub fn kind(&self) -> FormKind {
        match self {
            FormPayload::Contact(_) => FormKind::Contact,
            FormPayload::Application(_) => FormKind::Application,
        }
    }

    /// Every field is required.
    pub fn validate(&self) -> Result<(), AppError> {
        let required = |value: &str, field: &str| {
            if value.trim().is_empty() {
                Err(AppError::Validation(format!("{} is required", field)))
            } else {
                Ok(())
            }
        };

        match self {
            FormPayload::Contact(form) => {
                required(&form.name, "Name")?;
                required(&form.email, "Email")?;
                if !form.email.contains('@') {
                    return Err(AppError::Validation("Email is not valid".to_string()));
                }
                required(&form.message, "Message")
            }
            FormPayload::Application(form) => {
                required(&form.name, "Name")?;
                required(&form.phone, "Phone")?;
                required(&form.experience, "Experience")
            }
        }
    }
}

/// Delivery of a submitted form to whoever handles it.
#[async_trait]
pub trait SubmissionPort: Send + Sync {
    async fn submit(&self, payload: &FormPayload) -> Result<(), AppError>;
}

/// Port that waits a fixed delay and always succeeds. Nothing leaves the process.
pub struct SimulatedPort {
    delay: Duration,
}

impl SimulatedPort {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl SubmissionPort for SimulatedPort {
    async fn submit(&self, payload: &FormPayload) -> Result<(), AppError> {
        tokio::time::sleep(self.delay).await;
        tracing::info!(form = %payload.kind(), "Simulated form delivery");
        Ok(())
    }
}

/// Status machine for one form.
pub struct FormSubmitter {
    kind: FormKind,
    port: Arc<dyn SubmissionPort>,
    /// Return to `Idle` this long after a success; `None` waits for `reset`
    auto_reset: Option<Duration>,
    status: watch::Sender<SubmissionStatus>,
    generation: AtomicU64,
}

impl FormSubmitter {
    pub fn new(
        kind: FormKind,
        port: Arc<dyn SubmissionPort>,
        auto_reset: Option<Duration>,
    ) -> Arc<Self> {
        let (status, _) = watch::channel(SubmissionStatus::Idle);
        Arc::new(Self {
            kind,
            port,
            auto_reset,
            status,
            generation: AtomicU64::new(0),
        })
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionStatus> {
        self.status.subscribe()
    }

    /// Start a submission and return immediately with `Submitting`.
    ///
    /// The port runs in the background; a started submission cannot be
    /// cancelled. Submitting again while one is in flight is a conflict.
    pub fn submit(self: &Arc<Self>, payload: FormPayload) -> Result<SubmissionStatus, AppError> {
        if payload.kind() != self.kind {
            return Err(AppError::Validation(format!(
                "Expected a {} form, got {}",
                self.kind,
                payload.kind()
            )));
        }
        payload.validate()?;

        let started = self.status.send_if_modified(|status| {
            if *status == SubmissionStatus::Submitting {
                false
            } else {
                *status = SubmissionStatus::Submitting;
                true
            }
        });
        if !started {
            return Err(AppError::Conflict(format!(
                "A {} submission is already in progress",
                self.kind
            )));
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(form = %self.kind, "Form submission started");

        let this = Arc::clone(self);
        tokio::spawn(async move {
            this.deliver(payload, generation).await;
        });

        Ok(SubmissionStatus::Submitting)
    }

    async fn deliver(&self, payload: FormPayload, generation: u64) {
        match self.port.submit(&payload).await {
            Ok(()) => {
                self.status.send_replace(SubmissionStatus::Success);
                tracing::info!(form = %self.kind, "Form submission succeeded");
            }
            Err(e) => {
                tracing::warn!(form = %self.kind, "Form submission failed: {}", e);
                self.status.send_replace(SubmissionStatus::Failed {
                    reason: e.message(),
                });
                return;
            }
        }

        if let Some(display) = self.auto_reset {
            tokio::time::sleep(display).await;
            // A newer submission owns the status now
            if self.generation.load(Ordering::SeqCst) == generation {
                self.status.send_if_modified(|status| {
                    if *status == SubmissionStatus::Success {
                        *status = SubmissionStatus::Idle;
                        true
                    } else {
                        false
                    }
                });
            }
        }
    }

    /// Return to `Idle` ("submit another"). Not allowed mid-submission.
    pub fn reset(&self) -> Result<SubmissionStatus, AppError> {
        let mut result = Ok(SubmissionStatus::Idle);
        self.status.send_if_modified(|status| match *status {
            SubmissionStatus::Submitting => {
                result = Err(AppError::Conflict(format!(
                    "A {} submission is still in progress",
                    self.kind
                )));
                false
            }
            SubmissionStatus::Idle => false,
            _ => {
                *status = SubmissionStatus::Idle;
                true
            }
        });
        result
    }
}
