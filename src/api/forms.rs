//! Contact and application form endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use super::{error, revision, success, ApiResult};
use crate::errors::AppError;
use crate::forms::{FormKind, FormPayload, FormSubmitter, SubmissionStatus};
use crate::AppState;

fn submitter(state: &AppState, kind: &str) -> Result<Arc<FormSubmitter>, AppError> {
    Ok(match kind.parse::<FormKind>()? {
        FormKind::Contact => state.contact.clone(),
        FormKind::Application => state.application.clone(),
    })
}

fn payload(kind: FormKind, body: serde_json::Value) -> Result<FormPayload, AppError> {
    Ok(match kind {
        FormKind::Contact => FormPayload::Contact(serde_json::from_value(body)?),
        FormKind::Application => FormPayload::Application(serde_json::from_value(body)?),
    })
}

/// POST /api/forms/:kind - Start a submission.
pub async fn submit_form(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<SubmissionStatus> {
    let revision_id = revision(&state).await;

    let result = submitter(&state, &kind).and_then(|form| {
        let payload = payload(form.kind(), body)?;
        form.submit(payload)
    });

    match result {
        Ok(status) => success(status, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/forms/:kind/status - Where the form is in its lifecycle.
pub async fn form_status(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> ApiResult<SubmissionStatus> {
    let revision_id = revision(&state).await;

    match submitter(&state, &kind) {
        Ok(form) => success(form.status(), revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/forms/:kind/reset - Back to an empty form.
pub async fn reset_form(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> ApiResult<SubmissionStatus> {
    let revision_id = revision(&state).await;

    match submitter(&state, &kind).and_then(|form| form.reset()) {
        Ok(status) => success(status, revision_id),
        Err(e) => error(e, revision_id),
    }
}
