//! AI companion endpoints.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::{error, revision, success, ApiResult};
use crate::companion::{format_response, FeedbackEntry, FeedbackKind, Segment};
use crate::errors::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub input: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub text: String,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub original_input: String,
    #[serde(flatten)]
    pub kind: FeedbackKind,
}

/// POST /api/companion/ask - Ask the companion. Failures come back as a
/// fixed message, never as an error.
pub async fn ask_companion(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> ApiResult<AskResponse> {
    let revision_id = revision(&state).await;

    if request.input.trim().is_empty() {
        return error(
            AppError::Validation("Input is required".to_string()),
            revision_id,
        );
    }

    let text = state.companion.ask(request.input.trim()).await;
    let segments = format_response(&text);
    success(AskResponse { text, segments }, revision_id)
}

/// POST /api/companion/feedback - Rate a reply or leave a voice note.
///
/// Blank voice notes and writes over an unreadable log are dropped; `data`
/// is then `null`.
pub async fn record_feedback(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> ApiResult<Option<FeedbackEntry>> {
    let revision_id = revision(&state).await;

    match state
        .feedback
        .record(&request.original_input, request.kind)
        .await
    {
        Ok(entry) => success(entry, revision(&state).await),
        Err(e) => error(e, revision_id),
    }
}
