//! Introduction text endpoints.

use axum::{extract::State, Json};

use super::{error, revision, success, ApiResult};
use crate::errors::AppError;
use crate::models::Intro;
use crate::AppState;

/// GET /api/intro - Current introduction text.
pub async fn get_intro(State(state): State<AppState>) -> ApiResult<Intro> {
    let revision_id = revision(&state).await;
    success(state.intro.get().await, revision_id)
}

/// PUT /api/intro - Replace the introduction text.
pub async fn update_intro(
    State(state): State<AppState>,
    Json(intro): Json<Intro>,
) -> ApiResult<Intro> {
    let revision_id = revision(&state).await;

    if intro.title.trim().is_empty() {
        return error(
            AppError::Validation("Title is required".to_string()),
            revision_id,
        );
    }

    match state.intro.replace(intro).await {
        Ok(intro) => success(intro, revision(&state).await),
        Err(e) => error(e, revision_id),
    }
}
