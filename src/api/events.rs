//! Choir event endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::{error, revision, success, ApiResult, ConfirmQuery};
use crate::errors::AppError;
use crate::models::{ChoirEvent, EventDraft};
use crate::AppState;

fn validate(draft: &EventDraft) -> Result<(), AppError> {
    if draft.date().is_none() {
        return Err(AppError::Validation(format!(
            "{}-{}-{} is not a calendar date",
            draft.year, draft.month, draft.day
        )));
    }
    if draft.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    Ok(())
}

/// GET /api/events - List events in date order.
pub async fn list_events(State(state): State<AppState>) -> ApiResult<Vec<ChoirEvent>> {
    let revision_id = revision(&state).await;
    success(state.events.list().await, revision_id)
}

/// POST /api/events - Add an event.
pub async fn create_event(
    State(state): State<AppState>,
    Json(draft): Json<EventDraft>,
) -> ApiResult<ChoirEvent> {
    let revision_id = revision(&state).await;

    if let Err(e) = validate(&draft) {
        return error(e, revision_id);
    }

    let id = draft.id;
    match state.events.add(draft.into_event(id)).await {
        Ok((event, _)) => success(event, revision(&state).await),
        Err(e) => error(e, revision_id),
    }
}

/// PUT /api/events/:id - Replace an event.
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<EventDraft>,
) -> ApiResult<ChoirEvent> {
    let revision_id = revision(&state).await;

    if let Err(e) = validate(&draft) {
        return error(e, revision_id);
    }
    if !state.events.contains(id).await {
        return error(
            AppError::NotFound(format!("Event {} not found", id)),
            revision_id,
        );
    }

    let event = draft.into_event(id);
    match state.events.update(id, event.clone()).await {
        Ok(_) => success(event, revision(&state).await),
        Err(e) => error(e, revision_id),
    }
}

/// DELETE /api/events/:id?confirm=true - Remove an event.
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(confirm): Query<ConfirmQuery>,
) -> ApiResult<Vec<ChoirEvent>> {
    let revision_id = revision(&state).await;

    if let Err(e) = confirm.require("Deleting an event") {
        return error(e, revision_id);
    }

    match state.events.remove(id).await {
        Ok(events) => success(events, revision(&state).await),
        Err(e) => error(e, revision_id),
    }
}
