//! Member API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::{error, revision, success, ApiResult, ConfirmQuery};
use crate::errors::AppError;
use crate::models::{compare_names, Member, MemberDraft, VoicePart};
use crate::AppState;

/// GET /api/members - List the roster.
pub async fn list_members(State(state): State<AppState>) -> ApiResult<Vec<Member>> {
    let revision_id = revision(&state).await;
    success(state.members.list().await, revision_id)
}

/// POST /api/members - Add a member.
pub async fn create_member(
    State(state): State<AppState>,
    Json(request): Json<MemberDraft>,
) -> ApiResult<Member> {
    let revision_id = revision(&state).await;

    // Validate required fields
    if request.name.trim().is_empty() {
        return error(
            AppError::Validation("Name is required".to_string()),
            revision_id,
        );
    }

    match state.members.add(request.into_member(0)).await {
        Ok((member, _)) => success(member, revision(&state).await),
        Err(e) => error(e, revision_id),
    }
}

/// PUT /api/members/:id - Replace a member.
pub async fn update_member(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<MemberDraft>,
) -> ApiResult<Member> {
    let revision_id = revision(&state).await;

    if request.name.trim().is_empty() {
        return error(
            AppError::Validation("Name is required".to_string()),
            revision_id,
        );
    }
    if !state.members.contains(id).await {
        return error(
            AppError::NotFound(format!("Member {} not found", id)),
            revision_id,
        );
    }

    let member = request.into_member(id);
    match state.members.update(id, member.clone()).await {
        Ok(_) => success(member, revision(&state).await),
        Err(e) => error(e, revision_id),
    }
}

/// DELETE /api/members/:id?confirm=true - Remove a member.
pub async fn delete_member(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(confirm): Query<ConfirmQuery>,
) -> ApiResult<Vec<Member>> {
    let revision_id = revision(&state).await;

    if let Err(e) = confirm.require("Deleting a member") {
        return error(e, revision_id);
    }

    match state.members.remove(id).await {
        Ok(members) => success(members, revision(&state).await),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/members/parts/:part/sort?confirm=true - Sort one voice part by
/// name (case-insensitive, see [`compare_names`]) and move it to the end of
/// the roster.
pub async fn sort_part(
    State(state): State<AppState>,
    Path(part): Path<String>,
    Query(confirm): Query<ConfirmQuery>,
) -> ApiResult<Vec<Member>> {
    let revision_id = revision(&state).await;

    let part: VoicePart = match part.parse() {
        Ok(part) => part,
        Err(e) => return error(AppError::NotFound(e), revision_id),
    };
    if let Err(e) = confirm.require("Sorting a part") {
        return error(e, revision_id);
    }

    match state
        .members
        .reorder(|m| m.part == part, compare_names)
        .await
    {
        Ok(members) => success(members, revision(&state).await),
        Err(e) => error(e, revision_id),
    }
}
