//! Admin session endpoints.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::{error, revision, success, ApiResult};
use crate::errors::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub authorized: bool,
}

/// GET /api/admin/session - Whether editing is currently allowed.
pub async fn get_session(State(state): State<AppState>) -> ApiResult<SessionState> {
    let revision_id = revision(&state).await;
    success(
        SessionState {
            authorized: state.gate.is_authorized(),
        },
        revision_id,
    )
}

/// POST /api/admin/login - Open the gate with the shared password.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<SessionState> {
    let revision_id = revision(&state).await;

    match state.gate.login(&request.password).await {
        Ok(true) => success(SessionState { authorized: true }, revision_id),
        Ok(false) => error(AppError::InvalidPassword, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/admin/logout - Close the gate.
pub async fn logout(State(state): State<AppState>) -> ApiResult<SessionState> {
    let revision_id = revision(&state).await;

    match state.gate.logout().await {
        Ok(()) => success(SessionState { authorized: false }, revision_id),
        Err(e) => error(e, revision_id),
    }
}
