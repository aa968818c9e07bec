//! Admin guard for content-mutating routes.
//!
//! Requests pass only while the shared admin gate is open.

use std::sync::Arc;

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::errors::{AppError, AppErrorWithRevision};
use crate::session::AdminGate;

/// Guard layer function that takes the shared gate as a parameter.
pub async fn admin_guard_layer(gate: Arc<AdminGate>, request: Request, next: Next) -> Response {
    if gate.is_authorized() {
        next.run(request).await
    } else {
        tracing::debug!(path = %request.uri().path(), "Blocked edit without admin session");
        unauthorized_response("Admin session required")
    }
}

/// Create an unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    AppErrorWithRevision {
        error: AppError::Unauthorized(message.to_string()),
        revision_id: 0,
    }
    .into_response()
}
