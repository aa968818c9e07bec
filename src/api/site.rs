//! Whole-site snapshot endpoint.

use axum::extract::State;

use super::{revision, success, ApiResult};
use crate::models::SiteSnapshot;
use crate::AppState;

/// GET /api/site - Every collection plus the admin flag.
pub async fn get_site(State(state): State<AppState>) -> ApiResult<SiteSnapshot> {
    let revision_id = revision(&state).await;

    let snapshot = SiteSnapshot {
        revision_id,
        admin: state.gate.is_authorized(),
        intro: state.intro.get().await,
        slides: state.slides.list().await,
        gallery: state.gallery.list().await,
        members: state.members.list().await,
        events: state.events.list().await,
    };

    success(snapshot, revision_id)
}
