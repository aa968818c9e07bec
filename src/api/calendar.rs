//! Calendar endpoints.

use axum::extract::{Path, State};
use chrono::Local;

use super::{error, revision, success, ApiResult};
use crate::calendar::{date_click, CalendarView, MonthView};
use crate::errors::AppError;
use crate::models::EventDraft;
use crate::AppState;

fn check_month(month: u32) -> Result<(), AppError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(AppError::Validation(format!("Month {} is out of range", month)))
    }
}

/// GET /api/calendar - The month containing today.
pub async fn current_month(State(state): State<AppState>) -> ApiResult<MonthView> {
    let revision_id = revision(&state).await;
    let view = CalendarView::containing(Local::now().date_naive());
    success(MonthView::build(view, &state.events.list().await), revision_id)
}

/// GET /api/calendar/:year/:month - Layout and event days of one month.
pub async fn month_view(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> ApiResult<MonthView> {
    let revision_id = revision(&state).await;

    if let Err(e) = check_month(month) {
        return error(e, revision_id);
    }

    let view = CalendarView::new(year, month);
    success(MonthView::build(view, &state.events.list().await), revision_id)
}

/// GET /api/calendar/:year/:month/:day/draft - Blank event draft for a day.
pub async fn day_draft(
    State(state): State<AppState>,
    Path((year, month, day)): Path<(i32, u32, u32)>,
) -> ApiResult<EventDraft> {
    let revision_id = revision(&state).await;

    match date_click(state.gate.is_authorized(), year, month, day) {
        Some(draft) if draft.date().is_some() => success(draft, revision_id),
        Some(_) => error(
            AppError::Validation(format!("{}-{}-{} is not a calendar date", year, month, day)),
            revision_id,
        ),
        None => error(
            AppError::Unauthorized("Admin session required".to_string()),
            revision_id,
        ),
    }
}
