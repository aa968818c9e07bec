//! Carousel slide and gallery photo endpoints.
//!
//! Both collections share one editor, so writes go through [`MediaDraft`]
//! and land in whichever collection its `kind` names.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;

use super::{error, revision, success, ApiResult, ConfirmQuery};
use crate::errors::AppError;
use crate::models::{GalleryPhoto, MediaDraft, Slide};
use crate::AppState;

/// A stored slide or gallery photo, tagged like the draft that produced it.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MediaItem {
    Slide(Slide),
    Gallery(GalleryPhoto),
}

fn build(draft: MediaDraft, id: i64) -> MediaItem {
    match draft {
        MediaDraft::Slide {
            image_src,
            title,
            desc,
        } => MediaItem::Slide(Slide {
            id,
            image_src,
            title: title.trim().to_string(),
            desc,
        }),
        MediaDraft::Gallery {
            image_src,
            alt,
            category,
            title,
            date,
        } => MediaItem::Gallery(GalleryPhoto {
            id,
            image_src,
            alt,
            category,
            title: title.trim().to_string(),
            date,
        }),
    }
}

fn validate(draft: &MediaDraft) -> Result<(), AppError> {
    if draft.image_src().trim().is_empty() {
        return Err(AppError::Validation("Image is required".to_string()));
    }
    Ok(())
}

/// GET /api/slides - List carousel slides.
pub async fn list_slides(State(state): State<AppState>) -> ApiResult<Vec<Slide>> {
    let revision_id = revision(&state).await;
    success(state.slides.list().await, revision_id)
}

/// GET /api/gallery - List gallery photos.
pub async fn list_gallery(State(state): State<AppState>) -> ApiResult<Vec<GalleryPhoto>> {
    let revision_id = revision(&state).await;
    success(state.gallery.list().await, revision_id)
}

/// POST /api/media - Add a slide or gallery photo.
pub async fn create_media(
    State(state): State<AppState>,
    Json(draft): Json<MediaDraft>,
) -> ApiResult<MediaItem> {
    let revision_id = revision(&state).await;

    if let Err(e) = validate(&draft) {
        return error(e, revision_id);
    }

    let result = match build(draft, 0) {
        MediaItem::Slide(slide) => state
            .slides
            .add(slide)
            .await
            .map(|(slide, _)| MediaItem::Slide(slide)),
        MediaItem::Gallery(photo) => state
            .gallery
            .add(photo)
            .await
            .map(|(photo, _)| MediaItem::Gallery(photo)),
    };

    match result {
        Ok(item) => success(item, revision(&state).await),
        Err(e) => error(e, revision_id),
    }
}

/// PUT /api/media/:id - Replace a slide or gallery photo.
pub async fn update_media(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<MediaDraft>,
) -> ApiResult<MediaItem> {
    let revision_id = revision(&state).await;

    if let Err(e) = validate(&draft) {
        return error(e, revision_id);
    }

    let result = match build(draft, id) {
        MediaItem::Slide(slide) => {
            if !state.slides.contains(id).await {
                return error(
                    AppError::NotFound(format!("Slide {} not found", id)),
                    revision_id,
                );
            }
            state
                .slides
                .update(id, slide.clone())
                .await
                .map(|_| MediaItem::Slide(slide))
        }
        MediaItem::Gallery(photo) => {
            if !state.gallery.contains(id).await {
                return error(
                    AppError::NotFound(format!("Photo {} not found", id)),
                    revision_id,
                );
            }
            state
                .gallery
                .update(id, photo.clone())
                .await
                .map(|_| MediaItem::Gallery(photo))
        }
    };

    match result {
        Ok(item) => success(item, revision(&state).await),
        Err(e) => error(e, revision_id),
    }
}

/// DELETE /api/slides/:id?confirm=true - Remove a carousel slide.
pub async fn delete_slide(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(confirm): Query<ConfirmQuery>,
) -> ApiResult<Vec<Slide>> {
    let revision_id = revision(&state).await;

    if let Err(e) = confirm.require("Deleting a slide") {
        return error(e, revision_id);
    }

    match state.slides.remove(id).await {
        Ok(slides) => success(slides, revision(&state).await),
        Err(e) => error(e, revision_id),
    }
}

/// DELETE /api/gallery/:id?confirm=true - Remove a gallery photo.
pub async fn delete_gallery_photo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(confirm): Query<ConfirmQuery>,
) -> ApiResult<Vec<GalleryPhoto>> {
    let revision_id = revision(&state).await;

    if let Err(e) = confirm.require("Deleting a photo") {
        return error(e, revision_id);
    }

    match state.gallery.remove(id).await {
        Ok(photos) => success(photos, revision(&state).await),
        Err(e) => error(e, revision_id),
    }
}
