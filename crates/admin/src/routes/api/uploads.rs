//! Image upload API.
//!
//! Accepts one multipart `file` field and stores it in the public bucket.
//! The form script writes the returned URL into the `image_url` input.

#![allow(clippy::used_underscore_binding)]

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    routing::post,
};
use serde::Serialize;
use tracing::instrument;

use crate::{
    error::{AppError, Result},
    middleware::RequireAdminAuth,
    services::{UploadFolder, storage::MAX_IMAGE_BYTES},
    state::AppState,
};

/// Multipart field carrying the image.
const FILE_FIELD: &str = "file";

/// Room for multipart framing on top of the largest image.
const BODY_LIMIT: usize = MAX_IMAGE_BYTES + 1024 * 1024;

/// Build the uploads router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/uploads/{folder}", post(upload_image))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
}

/// Response for a stored image.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// Upload an image for an UMKM or a product.
///
/// POST /api/uploads/{folder}
///
/// # Errors
///
/// Returns 400 for a missing, unsupported or oversized file, 503 when
/// storage is not configured and 502 when the storage API fails.
#[instrument(skip(_admin, state, multipart))]
pub async fn upload_image(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(folder): Path<UploadFolder>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let storage = state
        .storage()
        .ok_or_else(|| AppError::Unavailable("penyimpanan gambar belum dikonfigurasi".to_string()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let url = storage
            .upload_image(folder, &content_type, data.to_vec())
            .await?;
        return Ok(Json(UploadResponse { url }));
    }

    Err(AppError::BadRequest("file gambar tidak ditemukan".to_string()))
}
