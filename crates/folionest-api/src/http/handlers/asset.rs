//! Asset upload and serving.
//!
//! The core only ever sees reference strings; binary content stops here.

use std::time::Instant;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};

use folionest_core::asset::AssetStore;

use crate::http::error::AppError;
use crate::http::extractors::auth::AuthenticatedUser;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Uploads above this size are rejected outright.
const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// POST /api/v1/assets - Upload an image, receive its reference.
pub async fn upload_asset(
    State(state): State<AppState>,
    _auth: AuthenticatedUser,
    headers: HeaderMap,
    body: Bytes,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    if body.is_empty() {
        return Err(AppError::Validation("empty upload".to_string()));
    }
    if body.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation(format!(
            "upload exceeds {MAX_UPLOAD_BYTES} bytes"
        )));
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();

    let stored = state
        .assets
        .store(&body, &content_type)
        .await
        .map_err(|e| AppError::Internal(format!("asset store: {e}")))?;
    let elapsed = start.elapsed().as_millis() as u64;

    let json = serde_json::json!({
        "reference": stored.reference,
        "content_type": stored.content_type,
        "size_bytes": stored.size_bytes,
    });
    Ok(ApiResponse::success(json, request_id, elapsed)
        .with_link("self", &format!("/assets/{}", stored.reference)))
}

/// GET /assets/:reference - Serve stored binary content (public).
pub async fn serve_asset(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> Result<Response, AppError> {
    let loaded = state
        .assets
        .load(&reference)
        .await
        .map_err(|_| AppError::NotFound("Asset not found".to_string()))?;

    match loaded {
        Some((bytes, content_type)) => Ok((
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, content_type),
                (header::CACHE_CONTROL, "public, max-age=31536000, immutable".to_string()),
            ],
            bytes,
        )
            .into_response()),
        None => Err(AppError::NotFound("Asset not found".to_string())),
    }
}
