//! Platform settings handlers.

use std::time::Instant;

use axum::Json;
use axum::extract::State;

use folionest_core::repository::settings::SettingsRepository;
use folionest_types::settings::AppSettings;

use crate::http::error::AppError;
use crate::http::extractors::auth::AuthenticatedUser;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/settings - The current settings document (defaults when
/// never written).
pub async fn get_settings(
    State(state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<ApiResponse<AppSettings>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let settings = state
        .settings
        .get()
        .await
        .map_err(|e| AppError::Internal(format!("settings load: {e}")))?
        .unwrap_or_default();
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(ApiResponse::success(settings, request_id, elapsed))
}

/// PUT /api/v1/settings - Replace the settings document.
pub async fn update_settings(
    State(state): State<AppState>,
    _auth: AuthenticatedUser,
    Json(body): Json<AppSettings>,
) -> Result<ApiResponse<AppSettings>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let saved = state
        .settings
        .update(&body)
        .await
        .map_err(|e| AppError::Internal(format!("settings save: {e}")))?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(ApiResponse::success(saved, request_id, elapsed))
}
