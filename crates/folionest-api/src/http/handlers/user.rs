//! Account handlers.

use std::time::Instant;

use axum::extract::State;

use crate::http::error::AppError;
use crate::http::extractors::auth::AuthenticatedUser;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/me - The authenticated account, with its resolved limits.
pub async fn me(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let limits = state.publish_service.resolve_limits(Some(&user)).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let json = serde_json::json!({
        "user": user,
        "limits": limits,
    });
    Ok(ApiResponse::success(json, request_id, elapsed))
}
