//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use folionest_types::error::{BuilderError, PortfolioError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Portfolio lifecycle errors.
    Portfolio(PortfolioError),
    /// Builder session errors.
    Builder(BuilderError),
    /// Authentication failure.
    Unauthorized(String),
    /// Request-shape validation error.
    Validation(String),
    /// Missing resource outside the portfolio domain.
    NotFound(String),
    /// Generic internal error.
    Internal(String),
}

impl From<PortfolioError> for AppError {
    fn from(e: PortfolioError) -> Self {
        AppError::Portfolio(e)
    }
}

impl From<BuilderError> for AppError {
    fn from(e: BuilderError) -> Self {
        AppError::Builder(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            AppError::Portfolio(PortfolioError::NotFound) => (
                StatusCode::NOT_FOUND,
                "PORTFOLIO_NOT_FOUND",
                "Portfolio not found".to_string(),
                None,
            ),
            AppError::Portfolio(PortfolioError::PermissionDenied) => (
                StatusCode::FORBIDDEN,
                "PERMISSION_DENIED",
                "You do not own this portfolio".to_string(),
                None,
            ),
            AppError::Portfolio(PortfolioError::SlugConflict(slug)) => (
                StatusCode::CONFLICT,
                "SLUG_CONFLICT",
                format!("Slug '{slug}' is already taken; choose another"),
                None,
            ),
            AppError::Portfolio(PortfolioError::QuotaExceeded { resource, limit }) => (
                StatusCode::FORBIDDEN,
                "QUOTA_EXCEEDED",
                format!("Plan {resource} limit of {limit} reached; upgrade to add more"),
                None,
            ),
            AppError::Portfolio(PortfolioError::Validation(errors)) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Validation failed".to_string(),
                serde_json::to_value(errors).ok(),
            ),
            AppError::Portfolio(PortfolioError::Upstream(_)) => (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "A storage backend is temporarily unavailable; please retry".to_string(),
                None,
            ),
            AppError::Builder(BuilderError::Invalid(errors)) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Step validation failed".to_string(),
                serde_json::to_value(errors).ok(),
            ),
            AppError::Builder(e) => (
                StatusCode::BAD_REQUEST,
                "BUILDER_ERROR",
                e.to_string(),
                None,
            ),
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone(), None)
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone(), None)
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), None),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal error".to_string(),
                    None,
                )
            }
        };

        let body = json!({
            "data": null,
            "meta": {
                "request_id": "",
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "response_time_ms": 0
            },
            "errors": [{
                "code": code,
                "message": message,
                "details": details,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
