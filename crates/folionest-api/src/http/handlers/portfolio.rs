//! Portfolio CRUD and lifecycle handlers.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use folionest_core::repository::SortOrder;
use folionest_core::repository::portfolio::PortfolioFilter;
use folionest_core::template::TemplateDispatcher;
use folionest_types::builder::PortfolioDraft;
use folionest_types::portfolio::{
    PortfolioData, PortfolioId, PortfolioStatus, SeoMeta, TemplateId,
};

use crate::http::error::AppError;
use crate::http::extractors::auth::AuthenticatedUser;
use crate::http::extractors::query::PortfolioListQuery;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for creating or updating a portfolio directly (the builder
/// flow produces the same draft through its commit endpoint).
#[derive(Debug, Deserialize)]
pub struct DraftBody {
    pub template: TemplateId,
    pub slug: String,
    pub data: PortfolioData,
    #[serde(default)]
    pub seo: Option<SeoMeta>,
    #[serde(default)]
    pub publish: bool,
}

impl DraftBody {
    fn into_draft(self, portfolio_id: Option<PortfolioId>) -> PortfolioDraft {
        PortfolioDraft {
            portfolio_id,
            template: self.template,
            slug: self.slug,
            data: self.data,
            seo: self.seo,
            publish: self.publish,
        }
    }
}

/// POST /api/v1/portfolios - Create (and optionally publish) a portfolio.
pub async fn create_portfolio(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(body): Json<DraftBody>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let portfolio = state
        .publish_service
        .publish(&user, body.into_draft(None))
        .await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let json = serde_json::to_value(&portfolio)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let resp = ApiResponse::success(json, request_id, elapsed)
        .with_link("self", &format!("/api/v1/portfolios/{}", portfolio.id))
        .with_link("public", &format!("/u/{}", portfolio.slug));

    Ok(resp)
}

/// GET /api/v1/portfolios - List the caller's portfolios.
pub async fn list_portfolios(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<PortfolioListQuery>,
) -> Result<ApiResponse<Vec<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let status = query
        .status
        .as_deref()
        .map(str::parse::<PortfolioStatus>)
        .transpose()
        .map_err(AppError::Validation)?;

    let sort_order = match query.order.to_lowercase().as_str() {
        "asc" => Some(SortOrder::Asc),
        _ => Some(SortOrder::Desc),
    };

    let filter = Some(PortfolioFilter {
        status,
        sort_by: Some(query.sort.clone()),
        sort_order,
        limit: query.limit,
        offset: query.offset,
    });

    let portfolios = state.publish_service.list_owned(&user, filter).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let json: Vec<serde_json::Value> = portfolios
        .iter()
        .filter_map(|p| serde_json::to_value(p).ok())
        .collect();

    Ok(ApiResponse::success(json, request_id, elapsed).with_link("self", "/api/v1/portfolios"))
}

/// GET /api/v1/portfolios/:id - Get one of the caller's portfolios.
pub async fn get_portfolio(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<PortfolioId>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let portfolio = state.publish_service.get_owned(&user, &id).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let json = serde_json::to_value(&portfolio)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(ApiResponse::success(json, request_id, elapsed)
        .with_link("self", &format!("/api/v1/portfolios/{id}")))
}

/// PUT /api/v1/portfolios/:id - Update a portfolio with a full draft.
pub async fn update_portfolio(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<PortfolioId>,
    Json(body): Json<DraftBody>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let portfolio = state
        .publish_service
        .publish(&user, body.into_draft(Some(id)))
        .await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let json = serde_json::to_value(&portfolio)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(ApiResponse::success(json, request_id, elapsed)
        .with_link("self", &format!("/api/v1/portfolios/{id}")))
}

/// POST /api/v1/portfolios/:id/unpublish - Take a portfolio offline.
pub async fn unpublish_portfolio(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<PortfolioId>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let portfolio = state.publish_service.unpublish(&user, &id).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let json = serde_json::to_value(&portfolio)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(ApiResponse::success(json, request_id, elapsed))
}

/// DELETE /api/v1/portfolios/:id - Permanently delete a portfolio.
pub async fn delete_portfolio(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<PortfolioId>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    state.publish_service.delete(&user, &id).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(ApiResponse::success(
        serde_json::json!({"deleted": true, "id": id.to_string()}),
        request_id,
        elapsed,
    ))
}

/// GET /api/v1/templates - The template catalog with per-plan availability.
pub async fn list_templates(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<ApiResponse<Vec<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let limits = state.publish_service.resolve_limits(Some(&user)).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let catalog: Vec<serde_json::Value> = TemplateDispatcher::catalog()
        .iter()
        .map(|variant| {
            serde_json::json!({
                "id": variant.id(),
                "name": variant.display_name(),
                "supports_project_detail": variant.supports_project_detail(),
                "available": limits.templates.allows(variant.id()),
            })
        })
        .collect();

    Ok(ApiResponse::success(catalog, request_id, elapsed))
}
