//! Public portfolio resolution.
//!
//! `GET /u/{slug}[/{page}]` resolves a published aggregate, counts exactly
//! one view per successful render, and dispatches to the stored template.
//! Drafts and unknown slugs are indistinguishable 404s.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Html;

use folionest_core::repository::user::UserRepository;
use folionest_core::template::{DeviceClass, PageKind, RenderContext, TemplateDispatcher};
use folionest_types::error::PortfolioError;

use crate::http::error::AppError;
use crate::state::AppState;

/// GET /u/:slug - The portfolio home page.
pub async fn render_home(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    render(state, &slug, PageKind::Home, None, &headers).await
}

/// GET /u/:slug/:page - A named portfolio page.
pub async fn render_page(
    State(state): State<AppState>,
    Path((slug, page)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let kind: PageKind = page
        .parse()
        .map_err(|_| AppError::NotFound(format!("No such page: '{page}'")))?;
    render(state, &slug, kind, None, &headers).await
}

/// GET /u/:slug/projects/:index - A single project.
pub async fn render_project_detail(
    State(state): State<AppState>,
    Path((slug, index)): Path<(String, usize)>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    render(state, &slug, PageKind::ProjectDetail, Some(index), &headers).await
}

async fn render(
    state: AppState,
    slug: &str,
    kind: PageKind,
    project_index: Option<usize>,
    headers: &HeaderMap,
) -> Result<Html<String>, AppError> {
    let portfolio = state.publish_service.resolve_public(slug).await?;

    // Live entitlement re-check: the owner's plan may have changed since
    // publish, so the stored dark-mode flag and watermark state are not
    // trusted on their own.
    let owner = state
        .users
        .get_by_id(&portfolio.owner_id)
        .await
        .map_err(|e| AppError::Internal(format!("owner lookup: {e}")))?;
    let limits = state
        .publish_service
        .resolve_limits(owner.as_ref())
        .await?;

    // Exactly one increment per successful resolve, before rendering;
    // placeholder and fallback pages still count.
    match state.publish_service.record_view(&portfolio.id).await {
        Ok(()) | Err(PortfolioError::NotFound) => {}
        Err(e) => return Err(e.into()),
    }

    let user_agent = headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let ctx = RenderContext {
        dark_entitled: limits.dark_mode,
        watermark: limits.watermark,
        device: DeviceClass::from_user_agent(user_agent),
        project_index,
    };

    let page = TemplateDispatcher::render(&portfolio, kind, &ctx);
    Ok(Html(page.html))
}
