//! Axum router configuration with middleware.
//!
//! Authenticated management routes live under `/api/v1/`; the public
//! resolution surface (`/u/{slug}`, `/assets/{ref}`) and `/health` are
//! unauthenticated. Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{delete, get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Portfolio lifecycle
        .route("/portfolios", post(handlers::portfolio::create_portfolio))
        .route("/portfolios", get(handlers::portfolio::list_portfolios))
        .route("/portfolios/{id}", get(handlers::portfolio::get_portfolio))
        .route("/portfolios/{id}", put(handlers::portfolio::update_portfolio))
        .route("/portfolios/{id}", delete(handlers::portfolio::delete_portfolio))
        .route(
            "/portfolios/{id}/unpublish",
            post(handlers::portfolio::unpublish_portfolio),
        )
        // Template catalog
        .route("/templates", get(handlers::portfolio::list_templates))
        // Builder sessions
        .route("/builder/sessions", post(handlers::builder::start_session))
        .route("/builder/sessions", get(handlers::builder::list_sessions))
        .route("/builder/sessions/{id}", get(handlers::builder::get_session))
        .route(
            "/builder/sessions/{id}",
            delete(handlers::builder::delete_session),
        )
        .route(
            "/builder/sessions/{id}/steps/{step}",
            put(handlers::builder::edit_step),
        )
        .route("/builder/sessions/{id}/next", post(handlers::builder::next_step))
        .route("/builder/sessions/{id}/back", post(handlers::builder::back_step))
        .route(
            "/builder/sessions/{id}/commit",
            post(handlers::builder::commit_session),
        )
        // Assets
        .route("/assets", post(handlers::asset::upload_asset))
        // Platform settings
        .route("/settings", get(handlers::settings::get_settings))
        .route("/settings", put(handlers::settings::update_settings))
        // Account
        .route("/me", get(handlers::user::me));

    Router::new()
        .nest("/api/v1", api_routes)
        // Public resolution surface
        .route("/u/{slug}", get(handlers::public::render_home))
        .route(
            "/u/{slug}/projects/{index}",
            get(handlers::public::render_project_detail),
        )
        .route("/u/{slug}/{page}", get(handlers::public::render_page))
        .route("/assets/{reference}", get(handlers::asset::serve_asset))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
