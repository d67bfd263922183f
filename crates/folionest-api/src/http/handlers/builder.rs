//! Builder session handlers.
//!
//! Sessions are serialized `BuilderSession` state persisted through the
//! draft store, so an interrupted flow can resume from any device. Every
//! operation loads the state, applies one transition, and saves it back --
//! the session is single-writer and sequential by construction.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use folionest_core::builder::draft_store::{BuilderDraft, BuilderDraftStore};
use folionest_core::builder::{BuilderSessionExt, edit_session, new_session};
use folionest_types::builder::{BuilderSession, BuilderStep};
use folionest_types::error::PortfolioError;
use folionest_types::portfolio::{
    ExperienceEntry, PersonalInfo, PortfolioId, ProjectEntry, SeoMeta, SkillEntry, SocialLinks,
    TemplateId, ThemeSettings,
};
use folionest_types::user::User;

use crate::http::error::AppError;
use crate::http::extractors::auth::AuthenticatedUser;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Bumped when the serialized session shape changes.
const SESSION_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
pub struct StartSessionBody {
    /// Start an edit session pre-loaded from this aggregate.
    #[serde(default)]
    pub portfolio_id: Option<PortfolioId>,
}

/// Publish-step slice for `PUT .../steps/publish`.
#[derive(Debug, Deserialize)]
struct PublishStepBody {
    #[serde(default)]
    slug: String,
    #[serde(default)]
    seo: Option<SeoMeta>,
    #[serde(default)]
    publish: bool,
}

async fn load_session(
    state: &AppState,
    user: &User,
    session_id: &Uuid,
) -> Result<(BuilderSession, BuilderDraft), AppError> {
    let draft = state
        .drafts
        .load_draft(session_id)
        .await
        .map_err(|e| AppError::Internal(format!("draft load: {e}")))?
        .ok_or_else(|| AppError::NotFound("Builder session not found".to_string()))?;

    if draft.owner_id != user.id {
        return Err(AppError::Portfolio(PortfolioError::PermissionDenied));
    }

    let session: BuilderSession = serde_json::from_str(&draft.state_json)
        .map_err(|e| AppError::Internal(format!("corrupt session state: {e}")))?;
    Ok((session, draft))
}

async fn save_session(
    state: &AppState,
    session: &BuilderSession,
    created_at: chrono::DateTime<Utc>,
) -> Result<(), AppError> {
    let state_json = serde_json::to_string(session)
        .map_err(|e| AppError::Internal(format!("session serialize: {e}")))?;
    state
        .drafts
        .save_draft(BuilderDraft {
            session_id: session.session_id,
            owner_id: session.owner_id,
            state_json,
            schema_version: SESSION_SCHEMA_VERSION,
            created_at,
            updated_at: Utc::now(),
        })
        .await
        .map_err(|e| AppError::Internal(format!("draft save: {e}")))?;
    Ok(())
}

fn session_json(session: &BuilderSession) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(session).map_err(|e| AppError::Internal(e.to_string()))
}

/// POST /api/v1/builder/sessions - Start a create or edit session.
pub async fn start_session(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(body): Json<StartSessionBody>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let session = match body.portfolio_id {
        Some(id) => {
            // Edit flow: pre-load the aggregate, ownership enforced.
            let portfolio = state.publish_service.get_owned(&user, &id).await?;
            edit_session(&portfolio)
        }
        None => new_session(user.id),
    };

    save_session(&state, &session, Utc::now()).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(session_json(&session)?, request_id, elapsed).with_link(
        "self",
        &format!("/api/v1/builder/sessions/{}", session.session_id),
    );
    Ok(resp)
}

/// GET /api/v1/builder/sessions - List the caller's resumable sessions.
pub async fn list_sessions(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<ApiResponse<Vec<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let summaries = state
        .drafts
        .list_drafts(&user.id)
        .await
        .map_err(|e| AppError::Internal(format!("draft list: {e}")))?;
    let elapsed = start.elapsed().as_millis() as u64;

    let json: Vec<serde_json::Value> = summaries
        .iter()
        .map(|s| {
            serde_json::json!({
                "session_id": s.session_id.to_string(),
                "name": s.name,
                "step": s.step,
                "updated_at": s.updated_at.to_rfc3339(),
            })
        })
        .collect();

    Ok(ApiResponse::success(json, request_id, elapsed))
}

/// GET /api/v1/builder/sessions/:id - Resume a session.
pub async fn get_session(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(session_id): Path<Uuid>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let (session, _) = load_session(&state, &user, &session_id).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(ApiResponse::success(session_json(&session)?, request_id, elapsed))
}

/// PUT /api/v1/builder/sessions/:id/steps/:step - Edit one step's slice.
///
/// Editing mutates only the named step; no cross-step invalidation happens
/// here. Gating against the plan (dark mode, template access) is applied on
/// advance and again at publish time.
pub async fn edit_step(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((session_id, step)): Path<(Uuid, String)>,
    Json(body): Json<serde_json::Value>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let step: BuilderStep = step.parse().map_err(AppError::Validation)?;
    let (mut session, draft) = load_session(&state, &user, &session_id).await?;

    let invalid = |e: serde_json::Error| AppError::Validation(format!("invalid step payload: {e}"));
    match step {
        BuilderStep::Template => {
            session.set_template(serde_json::from_value::<TemplateId>(body).map_err(invalid)?);
        }
        BuilderStep::Personal => {
            session.edit_personal(serde_json::from_value::<PersonalInfo>(body).map_err(invalid)?);
        }
        BuilderStep::Experience => {
            session.edit_experience(
                serde_json::from_value::<Vec<ExperienceEntry>>(body).map_err(invalid)?,
            );
        }
        BuilderStep::Projects => {
            session
                .edit_projects(serde_json::from_value::<Vec<ProjectEntry>>(body).map_err(invalid)?);
        }
        BuilderStep::Skills => {
            session.edit_skills(serde_json::from_value::<Vec<SkillEntry>>(body).map_err(invalid)?);
        }
        BuilderStep::Socials => {
            session.edit_socials(serde_json::from_value::<SocialLinks>(body).map_err(invalid)?);
        }
        BuilderStep::Theme => {
            session.edit_theme(serde_json::from_value::<ThemeSettings>(body).map_err(invalid)?);
        }
        BuilderStep::Publish => {
            let body: PublishStepBody = serde_json::from_value(body).map_err(invalid)?;
            session.edit_publish_options(body.slug, body.seo, body.publish);
        }
    }

    save_session(&state, &session, draft.created_at).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(ApiResponse::success(session_json(&session)?, request_id, elapsed))
}

/// POST /api/v1/builder/sessions/:id/next - Validate the current step and
/// advance. Field-level failures return 400 and the session stays put.
pub async fn next_step(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(session_id): Path<Uuid>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let (mut session, draft) = load_session(&state, &user, &session_id).await?;
    let limits = state.publish_service.resolve_limits(Some(&user)).await?;

    session.advance(&limits)?;
    save_session(&state, &session, draft.created_at).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(ApiResponse::success(session_json(&session)?, request_id, elapsed))
}

/// POST /api/v1/builder/sessions/:id/back - Step back without validating.
pub async fn back_step(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(session_id): Path<Uuid>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let (mut session, draft) = load_session(&state, &user, &session_id).await?;
    // At the first step this is a no-op rather than an error.
    session.back();
    save_session(&state, &session, draft.created_at).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(ApiResponse::success(session_json(&session)?, request_id, elapsed))
}

/// POST /api/v1/builder/sessions/:id/commit - Assemble the draft, hand it
/// to the publish service, and drop the session on success.
pub async fn commit_session(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(session_id): Path<Uuid>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let (mut session, _) = load_session(&state, &user, &session_id).await?;
    let limits = state.publish_service.resolve_limits(Some(&user)).await?;

    let draft = session.commit(&limits)?;
    let portfolio = state.publish_service.publish(&user, draft).await?;

    // Best effort: a leftover draft row is harmless.
    if let Err(e) = state.drafts.delete_draft(&session_id).await {
        tracing::warn!(error = %e, "failed to delete committed builder session");
    }
    let elapsed = start.elapsed().as_millis() as u64;

    let json = serde_json::to_value(&portfolio)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let resp = ApiResponse::success(json, request_id, elapsed)
        .with_link("self", &format!("/api/v1/portfolios/{}", portfolio.id))
        .with_link("public", &format!("/u/{}", portfolio.slug));
    Ok(resp)
}

/// DELETE /api/v1/builder/sessions/:id - Abandon a session.
pub async fn delete_session(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(session_id): Path<Uuid>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    // Ownership check before deletion.
    load_session(&state, &user, &session_id).await?;
    state
        .drafts
        .delete_draft(&session_id)
        .await
        .map_err(|e| AppError::Internal(format!("draft delete: {e}")))?;
    let elapsed = start.elapsed().as_millis() as u64;

    Ok(ApiResponse::success(
        serde_json::json!({"deleted": true, "session_id": session_id.to_string()}),
        request_id,
        elapsed,
    ))
}
