//! Builder session persistence trait.
//!
//! Defines `BuilderDraftStore` for saving and restoring builder session
//! progress. When a user interrupts a session (closes the tab, loses
//! connection), the serialized state is auto-saved and can be resumed
//! later.
//!
//! Uses dedicated storage (not the portfolio tables) because sessions exist
//! before any portfolio is created.

use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use folionest_types::error::RepositoryError;
use folionest_types::user::UserId;

/// A saved builder session containing the full serialized state.
///
/// `state_json` holds the serialized `BuilderSession`. The `schema_version`
/// field enables forward-compatible deserialization: if the session shape
/// changes in a future release, migration logic can inspect the version and
/// transform the JSON before deserializing.
#[derive(Debug, Clone)]
pub struct BuilderDraft {
    /// Session ID (matches `BuilderSession.session_id`).
    pub session_id: Uuid,
    pub owner_id: UserId,
    /// Serialized `BuilderSession` as JSON.
    pub state_json: String,
    /// Schema version for forward-compatible deserialization.
    pub schema_version: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lightweight summary of a saved session for listing.
///
/// Avoids deserializing the full `state_json` when only metadata is needed
/// ("Resume: 'Jane Doe' -- projects step, 2 min ago").
#[derive(Debug, Clone)]
pub struct BuilderDraftSummary {
    pub session_id: Uuid,
    /// The portfolio owner's name from the personal step, possibly empty.
    pub name: String,
    /// Current step name ("personal", "projects").
    pub step: String,
    pub updated_at: DateTime<Utc>,
}

/// Persistence interface for builder sessions.
///
/// Uses RPITIT (return position `impl Trait` in traits) consistent with
/// all async traits in this project.
pub trait BuilderDraftStore: Send + Sync {
    /// Save or update a session (upsert on session_id).
    fn save_draft(
        &self,
        draft: BuilderDraft,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Load a session by ID. `None` if no draft exists.
    fn load_draft(
        &self,
        session_id: &Uuid,
    ) -> impl Future<Output = Result<Option<BuilderDraft>, RepositoryError>> + Send;

    /// List an owner's saved sessions as lightweight summaries, most
    /// recently touched first.
    fn list_drafts(
        &self,
        owner_id: &UserId,
    ) -> impl Future<Output = Result<Vec<BuilderDraftSummary>, RepositoryError>> + Send;

    /// Delete a session by ID. No-op if it does not exist.
    fn delete_draft(
        &self,
        session_id: &Uuid,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}
