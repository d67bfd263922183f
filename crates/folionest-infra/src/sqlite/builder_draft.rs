//! SQLite implementation of `BuilderDraftStore`.
//!
//! Persists builder sessions in the `builder_drafts` table using INSERT OR
//! REPLACE for upsert semantics. Extracts the owner's name and current step
//! from the serialized `state_json` for lightweight listing without full
//! deserialization.

use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use folionest_core::builder::draft_store::{BuilderDraft, BuilderDraftStore, BuilderDraftSummary};
use folionest_types::error::RepositoryError;
use folionest_types::user::UserId;

use super::pool::DatabasePool;

/// SQLite-backed builder session persistence.
pub struct SqliteBuilderDraftStore {
    pool: DatabasePool,
}

impl SqliteBuilderDraftStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

/// Extract a string at a JSON pointer without deserializing the whole
/// session state.
fn extract_json_pointer(json: &str, pointer: &str) -> String {
    serde_json::from_str::<serde_json::Value>(json)
        .ok()
        .and_then(|value| value.pointer(pointer).and_then(|v| v.as_str().map(String::from)))
        .unwrap_or_default()
}

impl BuilderDraftStore for SqliteBuilderDraftStore {
    async fn save_draft(&self, draft: BuilderDraft) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT OR REPLACE INTO builder_drafts (session_id, owner_id, state_json, schema_version, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(draft.session_id.to_string())
        .bind(draft.owner_id.to_string())
        .bind(&draft.state_json)
        .bind(draft.schema_version as i64)
        .bind(draft.created_at.to_rfc3339())
        .bind(draft.updated_at.to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn load_draft(&self, session_id: &Uuid) -> Result<Option<BuilderDraft>, RepositoryError> {
        let row = sqlx::query(
            "SELECT session_id, owner_id, state_json, schema_version, created_at, updated_at FROM builder_drafts WHERE session_id = ?",
        )
        .bind(session_id.to_string())
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let sid: String = row
            .try_get("session_id")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        let owner: String = row
            .try_get("owner_id")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        let state_json: String = row
            .try_get("state_json")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        let schema_version: i64 = row
            .try_get("schema_version")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        let created_at: String = row
            .try_get("created_at")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        let updated_at: String = row
            .try_get("updated_at")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(Some(BuilderDraft {
            session_id: Uuid::parse_str(&sid)
                .map_err(|e| RepositoryError::Query(format!("invalid session_id: {e}")))?,
            owner_id: owner
                .parse::<UserId>()
                .map_err(|e| RepositoryError::Query(format!("invalid owner_id: {e}")))?,
            state_json,
            schema_version: schema_version as u32,
            created_at: parse_datetime(&created_at)?,
            updated_at: parse_datetime(&updated_at)?,
        }))
    }

    async fn list_drafts(
        &self,
        owner_id: &UserId,
    ) -> Result<Vec<BuilderDraftSummary>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT session_id, state_json, updated_at FROM builder_drafts WHERE owner_id = ? ORDER BY updated_at DESC",
        )
        .bind(owner_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut summaries = Vec::with_capacity(rows.len());
        for row in &rows {
            let sid: String = row
                .try_get("session_id")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            let state_json: String = row
                .try_get("state_json")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            let updated_at: String = row
                .try_get("updated_at")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

            summaries.push(BuilderDraftSummary {
                session_id: Uuid::parse_str(&sid)
                    .map_err(|e| RepositoryError::Query(format!("invalid session_id: {e}")))?,
                name: extract_json_pointer(&state_json, "/data/personal/name"),
                step: extract_json_pointer(&state_json, "/step"),
                updated_at: parse_datetime(&updated_at)?,
            });
        }

        Ok(summaries)
    }

    async fn delete_draft(&self, session_id: &Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM builder_drafts WHERE session_id = ?")
            .bind(session_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }
}
