//! SQLite user repository implementation.

use chrono::{DateTime, Utc};
use sqlx::Row;

use folionest_core::repository::user::UserRepository;
use folionest_types::error::RepositoryError;
use folionest_types::plan::Plan;
use folionest_types::user::{GrandfatheredFeatures, User, UserId};

use super::pool::DatabasePool;

/// SQLite-backed implementation of `UserRepository`.
pub struct SqliteUserRepository {
    pool: DatabasePool,
}

impl SqliteUserRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn user_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<User, RepositoryError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let plan: String = row
        .try_get("plan")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let grandfathered: i64 = row
        .try_get("grandfathered")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let features_json: Option<String> = row
        .try_get("grandfathered_features")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let created_at: String = row
        .try_get("created_at")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let updated_at: String = row
        .try_get("updated_at")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

    let grandfathered_features: Option<GrandfatheredFeatures> = features_json
        .as_deref()
        .map(serde_json::from_str)
        .transpose()
        .map_err(|e| RepositoryError::Query(format!("invalid grandfathered features JSON: {e}")))?;

    Ok(User {
        id: id
            .parse::<UserId>()
            .map_err(|e| RepositoryError::Query(format!("invalid user id: {e}")))?,
        email: row
            .try_get("email")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        display_name: row
            .try_get("display_name")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        plan: plan
            .parse::<Plan>()
            .map_err(RepositoryError::Query)?,
        grandfathered: grandfathered != 0,
        grandfathered_features,
        api_key_hash: row
            .try_get("api_key_hash")
            .map_err(|e| RepositoryError::Query(e.to_string()))?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: &User) -> Result<User, RepositoryError> {
        let features_json = user
            .grandfathered_features
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let result = sqlx::query(
            "INSERT INTO users (id, email, display_name, plan, grandfathered, grandfathered_features, api_key_hash, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(user.plan.to_string())
        .bind(user.grandfathered as i64)
        .bind(&features_json)
        .bind(&user.api_key_hash)
        .bind(user.created_at.to_rfc3339())
        .bind(user.updated_at.to_rfc3339())
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(user.clone()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => Err(
                RepositoryError::Conflict(format!("email '{}' already registered", user.email)),
            ),
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn get_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn get_by_api_key_hash(&self, key_hash: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM users WHERE api_key_hash = ?")
            .bind(key_hash)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn update(&self, user: &User) -> Result<User, RepositoryError> {
        let features_json = user
            .grandfathered_features
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let result = sqlx::query(
            "UPDATE users SET email = ?, display_name = ?, plan = ?, grandfathered = ?, grandfathered_features = ?, api_key_hash = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(user.plan.to_string())
        .bind(user.grandfathered as i64)
        .bind(&features_json)
        .bind(&user.api_key_hash)
        .bind(user.updated_at.to_rfc3339())
        .bind(user.id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(user.clone())
    }
}
