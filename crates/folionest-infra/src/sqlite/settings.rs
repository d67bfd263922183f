//! SQLite settings repository implementation.
//!
//! The settings document is stored as a single JSON row (id = 1) and
//! replaced wholesale on update.

use folionest_core::repository::settings::SettingsRepository;
use folionest_types::error::RepositoryError;
use folionest_types::settings::AppSettings;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `SettingsRepository`.
pub struct SqliteSettingsRepository {
    pool: DatabasePool,
}

impl SqliteSettingsRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl SettingsRepository for SqliteSettingsRepository {
    async fn get(&self) -> Result<Option<AppSettings>, RepositoryError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT document FROM app_settings WHERE id = 1")
                .fetch_optional(&self.pool.reader)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.map(|(document,)| {
            serde_json::from_str(&document)
                .map_err(|e| RepositoryError::Query(format!("invalid settings JSON: {e}")))
        })
        .transpose()
    }

    async fn update(&self, settings: &AppSettings) -> Result<AppSettings, RepositoryError> {
        let document = serde_json::to_string(settings)
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        sqlx::query(
            "INSERT INTO app_settings (id, document, updated_at) VALUES (1, ?, ?)
             ON CONFLICT(id) DO UPDATE SET document = excluded.document, updated_at = excluded.updated_at",
        )
        .bind(&document)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(settings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folionest_types::plan::{Limit, PricingMode};

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    #[tokio::test]
    async fn test_get_before_any_write_returns_none() {
        let repo = SqliteSettingsRepository::new(test_pool().await);
        assert!(repo.get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_and_get_roundtrip() {
        let repo = SqliteSettingsRepository::new(test_pool().await);

        let mut settings = AppSettings::default();
        settings.pricing_mode = PricingMode::Free;
        settings.limits.free.portfolios = Limit::Bounded(2);

        repo.update(&settings).await.unwrap();

        let loaded = repo.get().await.unwrap().unwrap();
        assert_eq!(loaded, settings);
    }

    #[tokio::test]
    async fn test_update_replaces_document() {
        let repo = SqliteSettingsRepository::new(test_pool().await);

        repo.update(&AppSettings::default()).await.unwrap();

        let mut changed = AppSettings::default();
        changed.pricing_mode = PricingMode::Free;
        repo.update(&changed).await.unwrap();

        let loaded = repo.get().await.unwrap().unwrap();
        assert_eq!(loaded.pricing_mode, PricingMode::Free);
    }
}
