//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST
//! API. The publish service is generic over repository traits, but AppState
//! pins it to the concrete SQLite implementations.

use std::path::PathBuf;
use std::sync::Arc;

use folionest_core::service::publish::PublishService;
use folionest_infra::asset::LocalAssetStore;
use folionest_infra::filesystem::resolve_data_dir;
use folionest_infra::sqlite::builder_draft::SqliteBuilderDraftStore;
use folionest_infra::sqlite::pool::DatabasePool;
use folionest_infra::sqlite::portfolio::SqlitePortfolioRepository;
use folionest_infra::sqlite::settings::SqliteSettingsRepository;
use folionest_infra::sqlite::user::SqliteUserRepository;

/// Concrete type alias for the publish service pinned to the SQLite
/// implementations.
pub type ConcretePublishService =
    PublishService<SqlitePortfolioRepository, SqliteSettingsRepository>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub publish_service: Arc<ConcretePublishService>,
    pub users: Arc<SqliteUserRepository>,
    pub settings: Arc<SqliteSettingsRepository>,
    pub drafts: Arc<SqliteBuilderDraftStore>,
    pub assets: Arc<LocalAssetStore>,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to the database, wire
    /// services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        // Initialize database
        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("folionest.db").display()
        );
        let db_pool = DatabasePool::new(&db_url).await?;

        // Wire the publish service to its repositories. Handlers that need
        // direct settings/user access get their own repository instances on
        // the same pool.
        let publish_service = PublishService::new(
            SqlitePortfolioRepository::new(db_pool.clone()),
            SqliteSettingsRepository::new(db_pool.clone()),
        );

        Ok(Self {
            publish_service: Arc::new(publish_service),
            users: Arc::new(SqliteUserRepository::new(db_pool.clone())),
            settings: Arc::new(SqliteSettingsRepository::new(db_pool.clone())),
            drafts: Arc::new(SqliteBuilderDraftStore::new(db_pool.clone())),
            assets: Arc::new(LocalAssetStore::new(&data_dir)),
            data_dir,
            db_pool,
        })
    }
}
