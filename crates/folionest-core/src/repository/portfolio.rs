//! Portfolio repository trait definition.

use folionest_types::error::RepositoryError;
use folionest_types::portfolio::{Portfolio, PortfolioId, PortfolioStatus};
use folionest_types::user::UserId;

use super::SortOrder;

/// Filter criteria for listing portfolios.
#[derive(Debug, Clone, Default)]
pub struct PortfolioFilter {
    pub status: Option<PortfolioStatus>,
    /// Field to sort by (e.g., "created_at", "slug", "view_count").
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Repository trait for portfolio persistence.
///
/// Implementations live in folionest-infra (e.g., SqlitePortfolioRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
///
/// Two operations carry concurrency obligations:
/// - `create` and `update` must enforce published-slug uniqueness with a
///   conditional write that fails atomically at commit time
///   (`RepositoryError::Conflict`), not only at pre-check time.
/// - `increment_views` must be an atomic arithmetic update; a naive
///   read-modify-write loses counts under concurrent public traffic.
pub trait PortfolioRepository: Send + Sync {
    /// Persist a new aggregate. `Conflict` when its slug is already held by
    /// a published aggregate.
    fn create(
        &self,
        portfolio: &Portfolio,
    ) -> impl std::future::Future<Output = Result<Portfolio, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: &PortfolioId,
    ) -> impl std::future::Future<Output = Result<Option<Portfolio>, RepositoryError>> + Send;

    /// Look up a *published* aggregate by slug; drafts are invisible here.
    fn get_published_by_slug(
        &self,
        slug: &str,
    ) -> impl std::future::Future<Output = Result<Option<Portfolio>, RepositoryError>> + Send;

    fn list_by_owner(
        &self,
        owner_id: &UserId,
        filter: Option<PortfolioFilter>,
    ) -> impl std::future::Future<Output = Result<Vec<Portfolio>, RepositoryError>> + Send;

    fn count_by_owner(
        &self,
        owner_id: &UserId,
    ) -> impl std::future::Future<Output = Result<i64, RepositoryError>> + Send;

    /// Update an existing aggregate. `Conflict` when a slug/status change
    /// collides with another published aggregate; `NotFound` when the id
    /// does not exist.
    fn update(
        &self,
        portfolio: &Portfolio,
    ) -> impl std::future::Future<Output = Result<Portfolio, RepositoryError>> + Send;

    /// Permanently delete an aggregate by ID.
    fn delete(
        &self,
        id: &PortfolioId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Atomically add one to the view counter.
    fn increment_views(
        &self,
        id: &PortfolioId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
