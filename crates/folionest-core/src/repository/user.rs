//! User repository trait definition.

use folionest_types::error::RepositoryError;
use folionest_types::user::{User, UserId};

/// Repository trait for user accounts.
pub trait UserRepository: Send + Sync {
    /// Create a new user. `Conflict` when the email is already registered.
    fn create(
        &self,
        user: &User,
    ) -> impl std::future::Future<Output = Result<User, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: &UserId,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    fn get_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Resolve an API key digest to its account (the request extractor's
    /// lookup path).
    fn get_by_api_key_hash(
        &self,
        key_hash: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    fn update(
        &self,
        user: &User,
    ) -> impl std::future::Future<Output = Result<User, RepositoryError>> + Send;
}
