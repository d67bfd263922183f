//! Asset store trait.
//!
//! The core never touches binary image content: uploads go through this
//! port and come back as durable reference strings, which is all the
//! aggregate stores. The local-filesystem adapter lives in folionest-infra.

use folionest_types::error::RepositoryError;

/// A stored asset's reference plus the metadata needed to serve it.
#[derive(Debug, Clone)]
pub struct StoredAsset {
    /// Durable reference string, safe to embed in portfolio data.
    pub reference: String,
    pub content_type: String,
    pub size_bytes: u64,
}

/// Abstraction over binary asset storage.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait AssetStore: Send + Sync {
    /// Store binary content, returning a durable reference.
    fn store(
        &self,
        bytes: &[u8],
        content_type: &str,
    ) -> impl std::future::Future<Output = Result<StoredAsset, RepositoryError>> + Send;

    /// Load previously stored content. `None` for unknown references.
    fn load(
        &self,
        reference: &str,
    ) -> impl std::future::Future<Output = Result<Option<(Vec<u8>, String)>, RepositoryError>> + Send;

    /// Remove stored content. No-op for unknown references.
    fn delete(
        &self,
        reference: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
