//! Local-filesystem asset store.
//!
//! Stores uploaded binaries under `{data_dir}/assets/` with content-hash
//! file names, so the same bytes always map to the same reference and
//! re-uploads are free.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use folionest_core::asset::{AssetStore, StoredAsset};
use folionest_types::error::RepositoryError;

/// Filesystem-backed implementation of `AssetStore`.
pub struct LocalAssetStore {
    assets_dir: PathBuf,
}

impl LocalAssetStore {
    /// Create a store rooted at `{data_dir}/assets`.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            assets_dir: data_dir.join("assets"),
        }
    }

    fn path_for(&self, reference: &str) -> Result<PathBuf, RepositoryError> {
        // References are hash-derived file names; anything else is hostile.
        if reference.is_empty()
            || reference.contains('/')
            || reference.contains('\\')
            || reference.contains("..")
        {
            return Err(RepositoryError::Query(format!(
                "invalid asset reference: '{reference}'"
            )));
        }
        Ok(self.assets_dir.join(reference))
    }
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        _ => "bin",
    }
}

fn content_type_for(reference: &str) -> String {
    let ext = reference.rsplit('.').next().unwrap_or("");
    match ext {
        "png" => "image/png",
        "jpg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
    .to_string()
}

impl AssetStore for LocalAssetStore {
    async fn store(&self, bytes: &[u8], content_type: &str) -> Result<StoredAsset, RepositoryError> {
        let digest = Sha256::digest(bytes);
        let reference = format!("{:x}.{}", digest, extension_for(content_type));
        let path = self.path_for(&reference)?;

        tokio::fs::create_dir_all(&self.assets_dir)
            .await
            .map_err(|e| RepositoryError::Query(format!("asset dir: {e}")))?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| RepositoryError::Query(format!("asset write: {e}")))?;

        Ok(StoredAsset {
            reference,
            content_type: content_type.to_string(),
            size_bytes: bytes.len() as u64,
        })
    }

    async fn load(&self, reference: &str) -> Result<Option<(Vec<u8>, String)>, RepositoryError> {
        let path = self.path_for(reference)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some((bytes, content_type_for(reference)))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(RepositoryError::Query(format!("asset read: {e}"))),
        }
    }

    async fn delete(&self, reference: &str) -> Result<(), RepositoryError> {
        let path = self.path_for(reference)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RepositoryError::Query(format!("asset delete: {e}"))),
        }
    }
}
