//! Platform settings repository trait definition.

use folionest_types::error::RepositoryError;
use folionest_types::settings::AppSettings;

/// Repository trait for the platform-wide settings document.
///
/// The core reads settings through this port and passes the value into the
/// entitlement resolver; it never holds a global copy. Refresh/caching is
/// the caller's concern.
pub trait SettingsRepository: Send + Sync {
    /// Load the settings document. `None` when never written; callers fall
    /// back to `AppSettings::default()`.
    fn get(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<AppSettings>, RepositoryError>> + Send;

    /// Replace the settings document.
    fn update(
        &self,
        settings: &AppSettings,
    ) -> impl std::future::Future<Output = Result<AppSettings, RepositoryError>> + Send;
}
