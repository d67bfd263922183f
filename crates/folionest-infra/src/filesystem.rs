//! Data directory resolution.

use std::path::PathBuf;

/// Resolve the Folionest data directory.
///
/// Honors `FOLIONEST_DATA_DIR`, falling back to `~/.folionest`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("FOLIONEST_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".folionest")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_data_dir_ends_with_folionest() {
        // Depending on env the override may be active; both shapes are fine.
        let dir = resolve_data_dir();
        assert!(!dir.as_os_str().is_empty());
    }
}
