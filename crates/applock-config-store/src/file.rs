//! JSON-file-backed config repository.

use applock_core::{AppLockConfig, ConfigRepository};
use std::path::{Path, PathBuf};
use tracing::warn;

/// A [`ConfigRepository`] that persists the policy as pretty-printed JSON
/// at a caller-supplied path.
///
/// Reads fall back to [`AppLockConfig::default`] (feature disabled) when
/// the file is missing or unparseable; a corrupt preferences file must
/// not wedge the gate shut. Writes that fail are logged and swallowed,
/// matching the seam's no-failure-path contract.
#[derive(Debug)]
pub struct JsonFileConfigRepository {
    path: PathBuf,
}

impl JsonFileConfigRepository {
    /// Repository persisting at `path`. The parent directory must exist
    /// before the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this repository reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigRepository for JsonFileConfigRepository {
    fn get_config(&self) -> AppLockConfig {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return AppLockConfig::default();
            }
            Err(err) => {
                warn!(path = %self.path.display(), %err, "Failed to read app lock config, using defaults");
                return AppLockConfig::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "Invalid app lock config file, using defaults");
                AppLockConfig::default()
            }
        }
    }

    fn set_config(&self, config: AppLockConfig) {
        let content = match serde_json::to_string_pretty(&config) {
            Ok(content) => content,
            Err(err) => {
                warn!(%err, "Failed to serialize app lock config");
                return;
            }
        };

        if let Err(err) = std::fs::write(&self.path, content) {
            warn!(path = %self.path.display(), %err, "Failed to write app lock config");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tmp() -> TempDir {
        tempfile::tempdir().unwrap()
    }

    #[test]
    fn missing_file_returns_defaults() {
        let dir = tmp();
        let repo = JsonFileConfigRepository::new(dir.path().join("applock.json"));
        assert_eq!(repo.get_config(), AppLockConfig::default());
    }

    #[test]
    fn write_then_read_roundtrip() {
        let dir = tmp();
        let repo = JsonFileConfigRepository::new(dir.path().join("applock.json"));

        let config = AppLockConfig {
            is_enabled: true,
            timeout_millis: 30_000,
        };
        repo.set_config(config.clone());

        assert_eq!(repo.get_config(), config);
    }

    #[test]
    fn corrupt_file_returns_defaults() {
        let dir = tmp();
        let path = dir.path().join("applock.json");
        std::fs::write(&path, "{ not json").unwrap();

        let repo = JsonFileConfigRepository::new(path);
        assert_eq!(repo.get_config(), AppLockConfig::default());
    }

    #[test]
    fn overwrite_replaces_previous_config() {
        let dir = tmp();
        let repo = JsonFileConfigRepository::new(dir.path().join("applock.json"));

        repo.set_config(AppLockConfig::enabled());
        repo.set_config(AppLockConfig {
            is_enabled: false,
            timeout_millis: 1_000,
        });

        let config = repo.get_config();
        assert!(!config.is_enabled);
        assert_eq!(config.timeout_millis, 1_000);
    }

    #[test]
    fn file_content_is_json() {
        let dir = tmp();
        let path = dir.path().join("applock.json");
        let repo = JsonFileConfigRepository::new(&path);

        repo.set_config(AppLockConfig::enabled());

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["is_enabled"], true);
    }
}
