//! In-memory config repository.

use applock_core::{AppLockConfig, ConfigRepository};
use std::sync::Mutex;

/// A [`ConfigRepository`] backed by process memory.
///
/// The composition-root default when the host application wires its own
/// persistence elsewhere.
#[derive(Debug)]
pub struct MemoryConfigRepository {
    config: Mutex<AppLockConfig>,
}

impl MemoryConfigRepository {
    /// Repository seeded with the given config.
    pub fn new(config: AppLockConfig) -> Self {
        Self {
            config: Mutex::new(config),
        }
    }
}

impl Default for MemoryConfigRepository {
    fn default() -> Self {
        Self::new(AppLockConfig::default())
    }
}

impl ConfigRepository for MemoryConfigRepository {
    fn get_config(&self) -> AppLockConfig {
        self.config.lock().unwrap().clone()
    }

    fn set_config(&self, config: AppLockConfig) {
        *self.config.lock().unwrap() = config;
    }
}
