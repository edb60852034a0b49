//! Settings persistence behind the `ConfigStore` seam.

use crate::config::{CONFIG_FILE_NAME, UserConfig};
use crate::error::config::ConfigError;

use common::{ErrorLocation, RedactedToken};

use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use log::{debug, info, warn};

/// The two opaque secrets borrowed from the browser session.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub session: RedactedToken,
    pub csrf: RedactedToken,
}

/// Source of judge credentials.
pub trait CredentialSupplier: Send + Sync {
    fn credentials(&self) -> Result<Option<Credentials>, ConfigError>;
}

/// Load and persist [`UserConfig`].
pub trait ConfigStore: Send + Sync {
    fn load(&self) -> Result<UserConfig, ConfigError>;

    fn save(&self, config: &UserConfig) -> Result<(), ConfigError>;

    /// Load, apply one update, validate and persist.
    fn set(&self, key: &str, value: &str) -> Result<UserConfig, ConfigError> {
        let mut config = self.load()?;
        config.set(key, value)?;
        self.save(&config)?;
        Ok(config)
    }
}

// ============================================
// FILE STORE
// ============================================

/// JSON file store, `~/.leetcode-exporter.json` by default.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location in the user's home directory.
    #[track_caller]
    pub fn default_location() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or_else(|| ConfigError::HomeNotFound {
            location: ErrorLocation::from(Location::caller()),
        })?;
        Ok(Self::new(home.join(CONFIG_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| CONFIG_FILE_NAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl FileConfigStore {
    /// Missing file yields defaults. A file that exists but cannot be read,
    /// parsed or validated is an error.
    fn read_strict(&self) -> Result<UserConfig, ConfigError> {
        if !self.path.exists() {
            debug!(
                "Config file not found at {}, using defaults",
                self.path.display()
            );
            return Ok(UserConfig::default());
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            warn!("Failed to read config file: {e}");
            ConfigError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: self.path.clone(),
                source: e,
            }
        })?;

        let config: UserConfig =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        config.validate()?;

        debug!("Config loaded from {}", self.path.display());
        Ok(config)
    }
}

impl ConfigStore for FileConfigStore {
    /// Like the strict read, except that a file which is not valid JSON
    /// yields the defaults. The file itself is left alone.
    fn load(&self) -> Result<UserConfig, ConfigError> {
        match self.read_strict() {
            Err(e @ ConfigError::ParseError { .. }) => {
                warn!("{}, using defaults", e.summary());
                Ok(UserConfig::default())
            }
            result => result,
        }
    }

    /// Refuses to replace a file that is not valid JSON.
    fn set(&self, key: &str, value: &str) -> Result<UserConfig, ConfigError> {
        let mut config = self.read_strict()?;
        config.set(key, value)?;
        self.save(&config)?;
        Ok(config)
    }

    /// Atomic write: temp file next to the target, then rename.
    fn save(&self, config: &UserConfig) -> Result<(), ConfigError> {
        config.validate()?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                location: ErrorLocation::from(Location::caller()),
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json =
            serde_json::to_string_pretty(config).map_err(|e| ConfigError::SerializeError {
                location: ErrorLocation::from(Location::caller()),
                reason: e.to_string(),
            })?;

        let temp_path = self.temp_path();
        std::fs::write(&temp_path, json).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, &self.path).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: self.path.clone(),
            source: e,
        })?;

        info!("Config saved to {}", self.path.display());
        Ok(())
    }
}

impl CredentialSupplier for FileConfigStore {
    fn credentials(&self) -> Result<Option<Credentials>, ConfigError> {
        Ok(self.load()?.credentials())
    }
}

// ============================================
// MEMORY STORE
// ============================================

/// In-process store for tests and one-shot callers.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    inner: Mutex<UserConfig>,
}

impl MemoryConfigStore {
    pub fn new(config: UserConfig) -> Self {
        Self {
            inner: Mutex::new(config),
        }
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> Result<UserConfig, ConfigError> {
        Ok(self
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, config: &UserConfig) -> Result<(), ConfigError> {
        config.validate()?;
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = config.clone();
        Ok(())
    }
}

impl CredentialSupplier for MemoryConfigStore {
    fn credentials(&self) -> Result<Option<Credentials>, ConfigError> {
        Ok(self.load()?.credentials())
    }
}
