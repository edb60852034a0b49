pub mod store;

pub use store::{ConfigStore, CredentialSupplier, Credentials, FileConfigStore, MemoryConfigStore};

use crate::error::config::ConfigError;

use common::{ErrorLocation, RedactedToken};
use models::ConfigView;

use std::collections::BTreeMap;
use std::fmt;
use std::panic::Location;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const CONFIG_FILE_NAME: &str = ".leetcode-exporter.json";
pub const DEFAULT_WORKSPACE_DIR_NAME: &str = "leetcode";
pub const AUTO_EDITOR: &str = "auto";

pub const KEY_WORKSPACE_DIR: &str = "workspaceDir";
pub const KEY_EDITOR: &str = "editor";
pub const KEY_LEETCODE_SESSION: &str = "leetcodeSession";
pub const KEY_LEETCODE_CSRF: &str = "leetcodeCsrf";

// ============================================
// CONFIG STRUCT
// ============================================

/// Flat key-value settings shared by the CLI and the host.
///
/// Keys are camelCase on disk. Keys this version does not know about are
/// kept in `extra` and written back untouched.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConfig {
    #[serde(default = "default_workspace_dir")]
    pub workspace_dir: String,

    #[serde(default = "default_editor")]
    pub editor: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leetcode_session: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leetcode_csrf: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            workspace_dir: default_workspace_dir(),
            editor: default_editor(),
            leetcode_session: None,
            leetcode_csrf: None,
            extra: BTreeMap::new(),
        }
    }
}

impl fmt::Debug for UserConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserConfig")
            .field("workspace_dir", &self.workspace_dir)
            .field("editor", &self.editor)
            .field("has_session", &self.leetcode_session.is_some())
            .field("has_csrf", &self.leetcode_csrf.is_some())
            .field("extra", &self.extra)
            .finish()
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_workspace_dir() -> String {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_WORKSPACE_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_WORKSPACE_DIR_NAME))
        .to_string_lossy()
        .into_owned()
}

fn default_editor() -> String {
    AUTO_EDITOR.to_string()
}

// ============================================
// IMPLEMENTATION
// ============================================

impl UserConfig {
    /// Apply one `key = value` update.
    ///
    /// An empty value clears a secret. Unknown keys are stored as strings.
    #[track_caller]
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: String::from("Setting name cannot be empty"),
            });
        }

        match key {
            KEY_WORKSPACE_DIR => self.workspace_dir = value.to_string(),
            KEY_EDITOR => self.editor = value.to_string(),
            KEY_LEETCODE_SESSION => self.leetcode_session = non_empty(value),
            KEY_LEETCODE_CSRF => self.leetcode_csrf = non_empty(value),
            other => {
                self.extra
                    .insert(other.to_string(), Value::String(value.to_string()));
            }
        }

        self.validate()
    }

    /// Look up a key as shown to callers (secrets appear only as flags).
    pub fn get(&self, key: &str) -> Option<Value> {
        serde_json::to_value(self.view())
            .ok()
            .and_then(|view| view.get(key).cloned())
    }

    /// Settings with the two secrets reduced to presence flags.
    pub fn view(&self) -> ConfigView {
        ConfigView {
            workspace_dir: self.workspace_dir.clone(),
            editor: self.editor.clone(),
            has_session: self.leetcode_session.is_some(),
            has_csrf: self.leetcode_csrf.is_some(),
            extra: self.extra.clone(),
        }
    }

    /// Borrowed browser-session secrets. `None` when no session is stored.
    pub fn credentials(&self) -> Option<Credentials> {
        let session = self.leetcode_session.as_deref().filter(|s| !s.is_empty())?;
        Some(Credentials {
            session: RedactedToken::new(session),
            csrf: RedactedToken::new(self.leetcode_csrf.clone().unwrap_or_default()),
        })
    }

    pub fn uses_auto_editor(&self) -> bool {
        self.editor.trim().is_empty() || self.editor == AUTO_EDITOR
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    #[track_caller]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workspace_dir.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("{KEY_WORKSPACE_DIR} cannot be empty"),
            });
        }

        if self.editor.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("{KEY_EDITOR} cannot be empty (use \"{AUTO_EDITOR}\")"),
            });
        }

        for reserved in ["hasSession", "hasCsrf"] {
            if self.extra.contains_key(reserved) {
                return Err(ConfigError::ValidationError {
                    location: ErrorLocation::from(Location::caller()),
                    reason: format!("{reserved} is derived and cannot be set"),
                });
            }
        }

        Ok(())
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
