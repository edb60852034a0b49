//! Native-messaging host descriptor (`com.leetcode.exporter.json`).
//!
//! The browser reads this file to find the host program and to decide which
//! extensions may talk to it.

use crate::HOST_NAME;
use crate::error::manifest::ManifestError;

use common::ErrorLocation;

use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use log::info;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const HOST_DESCRIPTION: &str = "LeetCode Exporter";
pub const HOST_TYPE: &str = "stdio";
pub const ORIGIN_SCHEME: &str = "chrome-extension://";
const PLACEHOLDER_EXTENSION_ID: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
const EXTENSION_ID_PATTERN: &str = r"^[a-z]{32}$";

static EXTENSION_ID_REGEX: OnceLock<Regex> = OnceLock::new();

pub(crate) fn get_extension_id_regex() -> &'static Regex {
    EXTENSION_ID_REGEX
        .get_or_init(|| Regex::new(EXTENSION_ID_PATTERN).expect("valid regex pattern"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostManifest {
    pub name: String,
    pub description: String,
    pub path: PathBuf,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl HostManifest {
    /// Descriptor for `host_path` with a placeholder origin until `register`.
    pub fn new(host_path: impl Into<PathBuf>) -> Self {
        Self {
            name: HOST_NAME.to_string(),
            description: HOST_DESCRIPTION.to_string(),
            path: host_path.into(),
            kind: HOST_TYPE.to_string(),
            allowed_origins: vec![origin_for(PLACEHOLDER_EXTENSION_ID)],
        }
    }

    pub fn allows(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|allowed| allowed == origin)
    }

    /// Extension id of the first allowed origin.
    pub fn first_extension_id(&self) -> Option<&str> {
        self.allowed_origins
            .first()?
            .strip_prefix(ORIGIN_SCHEME)?
            .strip_suffix('/')
    }

    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        if !path.exists() {
            return Err(ManifestError::not_installed(path));
        }
        let contents =
            std::fs::read_to_string(path).map_err(|e| ManifestError::io(path, e))?;
        serde_json::from_str(&contents).map_err(|e| ManifestError::json(path, &e))
    }

    /// Atomic write: temp file next to the target, then rename.
    pub fn save(&self, path: &Path) -> Result<(), ManifestError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ManifestError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| ManifestError::json(path, &e))?;
        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, json).map_err(|e| ManifestError::io(&temp_path, e))?;
        std::fs::rename(&temp_path, path).map_err(|e| ManifestError::io(path, e))
    }
}

/// `chrome-extension://<id>/`
pub fn origin_for(extension_id: &str) -> String {
    format!("{ORIGIN_SCHEME}{extension_id}/")
}

/// Trim, lowercase and check an extension id (32 letters a-z).
#[track_caller]
pub fn normalize_extension_id(id: &str) -> Result<String, ManifestError> {
    let clean = id.trim().to_lowercase();
    if get_extension_id_regex().is_match(&clean) {
        Ok(clean)
    } else {
        Err(ManifestError::InvalidExtensionId {
            id: id.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

/// The browser's per-user NativeMessagingHosts directory.
#[track_caller]
pub fn hosts_dir() -> Result<PathBuf, ManifestError> {
    let home = dirs::home_dir().ok_or_else(|| ManifestError::HomeNotFound {
        location: ErrorLocation::from(Location::caller()),
    })?;

    if cfg!(target_os = "macos") {
        Ok(home
            .join("Library")
            .join("Application Support")
            .join("Google")
            .join("Chrome")
            .join("NativeMessagingHosts"))
    } else if cfg!(windows) {
        let local = dirs::data_local_dir().unwrap_or_else(|| home.join("AppData").join("Local"));
        Ok(local
            .join("Google")
            .join("Chrome")
            .join("User Data")
            .join("NativeMessagingHosts"))
    } else if cfg!(target_os = "linux") {
        Ok(home
            .join(".config")
            .join("google-chrome")
            .join("NativeMessagingHosts"))
    } else {
        Err(ManifestError::UnsupportedPlatform {
            platform: std::env::consts::OS.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

pub fn manifest_file_name() -> String {
    format!("{HOST_NAME}.json")
}

/// Descriptor location for the current user.
pub fn default_manifest_path() -> Result<PathBuf, ManifestError> {
    Ok(hosts_dir()?.join(manifest_file_name()))
}

/// Write the descriptor for `host_path`, keeping origins already registered.
pub fn install(manifest_path: &Path, host_path: &Path) -> Result<HostManifest, ManifestError> {
    let mut manifest = HostManifest::new(host_path);
    if let Ok(existing) = HostManifest::load(manifest_path) {
        manifest.allowed_origins = existing.allowed_origins;
    }
    manifest.save(manifest_path)?;
    info!("Native messaging host registered at {}", manifest_path.display());
    Ok(manifest)
}

/// Narrow `allowed_origins` to one extension. Returns the normalized id.
pub fn register(manifest_path: &Path, extension_id: &str) -> Result<String, ManifestError> {
    let id = normalize_extension_id(extension_id)?;
    let mut manifest = HostManifest::load(manifest_path)?;
    manifest.allowed_origins = vec![origin_for(&id)];
    manifest.save(manifest_path)?;
    info!("Registered extension {id}");
    Ok(id)
}

/// Remove the descriptor. `Ok(false)` when it was not installed.
pub fn uninstall(manifest_path: &Path) -> Result<bool, ManifestError> {
    if !manifest_path.exists() {
        return Ok(false);
    }
    std::fs::remove_file(manifest_path).map_err(|e| ManifestError::io(manifest_path, e))?;
    info!("Removed {}", manifest_path.display());
    Ok(true)
}
