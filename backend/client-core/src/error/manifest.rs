use crate::CLI_BINARY;

use common::ErrorLocation;

use std::io::Error as IoError;
use std::panic::Location;
use std::path::PathBuf;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ManifestError {
    #[error("Unsupported Platform Error: {platform} {location}")]
    UnsupportedPlatform {
        platform: String,
        location: ErrorLocation,
    },

    #[error("Home Directory Not Found Error {location}")]
    HomeNotFound { location: ErrorLocation },

    #[error("Invalid Extension Id Error: {id} {location}")]
    InvalidExtensionId { id: String, location: ErrorLocation },

    #[error("Host Not Installed Error: {path} {location}")]
    NotInstalled {
        path: PathBuf,
        location: ErrorLocation,
    },

    #[error("Manifest IO Error: {path}: {source} {location}")]
    Io {
        path: PathBuf,
        #[source]
        source: IoError,
        location: ErrorLocation,
    },

    #[error("Manifest JSON Error: {path}: {message} {location}")]
    Json {
        path: PathBuf,
        message: String,
        location: ErrorLocation,
    },
}

impl ManifestError {
    #[track_caller]
    pub fn io(path: impl Into<PathBuf>, source: IoError) -> Self {
        ManifestError::Io {
            path: path.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn json(path: impl Into<PathBuf>, error: &serde_json::Error) -> Self {
        ManifestError::Json {
            path: path.into(),
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_installed(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotInstalled {
            path: path.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn summary(&self) -> String {
        match self {
            ManifestError::UnsupportedPlatform { platform, .. } => {
                format!("Unsupported platform: {platform}")
            }
            ManifestError::HomeNotFound { .. } => {
                String::from("Could not locate the home directory")
            }
            ManifestError::InvalidExtensionId { id, .. } => format!("Invalid extension ID: {id}"),
            ManifestError::NotInstalled { path, .. } => {
                format!("Native host is not installed ({} is missing)", path.display())
            }
            ManifestError::Io { path, source, .. } => format!("{}: {source}", path.display()),
            ManifestError::Json { path, message, .. } => format!("{}: {message}", path.display()),
        }
    }

    pub fn hint(&self) -> Option<String> {
        match self {
            ManifestError::InvalidExtensionId { .. } => Some(String::from(
                "Extension IDs are 32 lowercase letters. Find yours at chrome://extensions with Developer mode enabled.",
            )),
            ManifestError::NotInstalled { .. } | ManifestError::Json { .. } => {
                Some(format!("Run: {CLI_BINARY} setup"))
            }
            _ => None,
        }
    }
}
