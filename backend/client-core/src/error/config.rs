use common::ErrorLocation;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config Read Error: {path}: {source} {location}")]
    ReadError {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config Parse Error: {path}: {reason} {location}")]
    ParseError {
        location: ErrorLocation,
        path: PathBuf,
        reason: String,
    },

    #[error("Config Write Error: {path}: {source} {location}")]
    WriteError {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Home Directory Not Found Error {location}")]
    HomeNotFound { location: ErrorLocation },

    #[error("Config Serialization Error: {reason} {location}")]
    SerializeError {
        location: ErrorLocation,
        reason: String,
    },

    #[error("Config Validation Error: {reason} {location}")]
    ValidationError {
        location: ErrorLocation,
        reason: String,
    },
}

impl ConfigError {
    pub fn summary(&self) -> String {
        match self {
            ConfigError::ReadError { path, source, .. } => {
                format!("Could not read {}: {source}", path.display())
            }
            ConfigError::ParseError { path, reason, .. } => {
                format!("Settings file {} is not valid JSON: {reason}", path.display())
            }
            ConfigError::WriteError { path, source, .. } => {
                format!("Could not write {}: {source}", path.display())
            }
            ConfigError::HomeNotFound { .. } => String::from("Could not locate the home directory"),
            ConfigError::SerializeError { reason, .. } => reason.clone(),
            ConfigError::ValidationError { reason, .. } => reason.clone(),
        }
    }

    pub fn hint(&self) -> Option<String> {
        match self {
            ConfigError::ParseError { path, .. } => Some(format!(
                "Fix or delete {} before changing settings.",
                path.display()
            )),
            _ => None,
        }
    }
}
