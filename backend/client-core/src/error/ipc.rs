use common::ErrorLocation;

use std::io::Error as IoError;
use std::panic::Location;

use thiserror::Error as ThisError;

pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON";

#[derive(Debug, ThisError)]
pub enum IpcError {
    /// The envelope could not be turned into a message.
    #[error("Framing Error: {message} {location}")]
    Framing {
        message: String,
        location: ErrorLocation,
    },

    #[error("Unknown Action Error: {action} {location}")]
    UnknownAction {
        action: String,
        location: ErrorLocation,
    },

    #[error("Invalid Request Error: {message} {location}")]
    InvalidRequest {
        message: String,
        location: ErrorLocation,
    },

    #[error("IO Error: {message} {location}")]
    Io {
        message: String,
        location: ErrorLocation,
    },

    #[error("JSON Encode Error: {message} {location}")]
    Encode {
        message: String,
        location: ErrorLocation,
    },

    #[error("Timeout Error: no answer within {timeout_secs}s {location}")]
    Timeout {
        timeout_secs: u64,
        location: ErrorLocation,
    },
}

impl IpcError {
    #[track_caller]
    pub fn framing(message: impl Into<String>) -> Self {
        IpcError::Framing {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn timeout(timeout_secs: u64) -> Self {
        IpcError::Timeout {
            timeout_secs,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Whether the envelope itself was unusable, as opposed to a well-formed
    /// envelope carrying a request we refuse.
    pub fn is_framing(&self) -> bool {
        matches!(self, IpcError::Framing { .. })
    }

    pub fn summary(&self) -> String {
        match self {
            IpcError::Framing { message, .. } => message.clone(),
            IpcError::UnknownAction { action, .. } => format!("Invalid action: {action}"),
            IpcError::InvalidRequest { message, .. } => message.clone(),
            IpcError::Io { message, .. } => message.clone(),
            IpcError::Encode { message, .. } => message.clone(),
            IpcError::Timeout { .. } => String::from("Timeout"),
        }
    }

    pub fn hint(&self) -> Option<String> {
        match self {
            IpcError::Framing { .. } | IpcError::UnknownAction { .. } => Some(String::from(
                "The extension and the native host are out of sync. Reinstall both from the same release.",
            )),
            _ => None,
        }
    }
}

impl From<IoError> for IpcError {
    #[track_caller]
    fn from(error: IoError) -> Self {
        IpcError::Io {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for IpcError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        IpcError::Encode {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
