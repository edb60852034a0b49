use crate::CLI_BINARY;
use crate::error::ipc::IpcError;

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

pub const DEFAULT_RELAY_HINT: &str = const_format::concatcp!(
    "Make sure you ran \"",
    CLI_BINARY,
    " setup\" and the native host is registered."
);

#[derive(Debug, ThisError)]
pub enum RelayError {
    /// The calling extension is not in the host descriptor's allow-list.
    #[error("Access Denied Error: {caller_id} is not an allowed origin {location}")]
    AccessDenied {
        caller_id: String,
        location: ErrorLocation,
    },

    /// The host program could not be started or went away mid-exchange.
    #[error("Host Unreachable Error: {message} {location}")]
    Unreachable {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Ipc(#[from] IpcError),
}

impl RelayError {
    #[track_caller]
    pub fn access_denied(caller_id: impl Into<String>) -> Self {
        RelayError::AccessDenied {
            caller_id: caller_id.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unreachable(message: impl Into<String>) -> Self {
        RelayError::Unreachable {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn is_access_denied(&self) -> bool {
        matches!(self, RelayError::AccessDenied { .. })
    }

    pub fn summary(&self) -> String {
        match self {
            RelayError::AccessDenied { .. } => {
                String::from("Access to the specified native messaging host is forbidden.")
            }
            RelayError::Unreachable { message, .. } => message.clone(),
            RelayError::Ipc(e) => e.summary(),
        }
    }

    pub fn hint(&self) -> String {
        match self {
            RelayError::AccessDenied { caller_id, .. } => {
                format!("Run this command to register: {CLI_BINARY} register {caller_id}")
            }
            _ => String::from(DEFAULT_RELAY_HINT),
        }
    }
}
