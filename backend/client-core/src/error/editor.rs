use common::ErrorLocation;

use std::panic::Location;

use const_format::concatcp;
use thiserror::Error as ThisError;

use crate::CLI_BINARY;

pub const EDITOR_NOT_FOUND_HINT: &str = concatcp!(
    "Install VS Code with its `code` shell command, or pick an editor with: ",
    CLI_BINARY,
    " config editor <command>"
);

#[derive(Debug, ThisError)]
pub enum EditorError {
    /// Every launch descriptor in the chain failed to spawn or exited nonzero.
    #[error("Editor Not Found: tried {} {location}", attempts.join(", "))]
    NotFound {
        attempts: Vec<String>,
        location: ErrorLocation,
    },
}

impl EditorError {
    #[track_caller]
    pub fn not_found(attempts: Vec<String>) -> Self {
        EditorError::NotFound {
            attempts,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn summary(&self) -> String {
        match self {
            EditorError::NotFound { attempts, .. } => {
                format!("Could not open an editor (tried {})", attempts.join(", "))
            }
        }
    }

    pub fn hint(&self) -> String {
        String::from(EDITOR_NOT_FOUND_HINT)
    }
}
