use crate::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

/// Raised when a session secret is about to leave the process in the clear.
#[derive(Debug, ThisError)]
pub enum RedactError {
    /// A secret reached a serializer. Read it through `as_str()` instead.
    #[error("Secret Exposure Error: {kind} cannot be serialized {location}")]
    Exposure {
        kind: &'static str,
        location: ErrorLocation,
    },
}

impl RedactError {
    #[track_caller]
    pub fn exposure(kind: &'static str) -> Self {
        RedactError::Exposure {
            kind,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
