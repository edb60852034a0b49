use client_core::error::CoreError;
use client_core::error::config::ConfigError;
use client_core::error::judge::JudgeError;
use client_core::error::manifest::ManifestError;
use client_core::error::solution::SolutionError;

use common::ErrorLocation;

use std::io::Error as IoError;
use std::panic::Location;

use thiserror::Error as ThisError;

/// Errors surfaced by the command-line front end.
///
/// Core errors keep their own summary and hint; the CLI adds only what the
/// terminal itself can get wrong.
#[derive(Debug, ThisError)]
pub enum CliError {
    /// Error from this app (logger, terminal output)
    #[error("CLI Error: {message} {location}")]
    Cli {
        message: String,
        location: ErrorLocation,
    },

    /// Arguments that parsed but make no sense together
    #[error("Invalid Input Error: {message} {location}")]
    InvalidInput {
        message: String,
        location: ErrorLocation,
    },

    /// Error from client-core operations (settings, judge, descriptor, ...)
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CliError {
    #[track_caller]
    pub fn cli(message: impl Into<String>) -> Self {
        CliError::Cli {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn summary(&self) -> String {
        match self {
            CliError::Cli { message, .. } => message.clone(),
            CliError::InvalidInput { message, .. } => message.clone(),
            CliError::Core(e) => e.summary(),
        }
    }

    pub fn hint(&self) -> Option<String> {
        match self {
            CliError::Core(e) => e.hint(),
            _ => None,
        }
    }
}

impl From<IoError> for CliError {
    #[track_caller]
    fn from(error: IoError) -> Self {
        CliError::cli(format!("Failed to write output: {error}"))
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Core(error.into())
    }
}

impl From<JudgeError> for CliError {
    fn from(error: JudgeError) -> Self {
        CliError::Core(error.into())
    }
}

impl From<ManifestError> for CliError {
    fn from(error: ManifestError) -> Self {
        CliError::Core(error.into())
    }
}

impl From<SolutionError> for CliError {
    fn from(error: SolutionError) -> Self {
        CliError::Core(error.into())
    }
}
