use common::ErrorLocation;

use std::io::Error as IoError;
use std::panic::Location;
use std::path::PathBuf;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum SolutionError {
    #[error("Solution Not Found Error: {dir} {location}")]
    NotFound { dir: PathBuf, location: ErrorLocation },

    #[error("Missing Question Id Error: {dir} {location}")]
    MissingQuestionId { dir: PathBuf, location: ErrorLocation },

    #[error("Missing Test Input Error: {path} {location}")]
    MissingTestInput {
        path: PathBuf,
        location: ErrorLocation,
    },

    #[error("Unsupported Language Error: {extension} {location}")]
    UnsupportedLanguage {
        extension: String,
        location: ErrorLocation,
    },

    #[error("Solution Read Error: {path}: {source} {location}")]
    Read {
        path: PathBuf,
        #[source]
        source: IoError,
        location: ErrorLocation,
    },
}

impl SolutionError {
    #[track_caller]
    pub fn read(path: impl Into<PathBuf>, source: IoError) -> Self {
        SolutionError::Read {
            path: path.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn summary(&self) -> String {
        match self {
            SolutionError::NotFound { dir, .. } => {
                format!("No solution file found in {}", dir.display())
            }
            SolutionError::MissingQuestionId { dir, .. } => {
                format!("Cannot determine question ID from {}", dir.display())
            }
            SolutionError::MissingTestInput { path, .. } => {
                format!("No test cases found in {}", path.display())
            }
            SolutionError::UnsupportedLanguage { extension, .. } => {
                format!("Unsupported file extension: {extension}")
            }
            SolutionError::Read { path, source, .. } => {
                format!("Could not read {}: {source}", path.display())
            }
        }
    }

    pub fn hint(&self) -> Option<String> {
        match self {
            SolutionError::NotFound { .. } => Some(String::from(
                "Run from a problem folder or pass the path to a solution file.",
            )),
            SolutionError::MissingQuestionId { .. } => Some(String::from(
                "Problem folders are named <id>-<slug>, e.g. 1-two-sum.",
            )),
            SolutionError::MissingTestInput { .. } => Some(String::from(
                "Add an \"Input:\" line under the \"Test Cases:\" section of the file header.",
            )),
            _ => None,
        }
    }
}
