use common::ErrorLocation;

use std::io::Error as IoError;
use std::panic::Location;
use std::path::PathBuf;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ProblemFileError {
    /// The sanitized path resolved outside the workspace directory.
    #[error("Path Escape Error: {path} {location}")]
    OutsideWorkspace {
        path: PathBuf,
        location: ErrorLocation,
    },

    #[error("Write Error: {path}: {source} {location}")]
    Write {
        path: PathBuf,
        #[source]
        source: IoError,
        location: ErrorLocation,
    },
}

impl ProblemFileError {
    #[track_caller]
    pub fn write(path: impl Into<PathBuf>, source: IoError) -> Self {
        ProblemFileError::Write {
            path: path.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn summary(&self) -> String {
        match self {
            ProblemFileError::OutsideWorkspace { .. } => String::from("Invalid file path"),
            ProblemFileError::Write { path, source, .. } => {
                format!("Could not write {}: {source}", path.display())
            }
        }
    }
}
