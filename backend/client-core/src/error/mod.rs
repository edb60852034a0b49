pub mod config;
pub mod editor;
pub mod ipc;
pub mod judge;
pub mod manifest;
pub mod problem_file;
pub mod relay;
pub mod solution;

use models::{ModelError, Response};

use thiserror::Error;

/// Any failure a host request or CLI command can end in.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Editor(#[from] editor::EditorError),

    #[error(transparent)]
    Ipc(#[from] ipc::IpcError),

    #[error(transparent)]
    Judge(#[from] judge::JudgeError),

    #[error(transparent)]
    Manifest(#[from] manifest::ManifestError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    ProblemFile(#[from] problem_file::ProblemFileError),

    #[error(transparent)]
    Relay(#[from] relay::RelayError),

    #[error(transparent)]
    Solution(#[from] solution::SolutionError),
}

impl CoreError {
    /// Human-readable summary without the source location.
    pub fn summary(&self) -> String {
        match self {
            CoreError::Config(e) => e.summary(),
            CoreError::Editor(e) => e.summary(),
            CoreError::Ipc(e) => e.summary(),
            CoreError::Judge(e) => e.summary(),
            CoreError::Manifest(e) => e.summary(),
            CoreError::Model(ModelError::Validation { message, .. }) => message.clone(),
            CoreError::ProblemFile(e) => e.summary(),
            CoreError::Relay(e) => e.summary(),
            CoreError::Solution(e) => e.summary(),
        }
    }

    /// Remediation text, when there is something the user can do.
    pub fn hint(&self) -> Option<String> {
        match self {
            CoreError::Config(e) => e.hint(),
            CoreError::Editor(e) => Some(e.hint()),
            CoreError::Ipc(e) => e.hint(),
            CoreError::Judge(e) => e.hint(),
            CoreError::Manifest(e) => e.hint(),
            CoreError::Model(_) => None,
            CoreError::ProblemFile(_) => None,
            CoreError::Relay(e) => Some(e.hint()),
            CoreError::Solution(e) => e.hint(),
        }
    }

    /// Structured failure sent back over the IPC channel.
    pub fn to_response(&self) -> Response {
        let response = Response::failure(self.summary());
        match self.hint() {
            Some(hint) => response.with_hint(hint),
            None => response,
        }
    }
}
