//! Error types for the remote judge client.
//!
//! - HTTP status codes are stored directly, never parsed back out of strings
//! - `is_retryable()` decides whether a failed poll counts as a pending attempt
//! - every variant carries an `ErrorLocation`

use crate::CLI_BINARY;
use crate::error::config::ConfigError;

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use models::ModelError;
use thiserror::Error as ThisError;

pub const NOT_LOGGED_IN_MESSAGE: &str =
    "Not logged in. Visit LeetCode in Chrome with the extension installed.";
pub const AUTH_FAILED_MESSAGE: &str =
    "Auth failed. Re-visit LeetCode in browser to refresh session.";

#[derive(Debug, ThisError)]
pub enum JudgeError {
    /// Credentials are missing or were rejected with 401/403.
    #[error("Auth Error: {message} {location}")]
    Auth {
        message: String,
        location: ErrorLocation,
    },

    /// The judge refused to start (or continue) the job. Message is verbatim.
    #[error("Submit Error: {message} {location}")]
    Submit {
        message: String,
        location: ErrorLocation,
    },

    #[error("Poll Timeout Error: no verdict after {attempts} polls {location}")]
    PollTimeout {
        attempts: u32,
        location: ErrorLocation,
    },

    #[error("HTTP Error: HTTP {status_code} - {message} {location}")]
    Http {
        status_code: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("Network Error: {message} {location}")]
    Network {
        message: String,
        is_timeout: bool,
        is_connection: bool,
        location: ErrorLocation,
    },

    #[error("JSON Error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },

    #[error("Credential Error: {message} {location}")]
    Credentials {
        message: String,
        location: ErrorLocation,
    },

    #[error("Report Error: {message} {location}")]
    Report {
        message: String,
        location: ErrorLocation,
    },
}

impl JudgeError {
    #[track_caller]
    pub fn auth(message: impl Into<String>) -> Self {
        JudgeError::Auth {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn submit(message: impl Into<String>) -> Self {
        JudgeError::Submit {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn poll_timeout(attempts: u32) -> Self {
        JudgeError::PollTimeout {
            attempts,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create from reqwest error with proper categorization.
    #[track_caller]
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        let is_timeout = error.is_timeout();
        let is_connect = error.is_connect();

        if is_timeout || is_connect {
            return JudgeError::Network {
                message: error.to_string(),
                is_timeout,
                is_connection: is_connect,
                location: ErrorLocation::from(Location::caller()),
            };
        }

        if let Some(status) = error.status() {
            return JudgeError::Http {
                status_code: HttpStatusCode(status.as_u16()),
                message: error.to_string(),
                location: ErrorLocation::from(Location::caller()),
            };
        }

        if error.is_decode() {
            return JudgeError::Json {
                message: error.to_string(),
                location: ErrorLocation::from(Location::caller()),
            };
        }

        JudgeError::Network {
            message: error.to_string(),
            is_timeout: false,
            is_connection: false,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create from an HTTP response with an explicit status code.
    #[track_caller]
    pub fn from_http_response(status_code: u16, body: impl Into<String>) -> Self {
        let status_code = HttpStatusCode(status_code);

        if status_code.is_auth_failure() {
            return JudgeError::auth(AUTH_FAILED_MESSAGE);
        }

        JudgeError::Http {
            status_code,
            message: body.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Transient failures that a poll loop may absorb as a pending attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            JudgeError::Network {
                is_timeout,
                is_connection,
                ..
            } => *is_timeout || *is_connection,
            JudgeError::Http { status_code, .. } => status_code.is_retryable(),
            JudgeError::Auth { .. } => false,
            JudgeError::Submit { .. } => false,
            JudgeError::PollTimeout { .. } => false,
            JudgeError::Json { .. } => false,
            JudgeError::UrlParse { .. } => false,
            JudgeError::Credentials { .. } => false,
            JudgeError::Report { .. } => false,
        }
    }

    /// Short category name used in log lines.
    pub fn error_category(&self) -> &'static str {
        match self {
            JudgeError::Auth { .. } => "auth",
            JudgeError::Submit { .. } => "submit",
            JudgeError::PollTimeout { .. } => "poll_timeout",
            JudgeError::Http { status_code, .. } if status_code.is_client_error() => {
                "client_error"
            }
            JudgeError::Http { status_code, .. } if status_code.is_server_error() => {
                "server_error"
            }
            JudgeError::Http { .. } => "http",
            JudgeError::Network {
                is_timeout: true, ..
            } => "timeout",
            JudgeError::Network {
                is_connection: true,
                ..
            } => "connection",
            JudgeError::Network { .. } => "network",
            JudgeError::Json { .. } => "json",
            JudgeError::UrlParse { .. } => "url",
            JudgeError::Credentials { .. } => "credentials",
            JudgeError::Report { .. } => "report",
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            JudgeError::Http { status_code, .. } => Some(status_code.0),
            _ => None,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            JudgeError::Auth { message, .. } => message.clone(),
            JudgeError::Submit { message, .. } => message.clone(),
            JudgeError::PollTimeout { .. } => {
                String::from("Timed out waiting for the judge result")
            }
            JudgeError::Http { status_code, .. } => format!("Request failed: {status_code}"),
            JudgeError::Network { message, .. } => message.clone(),
            JudgeError::Json { message, .. } => message.clone(),
            JudgeError::UrlParse { message, .. } => message.clone(),
            JudgeError::Credentials { message, .. } => message.clone(),
            JudgeError::Report { message, .. } => message.clone(),
        }
    }

    pub fn hint(&self) -> Option<String> {
        match self {
            JudgeError::Auth { .. } => Some(String::from(
                "Open leetcode.com in Chrome while signed in so the extension can refresh your session.",
            )),
            JudgeError::PollTimeout { .. } => Some(String::from(
                "The judge is busy. Check the submission on leetcode.com or try again later.",
            )),
            JudgeError::Network { .. } => {
                Some(String::from("Check your network connection and try again."))
            }
            JudgeError::Credentials { .. } => Some(format!(
                "Inspect your settings with: {CLI_BINARY} config"
            )),
            _ => None,
        }
    }
}

impl From<url::ParseError> for JudgeError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        JudgeError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for JudgeError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        JudgeError::from_reqwest(&error)
    }
}

impl From<serde_json::Error> for JudgeError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        JudgeError::Json {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ConfigError> for JudgeError {
    #[track_caller]
    fn from(error: ConfigError) -> Self {
        JudgeError::Credentials {
            message: error.summary(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ModelError> for JudgeError {
    #[track_caller]
    fn from(error: ModelError) -> Self {
        let ModelError::Validation { message, .. } = error;
        JudgeError::Report {
            message,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
