//! Remote judge client.
//!
//! A job goes through an explicit state machine:
//!
//! ```text
//! Unauthenticated -> Submitting -> Polling -> Completed
//!                                     \----> TimedOut
//! ```
//!
//! Credentials come from a [`CredentialSupplier`](crate::config::CredentialSupplier),
//! waits between polls go through an injected [`Sleeper`].

pub mod client;
pub mod report;
pub mod sleeper;

pub use client::JudgeClient;
pub use sleeper::{Sleeper, TokioSleeper};

use std::time::Duration;

pub const MAX_POLL_ATTEMPTS: u32 = 60;
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// What the judge should do with the code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobKind {
    /// Run against caller-supplied input (`interpret_solution`).
    Test { test_cases: String },
    /// Full judging against the hidden suite.
    Submit,
}

impl JobKind {
    pub fn label(&self) -> &'static str {
        match self {
            JobKind::Test { .. } => "test",
            JobKind::Submit => "submit",
        }
    }
}

/// One test or submit request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgeJob {
    pub kind: JobKind,
    pub slug: String,
    pub question_id: String,
    pub code: String,
    pub language: String,
}

impl JudgeJob {
    pub fn test(
        slug: impl Into<String>,
        question_id: impl Into<String>,
        code: impl Into<String>,
        language: impl Into<String>,
        test_cases: impl Into<String>,
    ) -> Self {
        Self {
            kind: JobKind::Test {
                test_cases: test_cases.into(),
            },
            slug: slug.into(),
            question_id: question_id.into(),
            code: code.into(),
            language: language.into(),
        }
    }

    pub fn submit(
        slug: impl Into<String>,
        question_id: impl Into<String>,
        code: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            kind: JobKind::Submit,
            slug: slug.into(),
            question_id: question_id.into(),
            code: code.into(),
            language: language.into(),
        }
    }
}
