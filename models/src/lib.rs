//! Domain models for leetcode-exporter.
//!
//! This crate contains the data that crosses process boundaries: the
//! problem scraped from a page, the request/response pair carried inside an
//! IPC envelope and the normalized judge report. Models carry validation but
//! no I/O - the transport and the judge client live in `client-core`.

pub mod error;
pub mod judge_report;
pub mod message;
pub mod problem;
mod wire;

pub use common::ErrorLocation;
pub use error::model_error::ModelError;
pub use judge_report::builder::JudgeReportBuilder;
pub use judge_report::{FailedCase, JudgeOutcome, JudgeReport};
pub use message::{ConfigView, Request, Response};
pub use problem::{ProblemRecord, TestCase};

#[cfg(test)]
mod tests;
