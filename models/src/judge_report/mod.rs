//! Normalized outcome of one judge polling cycle.

pub mod builder;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Verdict class of a finished judge job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JudgeOutcome {
    Accepted,
    WrongAnswer,
    CompileError,
    RuntimeError,
    TimeLimitExceeded,
    /// Any other terminal status. The raw status text says what happened.
    Unknown,
}

impl fmt::Display for JudgeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            JudgeOutcome::Accepted => "Accepted",
            JudgeOutcome::WrongAnswer => "Wrong Answer",
            JudgeOutcome::CompileError => "Compile Error",
            JudgeOutcome::RuntimeError => "Runtime Error",
            JudgeOutcome::TimeLimitExceeded => "Time Limit Exceeded",
            JudgeOutcome::Unknown => "Unknown",
        };
        write!(f, "{text}")
    }
}

/// First failing test case, exactly as the judge reported it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedCase {
    pub input: String,
    pub expected: String,
    pub actual: String,
}

/// Terminal result of a test or submit job.
///
/// Built once through [`JudgeReportBuilder`](builder::JudgeReportBuilder) and
/// read through accessors afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgeReport {
    outcome: JudgeOutcome,
    raw_status_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    runtime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    runtime_percentile: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    memory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    memory_percentile: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    compile_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    runtime_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    failed_case: Option<FailedCase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    passed_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    total_count: Option<u32>,
}

impl JudgeReport {
    pub fn outcome(&self) -> JudgeOutcome {
        self.outcome
    }

    pub fn is_accepted(&self) -> bool {
        self.outcome == JudgeOutcome::Accepted
    }

    pub fn raw_status_text(&self) -> &str {
        &self.raw_status_text
    }

    pub fn runtime(&self) -> Option<&str> {
        self.runtime.as_deref()
    }

    pub fn runtime_percentile(&self) -> Option<f64> {
        self.runtime_percentile
    }

    pub fn memory(&self) -> Option<&str> {
        self.memory.as_deref()
    }

    pub fn memory_percentile(&self) -> Option<f64> {
        self.memory_percentile
    }

    pub fn compile_error(&self) -> Option<&str> {
        self.compile_error.as_deref()
    }

    pub fn runtime_error(&self) -> Option<&str> {
        self.runtime_error.as_deref()
    }

    pub fn failed_case(&self) -> Option<&FailedCase> {
        self.failed_case.as_ref()
    }

    pub fn passed_count(&self) -> Option<u32> {
        self.passed_count
    }

    pub fn total_count(&self) -> Option<u32> {
        self.total_count
    }
}
