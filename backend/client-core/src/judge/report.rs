//! Normalization of the judge's check payload into a [`JudgeReport`].
//!
//! The check endpoint is unversioned and its field types drift (numbers as
//! strings, single values as arrays), so every field is read leniently.

use crate::error::judge::JudgeError;

use models::{FailedCase, JudgeOutcome, JudgeReport, JudgeReportBuilder};

use log::warn;
use serde::Deserialize;
use serde_json::Value;

const SUCCESS_STATE: &str = "SUCCESS";
const ACCEPTED: &str = "Accepted";
const WRONG_ANSWER: &str = "Wrong Answer";
const TIME_LIMIT_EXCEEDED: &str = "Time Limit Exceeded";

/// Raw body of `GET /submissions/detail/{id}/check/`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct CheckResponse {
    pub state: Option<Value>,
    pub status_msg: Option<Value>,
    pub status_runtime: Option<Value>,
    pub runtime_percentile: Option<Value>,
    pub status_memory: Option<Value>,
    pub memory_percentile: Option<Value>,
    pub full_compile_error: Option<Value>,
    pub compile_error: Option<Value>,
    pub full_runtime_error: Option<Value>,
    pub runtime_error: Option<Value>,
    pub input_formatted: Option<Value>,
    pub last_testcase: Option<Value>,
    pub expected_output: Option<Value>,
    pub expected_code_answer: Option<Value>,
    pub code_output: Option<Value>,
    pub code_answer: Option<Value>,
    pub total_correct: Option<Value>,
    pub total_testcases: Option<Value>,
}

impl CheckResponse {
    pub fn state(&self) -> Option<String> {
        text(self.state.as_ref())
    }

    pub fn status_msg(&self) -> Option<String> {
        text(self.status_msg.as_ref())
    }

    /// Terminal iff `state == "SUCCESS"` or a status message is present.
    pub fn is_terminal(&self) -> bool {
        self.state().as_deref() == Some(SUCCESS_STATE) || self.status_msg().is_some()
    }

    fn compile_error_text(&self) -> Option<String> {
        text(self.full_compile_error.as_ref()).or_else(|| text(self.compile_error.as_ref()))
    }

    fn runtime_error_text(&self) -> Option<String> {
        text(self.full_runtime_error.as_ref()).or_else(|| text(self.runtime_error.as_ref()))
    }

    /// Verdict class for a terminal payload.
    pub fn classify(&self) -> JudgeOutcome {
        let status = self.status_msg();
        match status.as_deref() {
            Some(ACCEPTED) => JudgeOutcome::Accepted,
            _ if self.compile_error_text().is_some() => JudgeOutcome::CompileError,
            _ if self.runtime_error_text().is_some() => JudgeOutcome::RuntimeError,
            Some(WRONG_ANSWER) => JudgeOutcome::WrongAnswer,
            Some(TIME_LIMIT_EXCEEDED) => JudgeOutcome::TimeLimitExceeded,
            _ => JudgeOutcome::Unknown,
        }
    }

    /// The first failing case, only when the payload carries one.
    fn failed_case(&self) -> Option<FailedCase> {
        let expected = text(self.expected_output.as_ref())
            .or_else(|| text(self.expected_code_answer.as_ref()))?;
        let actual =
            text(self.code_output.as_ref()).or_else(|| text(self.code_answer.as_ref()))?;
        let input = text(self.input_formatted.as_ref())
            .or_else(|| text(self.last_testcase.as_ref()))
            .unwrap_or_default();

        Some(FailedCase {
            input,
            expected,
            actual,
        })
    }

    fn counts(&self) -> (Option<u32>, Option<u32>) {
        let passed = count(self.total_correct.as_ref());
        let total = count(self.total_testcases.as_ref());
        match (passed, total) {
            (Some(p), Some(t)) if p > t => {
                warn!("Judge reported {p} passed of {t}, dropping counts");
                (None, None)
            }
            counts => counts,
        }
    }

    /// Build the normalized report for a terminal payload.
    pub fn into_report(self) -> Result<JudgeReport, JudgeError> {
        let outcome = self.classify();
        let raw_status_text = self
            .status_msg()
            .or_else(|| self.state())
            .unwrap_or_else(|| outcome.to_string());
        let (passed, total) = self.counts();
        let failed_case = match outcome {
            JudgeOutcome::Accepted => None,
            _ => self.failed_case(),
        };

        let report = JudgeReportBuilder::default()
            .with_outcome(outcome)
            .with_raw_status_text(raw_status_text)
            .with_runtime(text(self.status_runtime.as_ref()))
            .with_runtime_percentile(number(self.runtime_percentile.as_ref()))
            .with_memory(text(self.status_memory.as_ref()))
            .with_memory_percentile(number(self.memory_percentile.as_ref()))
            .with_compile_error(self.compile_error_text())
            .with_runtime_error(self.runtime_error_text())
            .with_failed_case(failed_case)
            .with_counts(passed, total)
            .build()?;

        Ok(report)
    }
}

/// Non-empty text from a string, number or array of strings (joined by
/// newlines, as test runs return one answer per case).
pub(crate) fn text(value: Option<&Value>) -> Option<String> {
    let rendered = match value? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| text(Some(item)))
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Null | Value::Object(_) => return None,
    };
    (!rendered.trim().is_empty()).then_some(rendered)
}

pub(crate) fn number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn count(value: Option<&Value>) -> Option<u32> {
    match value? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
