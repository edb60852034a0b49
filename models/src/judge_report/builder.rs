use crate::error::model_error::ModelError;
use crate::{FailedCase, JudgeOutcome, JudgeReport};

/// Builder for creating validated JudgeReport instances.
///
/// Optional metrics take `Option` so a terminal payload can be forwarded
/// field by field without branching at the call site.
#[derive(Debug, Default)]
pub struct JudgeReportBuilder {
    outcome: Option<JudgeOutcome>,
    raw_status_text: Option<String>,
    runtime: Option<String>,
    runtime_percentile: Option<f64>,
    memory: Option<String>,
    memory_percentile: Option<f64>,
    compile_error: Option<String>,
    runtime_error: Option<String>,
    failed_case: Option<FailedCase>,
    passed_count: Option<u32>,
    total_count: Option<u32>,
}

impl JudgeReportBuilder {
    pub fn with_outcome(mut self, outcome: JudgeOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    pub fn with_raw_status_text(mut self, text: impl Into<String>) -> Self {
        self.raw_status_text = Some(text.into());
        self
    }

    pub fn with_runtime(mut self, runtime: Option<String>) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn with_runtime_percentile(mut self, percentile: Option<f64>) -> Self {
        self.runtime_percentile = percentile;
        self
    }

    pub fn with_memory(mut self, memory: Option<String>) -> Self {
        self.memory = memory;
        self
    }

    pub fn with_memory_percentile(mut self, percentile: Option<f64>) -> Self {
        self.memory_percentile = percentile;
        self
    }

    pub fn with_compile_error(mut self, error: Option<String>) -> Self {
        self.compile_error = error;
        self
    }

    pub fn with_runtime_error(mut self, error: Option<String>) -> Self {
        self.runtime_error = error;
        self
    }

    pub fn with_failed_case(mut self, case: Option<FailedCase>) -> Self {
        self.failed_case = case;
        self
    }

    pub fn with_counts(mut self, passed: Option<u32>, total: Option<u32>) -> Self {
        self.passed_count = passed;
        self.total_count = total;
        self
    }

    /// Build the JudgeReport with validation.
    #[track_caller]
    pub fn build(self) -> Result<JudgeReport, ModelError> {
        let outcome = self
            .outcome
            .ok_or_else(|| ModelError::validation("Outcome is required"))?;

        let raw_status_text = self
            .raw_status_text
            .ok_or_else(|| ModelError::validation("Status text is required"))?;

        if raw_status_text.is_empty() {
            return Err(ModelError::validation("Status text cannot be empty"));
        }

        if let (Some(passed), Some(total)) = (self.passed_count, self.total_count)
            && passed > total
        {
            return Err(ModelError::validation(format!(
                "Passed count {passed} exceeds total count {total}"
            )));
        }

        if outcome == JudgeOutcome::Accepted && self.failed_case.is_some() {
            return Err(ModelError::validation(
                "Accepted report cannot carry a failed case",
            ));
        }

        Ok(JudgeReport {
            outcome,
            raw_status_text,
            runtime: self.runtime,
            runtime_percentile: self.runtime_percentile,
            memory: self.memory,
            memory_percentile: self.memory_percentile,
            compile_error: self.compile_error,
            runtime_error: self.runtime_error,
            failed_case: self.failed_case,
            passed_count: self.passed_count,
            total_count: self.total_count,
        })
    }
}
