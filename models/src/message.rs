//! Request and response payloads carried inside one IPC envelope.
//!
//! The browser side speaks JSON with camelCase keys, tagged by an `action`
//! field. Every response carries at least `success`; failures add `error`
//! and usually a remediation `hint`.

use crate::{JudgeReport, ProblemRecord};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One action sent to the privileged host process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Request {
    /// Write the problem to the workspace and open it in an editor.
    OpenProblem { data: ProblemRecord },

    GetConfig,

    SetConfig { key: String, value: String },

    /// Run the code against caller-supplied test input.
    TestSolution {
        slug: String,
        #[serde(deserialize_with = "crate::wire::required_string_or_number")]
        question_id: String,
        code: String,
        language: String,
        test_cases: String,
    },

    /// Submit the code for full judging.
    SubmitSolution {
        slug: String,
        #[serde(deserialize_with = "crate::wire::required_string_or_number")]
        question_id: String,
        code: String,
        language: String,
    },
}

impl Request {
    /// Wire name of the action (safe to log).
    pub fn action(&self) -> &'static str {
        match self {
            Request::OpenProblem { .. } => "openProblem",
            Request::GetConfig => "getConfig",
            Request::SetConfig { .. } => "setConfig",
            Request::TestSolution { .. } => "testSolution",
            Request::SubmitSolution { .. } => "submitSolution",
        }
    }

    /// Whether handling this request drives a remote judge job.
    pub fn is_judge_job(&self) -> bool {
        matches!(
            self,
            Request::TestSolution { .. } | Request::SubmitSolution { .. }
        )
    }
}

/// Settings as shown to callers. Secrets are reduced to presence flags.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigView {
    pub workspace_dir: String,
    pub editor: String,
    #[serde(default)]
    pub has_session: bool,
    #[serde(default)]
    pub has_csrf: bool,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// The single reply written for a request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    /// Set on `openProblem` replies only: the program that opened the file,
    /// or `null` when no editor could be launched.
    #[serde(
        default,
        deserialize_with = "crate::wire::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub editor: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ConfigView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<JudgeReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_id: Option<String>,
}

impl Response {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    pub fn with_editor(mut self, editor: impl Into<String>) -> Self {
        self.editor = Some(Some(editor.into()));
        self
    }

    /// Report that no editor could open the file.
    pub fn without_editor(mut self) -> Self {
        self.editor = Some(None);
        self
    }

    /// Program that opened the file, if any.
    pub fn editor_name(&self) -> Option<&str> {
        self.editor.as_ref().and_then(|editor| editor.as_deref())
    }

    pub fn with_config(mut self, config: ConfigView) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_report(mut self, report: JudgeReport) -> Self {
        self.report = Some(report);
        self
    }

    pub fn with_extension_id(mut self, id: impl Into<String>) -> Self {
        self.extension_id = Some(id.into());
        self
    }
}
