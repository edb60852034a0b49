//! The problem record scraped from a problem page by the extension.

use crate::ModelError;

use serde::{Deserialize, Serialize};

/// One worked example from the problem statement.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    #[serde(default)]
    pub input: String,
    #[serde(default, alias = "expected")]
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Everything the extension could pull off a problem page.
///
/// Every field is optional on the wire. The only semantic requirement is
/// that at least one of `slug` or `title` is present, see [`ProblemRecord::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemRecord {
    #[serde(
        default,
        deserialize_with = "crate::wire::string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, alias = "titleSlug", skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, alias = "codeSnippet", skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<TestCase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ProblemRecord {
    /// Reject records that carry neither a slug nor a title.
    #[track_caller]
    pub fn validate(&self) -> Result<(), ModelError> {
        let has_slug = self.slug.as_deref().is_some_and(|s| !s.trim().is_empty());
        let has_title = self.title.as_deref().is_some_and(|t| !t.trim().is_empty());

        if !has_slug && !has_title {
            return Err(ModelError::validation(
                "Problem record needs a slug or a title",
            ));
        }

        Ok(())
    }

    /// Name used in log lines and directory names, slug first.
    pub fn display_name(&self) -> &str {
        self.slug
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.title.as_deref())
            .unwrap_or("problem")
    }
}
