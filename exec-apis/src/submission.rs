use serde::{Deserialize, Serialize};

use crate::language::Language;

/// Body of a code execution request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Source code exactly as it is in the editor
    pub code: String,
    /// Execution engine identifier, see [`Language::engine_id`]
    pub language_id: u32,
    /// Selects the test suite the server runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<String>,
}

/// Identifies what a submission is being judged against.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionContext {
    #[serde(default)]
    pub test_id: Option<String>,
    #[serde(default)]
    pub question_id: Option<String>,
}

impl Submission {
    /// Builds a submission for a free-text language label.
    /// Unknown labels use the fallback engine.
    pub fn new(code: impl Into<String>, language: &str, context: &SubmissionContext) -> Self {
        Submission {
            code: code.into(),
            language_id: Language::resolve(language).engine_id(),
            test_id: context.test_id.clone(),
            question_id: context.question_id.clone(),
        }
    }
}
