use exec_apis::SubmissionContext;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything a host page configures an editor with.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EditorProps {
    #[serde(default)]
    pub initial_code: StarterCode,
    /// Free-text label, resolved against the language table on every run
    #[serde(default = "EditorProps::default_language")]
    pub language: String,
    #[serde(default)]
    pub read_only: bool,
    /// Shown to the user, never used for scoring
    #[serde(default)]
    pub test_cases: Vec<ExampleCase>,
    /// Judge harness source per language. Not interpreted here.
    #[serde(default)]
    pub validation_program: BTreeMap<String, String>,
    #[serde(flatten)]
    pub context: SubmissionContext,
}

impl EditorProps {
    fn default_language() -> String {
        String::from("python")
    }
}

impl Default for EditorProps {
    fn default() -> Self {
        EditorProps {
            initial_code: StarterCode::default(),
            language: EditorProps::default_language(),
            read_only: false,
            test_cases: Vec::new(),
            validation_program: BTreeMap::new(),
            context: SubmissionContext::default(),
        }
    }
}

/// Code the editor starts with.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum StarterCode {
    /// Same starter for every language
    Shared(String),
    /// Keyed by language label, case-insensitive
    PerLanguage(BTreeMap<String, String>),
}

impl Default for StarterCode {
    fn default() -> Self {
        StarterCode::Shared(String::new())
    }
}

impl StarterCode {
    /// Starter for `language`; empty if none was supplied for it.
    pub fn for_language(&self, language: &str) -> &str {
        match self {
            StarterCode::Shared(code) => code,
            StarterCode::PerLanguage(map) => lookup_ignore_case(map, language).unwrap_or(""),
        }
    }
}

/// Author-time example displayed next to the editor.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExampleCase {
    pub input: String,
    pub output: String,
}

pub(crate) fn lookup_ignore_case<'a>(map: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
    map.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v.as_str())
}
