//! Mapping between editor language labels and execution engine identifiers.
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Languages the execution service has an engine for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Language {
    Python,
    Java,
    Cpp,
    JavaScript,
}

impl Language {
    /// Language used when a label is not recognized.
    pub const FALLBACK: Language = Language::Python;

    /// Numeric id the execution service uses to select a compiler or interpreter.
    pub fn engine_id(self) -> u32 {
        match self {
            Language::Python => 71,
            Language::Java => 62,
            Language::Cpp => 54,
            Language::JavaScript => 63,
        }
    }

    /// Resolves a free-text label, ignoring ASCII case.
    /// Unknown labels resolve to [`Language::FALLBACK`].
    pub fn resolve(label: &str) -> Language {
        Language::from_str(label).unwrap_or_else(|_| {
            tracing::debug!(label, "unknown language, using fallback engine");
            Language::FALLBACK
        })
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Shorthand for `Language::resolve(label).engine_id()`. Never fails.
pub fn engine_id_for(label: &str) -> u32 {
    Language::resolve(label).engine_id()
}
