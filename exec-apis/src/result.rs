//! Execution results as reported by the execution service.
//!
//! The response shape is controlled by the server, so it is checked here
//! before anything else gets to see it. Anything that does not fit is a
//! deserialization error.
use serde::{Deserialize, Serialize};

/// Highest score the service can award.
pub const MAX_SCORE: u8 = 100;

/// Outcome of running a submission against the server-side test suite.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", try_from = "RawExecutionResult")]
pub struct ExecutionResult {
    /// Captured stdout
    pub output: String,
    /// Always within `0..=MAX_SCORE`
    pub score: u8,
    /// Same order as the test suite on the server
    pub test_results: Vec<TestOutcome>,
}

/// One test case of the server-side suite.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TestOutcome {
    pub input: String,
    #[serde(alias = "output")]
    pub expected_output: String,
    pub actual_output: String,
    pub passed: bool,
    #[serde(
        default,
        deserialize_with = "non_empty_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<String>,
}

impl ExecutionResult {
    /// Number of test cases that passed.
    pub fn passed_count(&self) -> usize {
        self.test_results.iter().filter(|t| t.passed).count()
    }

    /// Whether the submission earned the full score.
    pub fn is_complete(&self) -> bool {
        self.score == MAX_SCORE
    }

    /// Parses and validates a response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawExecutionResult {
    #[serde(default)]
    output: Option<String>,
    score: f64,
    test_results: Vec<TestOutcome>,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum SchemaError {
    #[error("score is not a finite number")]
    NonFiniteScore,
    #[error("score {0} is not a whole number")]
    FractionalScore(f64),
}

impl TryFrom<RawExecutionResult> for ExecutionResult {
    type Error = SchemaError;

    fn try_from(raw: RawExecutionResult) -> Result<Self, Self::Error> {
        if !raw.score.is_finite() {
            return Err(SchemaError::NonFiniteScore);
        }
        if raw.score.fract() != 0.0 {
            return Err(SchemaError::FractionalScore(raw.score));
        }
        let score = raw.score.clamp(0.0, f64::from(MAX_SCORE));
        if score != raw.score {
            tracing::warn!(reported = raw.score, "score out of range, clamping");
        }
        Ok(ExecutionResult {
            output: raw.output.unwrap_or_default(),
            score: score as u8,
            test_results: raw.test_results,
        })
    }
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = Option::<String>::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.is_empty()))
}
