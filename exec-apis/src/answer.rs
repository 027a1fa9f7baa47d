use serde::{Deserialize, Serialize};

use crate::result::{ExecutionResult, TestOutcome};

/// Answer state reported to the host page, so that it can persist it.
///
/// After an edit only `code` is set; after a successful run all fields are.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnswerState {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_results: Option<Vec<TestOutcome>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
}

impl AnswerState {
    pub fn edited(code: &str) -> Self {
        AnswerState {
            code: code.to_string(),
            output: None,
            test_results: None,
            score: None,
        }
    }

    pub fn ran(code: &str, result: &ExecutionResult) -> Self {
        AnswerState {
            code: code.to_string(),
            output: Some(result.output.clone()),
            test_results: Some(result.test_results.clone()),
            score: Some(result.score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn edit_state_only_has_code() {
        let v = serde_json::to_value(AnswerState::edited("x = 1")).unwrap();
        assert_eq!(v, json!({ "code": "x = 1" }));
    }

    #[test]
    fn run_state_has_everything() {
        let result = ExecutionResult {
            output: "3\n".to_string(),
            score: 100,
            test_results: vec![TestOutcome {
                input: "1 2".to_string(),
                expected_output: "3".to_string(),
                actual_output: "3".to_string(),
                passed: true,
                error: None,
            }],
        };
        let v = serde_json::to_value(AnswerState::ran("print(3)", &result)).unwrap();
        assert_eq!(
            v,
            json!({
                "code": "print(3)",
                "output": "3\n",
                "score": 100,
                "testResults": [
                    {"input": "1 2", "expectedOutput": "3", "actualOutput": "3", "passed": true}
                ]
            })
        );
    }
}
