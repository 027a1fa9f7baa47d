//! Turns an execution result into what the user sees.
use exec_apis::{result::MAX_SCORE, ExecutionResult, TestOutcome};
use std::fmt;

const BAR_WIDTH: usize = 20;

/// Rendered form of an [`ExecutionResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub progress: Progress,
    /// `Passed X of Y test cases`
    pub summary: String,
    /// One per test outcome, in server order
    pub panels: Vec<TestPanel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub percent: u8,
    pub status: ProgressStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStatus {
    /// Full score
    Success,
    InProgress,
}

impl ProgressStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProgressStatus::Success => "success",
            ProgressStatus::InProgress => "in progress",
        }
    }
}

/// Expandable panel describing one test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestPanel {
    /// `Test Case N`, 1-based
    pub title: String,
    pub passed: bool,
    pub input: String,
    pub expected_output: String,
    pub actual_output: String,
    pub error: Option<String>,
}

impl TestPanel {
    fn new(number: usize, outcome: &TestOutcome) -> TestPanel {
        TestPanel {
            title: format!("Test Case {}", number),
            passed: outcome.passed,
            input: outcome.input.clone(),
            expected_output: outcome.expected_output.clone(),
            actual_output: outcome.actual_output.clone(),
            error: outcome.error.clone(),
        }
    }
}

/// Deterministic; panel fields are copied verbatim.
pub fn render(result: &ExecutionResult) -> ResultView {
    let percent = result.score.min(MAX_SCORE);
    let status = if percent == MAX_SCORE {
        ProgressStatus::Success
    } else {
        ProgressStatus::InProgress
    };
    ResultView {
        progress: Progress { percent, status },
        summary: format!(
            "Passed {} of {} test cases",
            result.passed_count(),
            result.test_results.len()
        ),
        panels: result
            .test_results
            .iter()
            .enumerate()
            .map(|(idx, outcome)| TestPanel::new(idx + 1, outcome))
            .collect(),
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filled = usize::from(self.percent) * BAR_WIDTH / usize::from(MAX_SCORE);
        write!(
            f,
            "[{}{}] {:>3}% ({})",
            "#".repeat(filled),
            "-".repeat(BAR_WIDTH - filled),
            self.percent,
            self.status.as_str()
        )
    }
}

impl fmt::Display for TestPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.passed { "passed" } else { "failed" };
        writeln!(f, "{} [{}]", self.title, mark)?;
        write_field(f, "Input", &self.input, "  ")?;
        write_field(f, "Expected", &self.expected_output, "  ")?;
        write_field(f, "Actual", &self.actual_output, "  ")?;
        if let Some(err) = &self.error {
            write_field(f, "Error", err, "  !! ")?;
        }
        Ok(())
    }
}

impl fmt::Display for ResultView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.progress)?;
        writeln!(f, "{}", self.summary)?;
        for panel in &self.panels {
            writeln!(f)?;
            write!(f, "{}", panel)?;
        }
        Ok(())
    }
}

/// Single-line values stay on the label line, others go below it.
fn write_field(f: &mut fmt::Formatter<'_>, label: &str, value: &str, indent: &str) -> fmt::Result {
    if !value.contains('\n') {
        return writeln!(f, "{}{}: {}", indent, label, value);
    }
    writeln!(f, "{}{}:", indent, label)?;
    for line in value.lines() {
        writeln!(f, "{}    {}", indent, line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(input: &str, expected: &str, actual: &str, error: Option<&str>) -> TestOutcome {
        TestOutcome {
            input: input.to_string(),
            expected_output: expected.to_string(),
            actual_output: actual.to_string(),
            passed: expected == actual && error.is_none(),
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn full_score_is_success() {
        let result = ExecutionResult {
            output: String::new(),
            score: 100,
            test_results: vec![outcome("2,3", "6", "6", None), outcome("4,5", "20", "20", None)],
        };
        let view = render(&result);
        assert_eq!(view.progress.percent, 100);
        assert_eq!(view.progress.status, ProgressStatus::Success);
        assert_eq!(view.summary, "Passed 2 of 2 test cases");
        assert_eq!(view.panels.len(), 2);
        assert!(view.panels.iter().all(|p| p.passed));
    }

    #[test]
    fn partial_score_is_in_progress() {
        let result = ExecutionResult {
            output: String::new(),
            score: 50,
            test_results: vec![outcome("2,3", "6", "5", None), outcome("4,5", "20", "20", None)],
        };
        let view = render(&result);
        assert_eq!(view.progress.percent, 50);
        assert_eq!(view.progress.status, ProgressStatus::InProgress);
        assert_eq!(view.summary, "Passed 1 of 2 test cases");
        assert!(!view.panels[0].passed);
        assert_eq!(view.panels[0].actual_output, "5");
    }

    #[test]
    fn panels_follow_server_order_verbatim() {
        let outcomes = vec![
            outcome("  padded input ", "a\nb", "a\nb", None),
            outcome("x", "1", "", Some("Traceback (most recent call last):\n  ZeroDivisionError")),
            outcome("", "", "", None),
        ];
        let result = ExecutionResult {
            output: String::new(),
            score: 33,
            test_results: outcomes.clone(),
        };
        let view = render(&result);
        for (n, (panel, outcome)) in view.panels.iter().zip(&outcomes).enumerate() {
            assert_eq!(panel.title, format!("Test Case {}", n + 1));
            assert_eq!(panel.input, outcome.input);
            assert_eq!(panel.expected_output, outcome.expected_output);
            assert_eq!(panel.actual_output, outcome.actual_output);
            assert_eq!(panel.error, outcome.error);
            assert_eq!(panel.passed, outcome.passed);
        }
    }

    #[test]
    fn out_of_range_score_is_clamped_for_display() {
        let result = ExecutionResult {
            output: String::new(),
            score: 250,
            test_results: vec![],
        };
        let view = render(&result);
        assert_eq!(view.progress.percent, 100);
        assert_eq!(view.summary, "Passed 0 of 0 test cases");
    }

    #[test]
    fn text_rendering_marks_errors() {
        let result = ExecutionResult {
            output: String::new(),
            score: 0,
            test_results: vec![
                outcome("1", "2", "2", None),
                outcome("3", "4", "", Some("boom")),
            ],
        };
        let text = render(&result).to_string();
        assert!(text.starts_with("[--------------------]   0% (in progress)\n"));
        assert!(text.contains("Passed 1 of 2 test cases"));
        assert!(text.contains("Test Case 2 [failed]\n  Input: 3\n  Expected: 4\n  Actual: \n  !! Error: boom\n"));
        let first = text.split("Test Case 2").next().unwrap();
        assert!(!first.contains("Error"));
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        let p = Progress {
            percent: 50,
            status: ProgressStatus::InProgress,
        };
        assert_eq!(p.to_string(), "[##########----------]  50% (in progress)");
        let p = Progress {
            percent: 100,
            status: ProgressStatus::Success,
        };
        assert_eq!(p.to_string(), "[####################] 100% (success)");
    }
}
