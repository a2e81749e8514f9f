//! Plain-text parity reports

use crate::compare::DiffResult;

const RULE_WIDTH: usize = 72;
const MAX_DETAIL_LINES: usize = 10;
const DETAIL_INDENT: &str = "         ";

/// Verdict of one named parity check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOutcome {
    pub test_name: String,
    pub passed: bool,
    /// Failure explanation, possibly multi-line
    pub details: Option<String>,
}

impl TestOutcome {
    pub fn pass(test_name: impl Into<String>) -> Self {
        Self {
            test_name: test_name.into(),
            passed: true,
            details: None,
        }
    }

    pub fn fail(test_name: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            test_name: test_name.into(),
            passed: false,
            details: Some(details.into()),
        }
    }

    /// Outcome of a comparison: passes iff the result is equal
    pub fn from_diff(test_name: impl Into<String>, result: &DiffResult) -> Self {
        if result.equal {
            Self::pass(test_name)
        } else {
            Self::fail(test_name, result.details())
        }
    }
}

/// Render outcomes as a fixed-width report with an `N/M passed` summary
pub fn format_report(outcomes: &[TestOutcome]) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let passed = outcomes.iter().filter(|o| o.passed).count();

    let mut lines = vec![
        rule.clone(),
        "PARITY TEST REPORT".to_string(),
        rule.clone(),
        String::new(),
        format!("Results: {}/{} passed", passed, outcomes.len()),
        String::new(),
    ];

    for outcome in outcomes {
        let status = if outcome.passed { "✅ PASS" } else { "❌ FAIL" };
        lines.push(format!("{}  {}", status, outcome.test_name));
        if !outcome.passed {
            if let Some(details) = outcome.details.as_deref().filter(|d| !d.is_empty()) {
                lines.extend(
                    details
                        .split('\n')
                        .take(MAX_DETAIL_LINES)
                        .map(|line| format!("{}{}", DETAIL_INDENT, line)),
                );
            }
        }
        lines.push(String::new());
    }

    lines.push(rule);
    lines.join("\n")
}
