//! Collector for a run of named parity checks

use crate::compare::{compare_responses, CompareOptions, DiffResult};
use crate::policy::ComparePolicy;
use crate::report::{format_report, TestOutcome};
use serde_json::Value;
use tracing::{info, warn};

/// Runs comparisons under one policy and keeps every verdict for the report
#[derive(Debug, Clone, Default)]
pub struct ParityRun {
    pub policy: ComparePolicy,
    pub outcomes: Vec<TestOutcome>,
}

impl ParityRun {
    pub fn new(policy: ComparePolicy) -> Self {
        Self {
            policy,
            outcomes: Vec::new(),
        }
    }

    /// Compare two responses and record the verdict under `name`
    pub fn check(
        &mut self,
        name: &str,
        reference: &Value,
        candidate: &Value,
        options: Option<CompareOptions>,
    ) -> DiffResult {
        let options = options.unwrap_or_default();
        let result = compare_responses(reference, candidate, &options, &self.policy);
        self.record(TestOutcome::from_diff(name, &result));
        result
    }

    /// Record a verdict computed elsewhere
    pub fn record(&mut self, outcome: TestOutcome) {
        if outcome.passed {
            info!("{} - PASS", outcome.test_name);
        } else {
            warn!("{} - FAIL", outcome.test_name);
        }
        self.outcomes.push(outcome);
    }

    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    /// Check if all recorded checks passed
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }

    /// Render the report for everything recorded so far
    pub fn report(&self) -> String {
        format_report(&self.outcomes)
    }
}
