//! Result types produced by rule execution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One check instance, localized to a row of a file.
///
/// Absence of a step is the pass signal for a row: rules only emit
/// steps for the findings they want to report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCaseStepResult {
    /// 1-based row index in the source file.
    pub row: usize,
    /// Whether this step passed.
    pub passed: bool,
    /// Short failure-kind tag, e.g. `REQUIRED_FIELD`.
    pub kind: String,
    /// Human-readable message.
    pub message: String,
    /// Display name of the originating file.
    pub file: String,
}

impl TestCaseStepResult {
    /// Create a failing step.
    pub fn failure(
        row: usize,
        kind: impl Into<String>,
        message: impl Into<String>,
        file: impl Into<String>,
    ) -> Self {
        Self {
            row,
            passed: false,
            kind: kind.into(),
            message: message.into(),
            file: file.into(),
        }
    }
}

/// The ordered findings of one named rule invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCaseResult {
    /// Name of the rule that produced this result.
    pub name: String,
    /// Findings in emission order.
    pub steps: Vec<TestCaseStepResult>,
}

impl TestCaseResult {
    /// Create an empty result for a rule.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Append a step.
    pub fn push(&mut self, step: TestCaseStepResult) {
        self.steps.push(step);
    }

    /// Whether no failing step was recorded.
    pub fn passed(&self) -> bool {
        self.steps.iter().all(|s| s.passed)
    }

    /// Number of failing steps.
    pub fn failure_count(&self) -> usize {
        self.steps.iter().filter(|s| !s.passed).count()
    }
}

/// The results of running an ordered list of rules.
///
/// Case order matches the requested rule order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSuiteResult {
    /// Per-rule results in requested order.
    pub cases: Vec<TestCaseResult>,
    /// When the suite was run.
    pub ran_at: DateTime<Utc>,
}

impl TestSuiteResult {
    /// Create an empty suite result stamped with the current time.
    pub fn new() -> Self {
        Self {
            cases: Vec::new(),
            ran_at: Utc::now(),
        }
    }

    /// Whether every case passed.
    pub fn passed(&self) -> bool {
        self.cases.iter().all(TestCaseResult::passed)
    }

    /// Total failing steps across all cases.
    pub fn total_failures(&self) -> usize {
        self.cases.iter().map(TestCaseResult::failure_count).sum()
    }
}

impl Default for TestSuiteResult {
    fn default() -> Self {
        Self::new()
    }
}
