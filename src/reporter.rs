//! The rich result protocol.
//!
//! ## Reporter Trait
//!
//! [`Reporter`] is what the engine talks to. Unlike [`UnittestResult`](crate::UnittestResult) it receives whole
//! [`Failure`]s (frames and all, unless cleaned) and has first-class skip, expected-failure and unexpected-success
//! outcomes. `Collector` is the in-memory implementation; `UnittestResultAdapter` lets any unittest-style result
//! stand in for a reporter.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use trialkit_core::{ErrorKind, Failure};

use crate::error::ReportError;
use crate::test_id::TestId;

/// Expected-failure metadata attached to a test method.
///
/// A todo without accepted kinds expects any failure; otherwise only failures of the listed kinds count as expected,
/// and any other failure is reported normally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    reason: String,
    accepts: Option<Vec<ErrorKind>>,
}

impl Todo {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            accepts: None,
        }
    }

    /// A todo that only expects failures of the given kinds.
    pub fn only(reason: impl Into<String>, kinds: impl IntoIterator<Item = ErrorKind>) -> Self {
        Self {
            reason: reason.into(),
            accepts: Some(kinds.into_iter().collect()),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Whether `failure` is the kind of failure this todo expects.
    pub fn expected(&self, failure: &Failure) -> bool {
        match &self.accepts {
            None => true,
            Some(kinds) => failure.check(kinds).is_some(),
        }
    }
}

/// Receives the outcome of each test.
///
/// Every test produces `start_test`, one outcome call per reported problem (or one success/skip/unexpected-success),
/// and `stop_test`.
pub trait Reporter {
    fn start_test(&mut self, test: &TestId) -> Result<(), ReportError>;
    fn stop_test(&mut self, test: &TestId) -> Result<(), ReportError>;
    fn add_success(&mut self, test: &TestId) -> Result<(), ReportError>;
    fn add_error(&mut self, test: &TestId, error: Failure) -> Result<(), ReportError>;
    fn add_failure(&mut self, test: &TestId, failure: Failure) -> Result<(), ReportError>;
    fn add_skip(&mut self, test: &TestId, reason: &str) -> Result<(), ReportError>;
    fn add_expected_failure(&mut self, test: &TestId, failure: Failure, todo: &Todo) -> Result<(), ReportError>;
    fn add_unexpected_success(&mut self, test: &TestId, todo: &Todo) -> Result<(), ReportError>;
    fn was_successful(&self) -> bool;
}

/// In-memory reporter that keeps every outcome.
#[derive(Debug, Default)]
pub struct Collector {
    pub tests_run: usize,
    pub successes: usize,
    pub errors: Vec<(TestId, Failure)>,
    pub failures: Vec<(TestId, Failure)>,
    pub skips: Vec<(TestId, String)>,
    pub expected_failures: Vec<(TestId, Failure, String)>,
    pub unexpected_successes: Vec<(TestId, String)>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for Collector {
    fn start_test(&mut self, _test: &TestId) -> Result<(), ReportError> {
        self.tests_run += 1;
        Ok(())
    }

    fn stop_test(&mut self, _test: &TestId) -> Result<(), ReportError> {
        Ok(())
    }

    fn add_success(&mut self, _test: &TestId) -> Result<(), ReportError> {
        self.successes += 1;
        Ok(())
    }

    fn add_error(&mut self, test: &TestId, error: Failure) -> Result<(), ReportError> {
        self.errors.push((test.clone(), error));
        Ok(())
    }

    fn add_failure(&mut self, test: &TestId, failure: Failure) -> Result<(), ReportError> {
        self.failures.push((test.clone(), failure));
        Ok(())
    }

    fn add_skip(&mut self, test: &TestId, reason: &str) -> Result<(), ReportError> {
        self.skips.push((test.clone(), reason.to_string()));
        Ok(())
    }

    fn add_expected_failure(&mut self, test: &TestId, failure: Failure, todo: &Todo) -> Result<(), ReportError> {
        self.expected_failures
            .push((test.clone(), failure, todo.reason().to_string()));
        Ok(())
    }

    fn add_unexpected_success(&mut self, test: &TestId, todo: &Todo) -> Result<(), ReportError> {
        self.unexpected_successes
            .push((test.clone(), todo.reason().to_string()));
        Ok(())
    }

    /// Only errors and failures count against the run; unexpected successes are reported but tolerated.
    fn was_successful(&self) -> bool {
        self.errors.is_empty() && self.failures.is_empty()
    }
}
