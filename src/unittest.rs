//! The narrow, unittest-style result protocol.
//!
//! A [`UnittestResult`] only understands start/stop, success, and error/failure tuples ([`ExcInfo`]). Skips and
//! expected failures are optional capabilities, exposed through explicit accessors rather than probed for:
//!
//! - [`UnittestResult::skip_support`] for results that count skips natively,
//! - [`UnittestResult::expected_failure_support`] for expected failures and unexpected successes,
//! - [`UnittestResult::skip_log`] for results that cannot count skips but can keep their reasons on the side.
//!
//! [`TestResult`] is the standard collecting implementation and supports everything.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use trialkit_core::ErrorKind;

use crate::error::SinkError;
use crate::test_id::TestId;

/// Result type of every narrow-protocol call.
pub type SinkResult = Result<(), SinkError>;

/// The `(type, value, traceback)` tuple handed to narrow results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcInfo {
    pub kind: ErrorKind,
    pub value: String,
    /// Fully rendered traceback text, ending with the `Kind: value` line.
    pub traceback: String,
}

/// Native skip support.
pub trait SkipSupport {
    fn add_skip(&mut self, test: &TestId, reason: &str) -> SinkResult;
}

/// Native expected-failure support.
pub trait ExpectedFailureSupport {
    fn add_expected_failure(&mut self, test: &TestId, err: ExcInfo) -> SinkResult;
    fn add_unexpected_success(&mut self, test: &TestId) -> SinkResult;
}

/// Skip reasons kept beside a result that reports skips as successes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipLog {
    entries: Vec<(TestId, String)>,
}

impl SkipLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, test: &TestId, reason: &str) {
        self.entries.push((test.clone(), reason.to_string()));
    }

    pub fn entries(&self) -> &[(TestId, String)] {
        &self.entries
    }

    pub fn reason_for(&self, test: &TestId) -> Option<&str> {
        self.entries
            .iter()
            .find(|(id, _)| id == test)
            .map(|(_, reason)| reason.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A unittest-style result.
///
/// The result owns its own bookkeeping: `tests_run` and `was_successful` are answered by the result, never by
/// whoever forwards calls into it.
pub trait UnittestResult {
    fn start_test(&mut self, test: &TestId) -> SinkResult;
    fn stop_test(&mut self, test: &TestId) -> SinkResult;
    fn add_success(&mut self, test: &TestId) -> SinkResult;
    fn add_error(&mut self, test: &TestId, err: ExcInfo) -> SinkResult;
    fn add_failure(&mut self, test: &TestId, err: ExcInfo) -> SinkResult;

    fn tests_run(&self) -> usize;
    fn was_successful(&self) -> bool;

    /// Native skip support, if any.
    fn skip_support(&mut self) -> Option<&mut dyn SkipSupport> {
        None
    }

    /// Native expected-failure support, if any.
    fn expected_failure_support(&mut self) -> Option<&mut dyn ExpectedFailureSupport> {
        None
    }

    /// Side channel for skip reasons when skips are reported as successes.
    fn skip_log(&mut self) -> Option<&mut SkipLog> {
        None
    }
}

/// The standard collecting result.
///
/// Errors and failures are stored as `(test, traceback text)` pairs.
#[derive(Debug, Clone, Default)]
pub struct TestResult {
    pub tests_run: usize,
    pub errors: Vec<(TestId, String)>,
    pub failures: Vec<(TestId, String)>,
    pub skipped: Vec<(TestId, String)>,
    pub expected_failures: Vec<(TestId, String)>,
    pub unexpected_successes: Vec<TestId>,
}

impl TestResult {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UnittestResult for TestResult {
    fn start_test(&mut self, _test: &TestId) -> SinkResult {
        self.tests_run += 1;
        Ok(())
    }

    fn stop_test(&mut self, _test: &TestId) -> SinkResult {
        Ok(())
    }

    fn add_success(&mut self, _test: &TestId) -> SinkResult {
        Ok(())
    }

    fn add_error(&mut self, test: &TestId, err: ExcInfo) -> SinkResult {
        self.errors.push((test.clone(), err.traceback));
        Ok(())
    }

    fn add_failure(&mut self, test: &TestId, err: ExcInfo) -> SinkResult {
        self.failures.push((test.clone(), err.traceback));
        Ok(())
    }

    fn tests_run(&self) -> usize {
        self.tests_run
    }

    /// No errors, no failures and no unexpected successes.
    fn was_successful(&self) -> bool {
        self.errors.is_empty() && self.failures.is_empty() && self.unexpected_successes.is_empty()
    }

    fn skip_support(&mut self) -> Option<&mut dyn SkipSupport> {
        Some(self)
    }

    fn expected_failure_support(&mut self) -> Option<&mut dyn ExpectedFailureSupport> {
        Some(self)
    }
}

impl SkipSupport for TestResult {
    fn add_skip(&mut self, test: &TestId, reason: &str) -> SinkResult {
        self.skipped.push((test.clone(), reason.to_string()));
        Ok(())
    }
}

impl ExpectedFailureSupport for TestResult {
    fn add_expected_failure(&mut self, test: &TestId, err: ExcInfo) -> SinkResult {
        self.expected_failures.push((test.clone(), err.traceback));
        Ok(())
    }

    fn add_unexpected_success(&mut self, test: &TestId) -> SinkResult {
        self.unexpected_successes.push(test.clone());
        Ok(())
    }
}
