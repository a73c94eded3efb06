//! Adapter from the rich [`Reporter`] protocol to a unittest-style [`UnittestResult`].
//!
//! Every rich call becomes exactly one narrow call, except where the wrapped result lacks a capability:
//!
//! | rich call                 | with capability                  | without                                      |
//! |---------------------------|----------------------------------|----------------------------------------------|
//! | `add_skip`                | `SkipSupport::add_skip`          | `add_success` + reason into the `SkipLog`     |
//! | `add_expected_failure`    | `add_expected_failure`           | `add_failure` with `UnsupportedTrialFeature` |
//! | `add_unexpected_success`  | `add_unexpected_success`         | `add_failure` with `UnsupportedTrialFeature` |
//!
//! Skips reported as successes inflate the wrapped result's success count; the reasons stay recoverable from its
//! [`SkipLog`](crate::SkipLog), when it has one.
//!
//! Errors raised by the wrapped result are never caught here.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use trialkit_core::{ErrorKind, Failure, format_exception_only};

use crate::error::ReportError;
use crate::reporter::{Reporter, Todo};
use crate::test_id::TestId;
use crate::unittest::{ExcInfo, UnittestResult};

/// Wraps a [`UnittestResult`] so it can be used wherever a [`Reporter`] is expected.
pub struct UnittestResultAdapter<'a> {
    original: &'a mut dyn UnittestResult,
}

impl<'a> UnittestResultAdapter<'a> {
    pub fn new(original: &'a mut dyn UnittestResult) -> Self {
        Self { original }
    }

    /// The wrapped result.
    pub fn original(&self) -> &dyn UnittestResult {
        &*self.original
    }

    /// Build the narrow tuple. The traceback is the failure's rendered text, fresh or cleaned alike.
    fn exc_info(failure: &Failure) -> ExcInfo {
        ExcInfo {
            kind: failure.kind(),
            value: failure.value().to_string(),
            traceback: failure.render().to_string(),
        }
    }

    /// Report an outcome the wrapped result cannot represent as a failure.
    fn unsupported(&mut self, test: &TestId, feature: &str, info: &str) -> Result<(), ReportError> {
        tracing::debug!(%test, feature, "wrapped result lacks support; reporting as failure");
        let kind = ErrorKind::UnsupportedTrialFeature;
        let value = format!("{feature}: {info}");
        let traceback = format_exception_only(kind, &value);
        self.original.add_failure(
            test,
            ExcInfo {
                kind,
                value,
                traceback,
            },
        )?;
        Ok(())
    }
}

impl Reporter for UnittestResultAdapter<'_> {
    fn start_test(&mut self, test: &TestId) -> Result<(), ReportError> {
        tracing::trace!(%test, "start_test");
        self.original.start_test(test)?;
        Ok(())
    }

    fn stop_test(&mut self, test: &TestId) -> Result<(), ReportError> {
        tracing::trace!(%test, "stop_test");
        self.original.stop_test(test)?;
        Ok(())
    }

    fn add_success(&mut self, test: &TestId) -> Result<(), ReportError> {
        tracing::trace!(%test, "add_success");
        self.original.add_success(test)?;
        Ok(())
    }

    fn add_error(&mut self, test: &TestId, error: Failure) -> Result<(), ReportError> {
        tracing::trace!(%test, kind = %error.kind(), "add_error");
        self.original.add_error(test, Self::exc_info(&error))?;
        Ok(())
    }

    fn add_failure(&mut self, test: &TestId, failure: Failure) -> Result<(), ReportError> {
        tracing::trace!(%test, kind = %failure.kind(), "add_failure");
        self.original.add_failure(test, Self::exc_info(&failure))?;
        Ok(())
    }

    fn add_skip(&mut self, test: &TestId, reason: &str) -> Result<(), ReportError> {
        tracing::trace!(%test, reason, "add_skip");
        if let Some(skips) = self.original.skip_support() {
            skips.add_skip(test, reason)?;
            return Ok(());
        }

        self.original.add_success(test)?;
        match self.original.skip_log() {
            Some(log) => {
                tracing::debug!(%test, reason, "skip reported as success; reason kept in skip log");
                log.record(test, reason);
            }
            None => {
                tracing::warn!(%test, reason, "skip reported as success; wrapped result has no skip log");
            }
        }
        Ok(())
    }

    fn add_expected_failure(&mut self, test: &TestId, failure: Failure, todo: &Todo) -> Result<(), ReportError> {
        tracing::trace!(%test, todo = todo.reason(), "add_expected_failure");
        if let Some(xfail) = self.original.expected_failure_support() {
            xfail.add_expected_failure(test, Self::exc_info(&failure))?;
            return Ok(());
        }
        self.unsupported(test, "expected failure", todo.reason())
    }

    fn add_unexpected_success(&mut self, test: &TestId, todo: &Todo) -> Result<(), ReportError> {
        tracing::trace!(%test, todo = todo.reason(), "add_unexpected_success");
        if let Some(xfail) = self.original.expected_failure_support() {
            xfail.add_unexpected_success(test)?;
            return Ok(());
        }
        self.unsupported(test, "unexpected success", todo.reason())
    }

    fn was_successful(&self) -> bool {
        self.original.was_successful()
    }
}
