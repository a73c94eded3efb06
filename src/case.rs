//! Synchronous test case execution.
//!
//! A [`TestCase`] pairs a [`Fixture`] value with one [`TestMethod`] and runs it against a reporter:
//!
//! 1. `start_test`
//! 2. a skip reason on the method short-circuits to `add_skip` (nothing else runs)
//! 3. `set_up`; if it fails, the failure is reported and neither the body nor `tear_down` run
//! 4. the body, then `tear_down`
//! 5. `add_success` (or `add_unexpected_success` for a todo) when nothing was reported
//! 6. `stop_test`, always once started
//!
//! Failures returned from any phase, and panics inside it, are classified by kind: `SkipTest` becomes a skip,
//! `FailTest`/`AssertionError` a failure, everything else an error. A body failure matched by the method's
//! [`Todo`] becomes an expected failure instead.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use trialkit_core::{ErrorKind, Failure, Outcome, frame, panics};

use crate::adapter::UnittestResultAdapter;
use crate::config::RunConfig;
use crate::error::ReportError;
use crate::reporter::{Reporter, Todo};
use crate::test_id::TestId;
use crate::unittest::UnittestResult;

/// Per-test set-up and tear-down. Both default to doing nothing.
pub trait Fixture {
    fn set_up(&mut self) -> Outcome {
        Ok(())
    }

    fn tear_down(&mut self) -> Outcome {
        Ok(())
    }
}

/// A test body plus its skip/todo metadata.
pub struct TestMethod<F> {
    name: &'static str,
    body: fn(&mut F) -> Outcome,
    skip: Option<String>,
    todo: Option<Todo>,
}

impl<F> TestMethod<F> {
    pub fn new(name: &'static str, body: fn(&mut F) -> Outcome) -> Self {
        Self {
            name,
            body,
            skip: None,
            todo: None,
        }
    }

    /// Skip this method unconditionally with `reason`.
    pub fn skip(mut self, reason: impl Into<String>) -> Self {
        self.skip = Some(reason.into());
        self
    }

    /// Expect this method to fail.
    pub fn todo(mut self, todo: Todo) -> Self {
        self.todo = Some(todo);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    SetUp,
    Body,
    TearDown,
}

/// One runnable test: a fixture value and the method to run on it.
pub struct TestCase<F> {
    id: TestId,
    fixture: F,
    method: TestMethod<F>,
    config: RunConfig,
}

impl<F: Fixture> TestCase<F> {
    pub fn new(fixture: F, method: TestMethod<F>) -> Self {
        Self {
            id: TestId::for_method::<F>(method.name),
            fixture,
            method,
            config: RunConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    pub fn id(&self) -> &TestId {
        &self.id
    }

    /// The fixture, for inspecting what the test did.
    pub fn fixture(&self) -> &F {
        &self.fixture
    }

    /// Run against a unittest-style result, through a [`UnittestResultAdapter`].
    pub fn run_unittest(&mut self, result: &mut dyn UnittestResult) -> Result<(), ReportError> {
        let mut adapter = UnittestResultAdapter::new(result);
        self.run(&mut adapter)
    }

    /// Run against a rich reporter directly.
    ///
    /// Reporter errors abort the run and are returned; `stop_test` is still attempted once `start_test` succeeded.
    #[tracing::instrument(skip_all, fields(test = %self.id))]
    pub fn run(&mut self, reporter: &mut dyn Reporter) -> Result<(), ReportError> {
        reporter.start_test(&self.id)?;
        let outcome = self.run_fixtures_and_test(reporter);
        let stopped = reporter.stop_test(&self.id);
        outcome?;
        stopped
    }

    fn run_fixtures_and_test(&mut self, reporter: &mut dyn Reporter) -> Result<(), ReportError> {
        if let Some(reason) = &self.method.skip {
            tracing::debug!(reason = reason.as_str(), "skipped before set_up");
            return reporter.add_skip(&self.id, reason);
        }

        if let Err(failure) = self.run_phase(Phase::SetUp) {
            let failure = self.engine_frame(failure, frame!());
            return self.report(reporter, failure, None);
        }

        let body = self.run_phase(Phase::Body);
        let tear_down = self.run_phase(Phase::TearDown);

        let mut reported = false;
        if let Err(failure) = body {
            let failure = self.engine_frame(failure, frame!());
            self.report(reporter, failure, self.method.todo.as_ref())?;
            reported = true;
        }
        if let Err(failure) = tear_down {
            let failure = self.engine_frame(failure, frame!());
            self.report(reporter, failure, None)?;
            reported = true;
        }
        if reported {
            return Ok(());
        }

        match &self.method.todo {
            Some(todo) => reporter.add_unexpected_success(&self.id, todo),
            None => reporter.add_success(&self.id),
        }
    }

    fn run_phase(&mut self, phase: Phase) -> Outcome {
        let name = match phase {
            Phase::SetUp => "set_up",
            Phase::Body => self.method.name,
            Phase::TearDown => "tear_down",
        };
        let body = self.method.body;
        let fixture = &mut self.fixture;
        let outcome = panics::catch(name, self.config.quiet_panics, || match phase {
            Phase::SetUp => fixture.set_up(),
            Phase::Body => body(fixture),
            Phase::TearDown => fixture.tear_down(),
        });
        match outcome {
            Ok(()) => Ok(()),
            Err(failure) => {
                tracing::debug!(phase = name, kind = %failure.kind(), "phase raised");
                Err(self.engine_frame(failure, frame!()))
            }
        }
    }

    fn engine_frame(&self, failure: Failure, frame: trialkit_core::Frame) -> Failure {
        if self.config.engine_frames {
            failure.called_from(frame)
        } else {
            failure
        }
    }

    fn report(&self, reporter: &mut dyn Reporter, failure: Failure, todo: Option<&Todo>) -> Result<(), ReportError> {
        let failure = if self.config.clean_failures {
            failure.into_cleaned()
        } else {
            failure
        };

        if failure.kind() == ErrorKind::SkipTest {
            return reporter.add_skip(&self.id, failure.value());
        }
        if let Some(todo) = todo.filter(|todo| todo.expected(&failure)) {
            return reporter.add_expected_failure(&self.id, failure, todo);
        }
        if failure.kind().is_failure() {
            reporter.add_failure(&self.id, failure)
        } else {
            reporter.add_error(&self.id, failure)
        }
    }
}
