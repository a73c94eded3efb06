//! Shared result doubles and log capture for integration tests.

#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use trialkit::unittest::SinkResult;
use trialkit::{ExcInfo, SinkError, SkipLog, TestId, UnittestResult};

/// A result that predates skip support: skips can only be kept in its skip log.
#[derive(Debug, Default)]
pub struct LegacyResult {
    pub tests_run: usize,
    pub successes: Vec<TestId>,
    pub errors: Vec<(TestId, ExcInfo)>,
    pub failures: Vec<(TestId, ExcInfo)>,
    pub skip_log: SkipLog,
}

impl UnittestResult for LegacyResult {
    fn start_test(&mut self, _test: &TestId) -> SinkResult {
        self.tests_run += 1;
        Ok(())
    }

    fn stop_test(&mut self, _test: &TestId) -> SinkResult {
        Ok(())
    }

    fn add_success(&mut self, test: &TestId) -> SinkResult {
        self.successes.push(test.clone());
        Ok(())
    }

    fn add_error(&mut self, test: &TestId, err: ExcInfo) -> SinkResult {
        self.errors.push((test.clone(), err));
        Ok(())
    }

    fn add_failure(&mut self, test: &TestId, err: ExcInfo) -> SinkResult {
        self.failures.push((test.clone(), err));
        Ok(())
    }

    fn tests_run(&self) -> usize {
        self.tests_run
    }

    fn was_successful(&self) -> bool {
        self.errors.is_empty() && self.failures.is_empty()
    }

    fn skip_log(&mut self) -> Option<&mut SkipLog> {
        Some(&mut self.skip_log)
    }
}

/// A result with no optional capabilities at all.
#[derive(Debug, Default)]
pub struct BareResult {
    pub tests_run: usize,
    pub successes: usize,
    pub errors: usize,
    pub failures: usize,
}

impl UnittestResult for BareResult {
    fn start_test(&mut self, _test: &TestId) -> SinkResult {
        self.tests_run += 1;
        Ok(())
    }

    fn stop_test(&mut self, _test: &TestId) -> SinkResult {
        Ok(())
    }

    fn add_success(&mut self, _test: &TestId) -> SinkResult {
        self.successes += 1;
        Ok(())
    }

    fn add_error(&mut self, _test: &TestId, _err: ExcInfo) -> SinkResult {
        self.errors += 1;
        Ok(())
    }

    fn add_failure(&mut self, _test: &TestId, _err: ExcInfo) -> SinkResult {
        self.failures += 1;
        Ok(())
    }

    fn tests_run(&self) -> usize {
        self.tests_run
    }

    fn was_successful(&self) -> bool {
        self.errors == 0 && self.failures == 0
    }
}

/// A result whose `add_error` always fails; records whether `stop_test` was still reached.
#[derive(Debug, Default)]
pub struct RejectingResult {
    pub stopped: bool,
}

impl UnittestResult for RejectingResult {
    fn start_test(&mut self, _test: &TestId) -> SinkResult {
        Ok(())
    }

    fn stop_test(&mut self, _test: &TestId) -> SinkResult {
        self.stopped = true;
        Ok(())
    }

    fn add_success(&mut self, _test: &TestId) -> SinkResult {
        Ok(())
    }

    fn add_error(&mut self, _test: &TestId, _err: ExcInfo) -> SinkResult {
        Err(SinkError::rejected("add_error", "stream closed"))
    }

    fn add_failure(&mut self, _test: &TestId, _err: ExcInfo) -> SinkResult {
        Err(SinkError::rejected("add_failure", "stream closed"))
    }

    fn tests_run(&self) -> usize {
        0
    }

    fn was_successful(&self) -> bool {
        false
    }
}

/// In-memory writer for `tracing_subscriber::fmt`.
#[derive(Debug, Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().map(|b| b.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut bytes) = self.0.lock() {
            bytes.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with trialkit events at `filter` captured into the returned buffer.
pub fn with_captured_logs<T>(filter: &str, f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(buffer.clone())
        .with_ansi(false)
        .finish();
    let value = tracing::subscriber::with_default(subscriber, f);
    (value, buffer.contents())
}
