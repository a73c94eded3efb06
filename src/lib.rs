#![forbid(unsafe_code)]
//! trialkit: a small trial-style test harness
//!
//! trialkit runs xUnit-style test cases and reports their outcomes through one of two result protocols:
//!
//! - [`Reporter`], the rich protocol. It receives full [`Failure`]s and knows about skips, expected failures and
//!   unexpected successes.
//! - [`UnittestResult`], the narrow unittest-style protocol. It only takes `(kind, value, traceback)` tuples and may
//!   or may not support skips and expected failures.
//!
//! [`UnittestResultAdapter`] implements the rich protocol on top of any narrow result, keeping traceback text exact
//! (even for cleaned failures) and degrading unsupported outcomes in documented ways.
//!
//! ## Panic Policy
//!
//! - **Library code**: Use `Result` with `?`. Reporter and sink errors always propagate to the caller; nothing here
//!   swallows them. Enforced with `#![deny(clippy::unwrap_used)]` per module.
//! - **Test bodies**: panics are caught by the engine and reported as failures or errors.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod adapter;
pub mod case;
pub mod config;
pub mod error;
pub mod reporter;
pub mod test_id;
pub mod unittest;

pub use adapter::UnittestResultAdapter;
pub use case::{Fixture, TestCase, TestMethod};
pub use config::RunConfig;
pub use error::{ReportError, SinkError};
pub use reporter::{Collector, Reporter, Todo};
pub use test_id::TestId;
pub use unittest::{ExcInfo, ExpectedFailureSupport, SkipLog, SkipSupport, TestResult, UnittestResult};

pub use trialkit_core::{ErrorKind, Failure, Frame, Outcome};
pub use trialkit_core::{ensure, ensure_eq, fail, frame, function_name, raise, skip, traced};
