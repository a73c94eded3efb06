//! Errors raised by result sinks and reporters.
//!
//! These are *infrastructure* errors: a result object failed while a call was being delivered to it. They are
//! distinct from test failures, which travel as [`Failure`](trialkit_core::Failure) values. Neither the adapter nor
//! the engine recovers from them; they propagate to whoever started the run.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use miette::Diagnostic;
use thiserror::Error;

/// Error raised by a narrow (unittest-style) result.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("result rejected `{call}`: {message}")]
    Rejected { call: &'static str, message: String },

    #[error("result I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl SinkError {
    pub fn rejected(call: &'static str, message: impl Into<String>) -> Self {
        Self::Rejected {
            call,
            message: message.into(),
        }
    }
}

/// Error raised while reporting an outcome through the rich protocol.
#[derive(Debug, Error, Diagnostic)]
pub enum ReportError {
    #[error(transparent)]
    #[diagnostic(
        code(trialkit::report::sink),
        help("the wrapped unittest result raised while a call was being forwarded to it")
    )]
    Sink(#[from] SinkError),

    #[error("reporter failed: {0}")]
    #[diagnostic(code(trialkit::report::reporter))]
    Reporter(String),
}

impl ReportError {
    pub fn reporter(message: impl Into<String>) -> Self {
        Self::Reporter(message.into())
    }
}
