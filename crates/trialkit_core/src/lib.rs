//! Exception vocabulary, traceback formatting and failure capture shared by the `trialkit` harness.
//!
//! This crate is the "diagnostic" half of trialkit. It knows how to describe a caught error (its kind, its message
//! and the frames it travelled through) and how to render that description in the familiar
//! `Traceback (most recent call last):` layout. It knows nothing about test results or reporters.
//!
//! ## Notes
//!
//! - No global state except the panic hook installed by [`panics::catch`] (installed once per process; capture state
//!   is thread-local).
//! - The only IO is best-effort source-line lookup in [`traceback::linecache`].
//! - With the `json` feature, cleaned failures can be persisted as [`failure::FailureRecord`]s.

#![deny(clippy::unwrap_used)]

pub mod errors;
pub mod failure;
mod macros;
pub mod ops;
pub mod panics;
pub mod traceback;

pub use errors::{CaptureError, ErrorKind};
pub use failure::{Failure, FailureRecord, Outcome};
pub use traceback::{Frame, format_exception, format_exception_only, format_tb};
