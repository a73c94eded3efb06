//! Builtin exception vocabulary (Python-like).
//!
//! Every [`Failure`](crate::failure::Failure) carries an [`ErrorKind`]. The registry below owns the canonical
//! spelling of each kind, so tracebacks rendered by this crate and kind names parsed back from panic messages or
//! persisted records always agree.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors raised by this crate itself (as opposed to the failures it describes).
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("unknown exception kind `{0}`")]
    UnknownKind(String),

    #[cfg(feature = "json")]
    #[error("failure record (de)serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Kind of a caught exception.
///
/// The discriminant order must match [`EXCEPTIONS`]; `tests::registry_order_matches_discriminants` guards it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "json",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", try_from = "String")
)]
pub enum ErrorKind {
    /// Catch-all for errors that have no more specific kind.
    Exception,
    AssertionError,
    /// Explicit test failure (`fail!`, `ensure!`).
    FailTest,
    /// Request to skip the running test (`skip!`).
    SkipTest,
    /// A rich-protocol outcome the wrapped result cannot represent.
    UnsupportedTrialFeature,
    ZeroDivisionError,
    ValueError,
    TypeError,
    KeyError,
    IndexError,
    OverflowError,
    RuntimeError,
    /// A panic whose message did not name a more specific kind.
    PanicException,
}

/// Metadata for a builtin exception kind.
#[derive(Debug, Clone, Copy)]
pub struct ExceptionInfo {
    pub id: ErrorKind,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
}

/// Registry of builtin exception kinds, in discriminant order.
pub const EXCEPTIONS: &[ExceptionInfo] = &[
    info(ErrorKind::Exception, "Exception", &[]),
    info(ErrorKind::AssertionError, "AssertionError", &[]),
    info(ErrorKind::FailTest, "FailTest", &["twisted.trial.unittest.FailTest"]),
    info(ErrorKind::SkipTest, "SkipTest", &["unittest.SkipTest"]),
    info(ErrorKind::UnsupportedTrialFeature, "UnsupportedTrialFeature", &[]),
    info(ErrorKind::ZeroDivisionError, "ZeroDivisionError", &[]),
    info(ErrorKind::ValueError, "ValueError", &[]),
    info(ErrorKind::TypeError, "TypeError", &[]),
    info(ErrorKind::KeyError, "KeyError", &[]),
    info(ErrorKind::IndexError, "IndexError", &[]),
    info(ErrorKind::OverflowError, "OverflowError", &[]),
    info(ErrorKind::RuntimeError, "RuntimeError", &[]),
    info(ErrorKind::PanicException, "PanicException", &[]),
];

const fn info(id: ErrorKind, canonical: &'static str, aliases: &'static [&'static str]) -> ExceptionInfo {
    ExceptionInfo { id, canonical, aliases }
}

/// Return full metadata for an exception kind.
#[inline]
pub fn info_for(kind: ErrorKind) -> &'static ExceptionInfo {
    &EXCEPTIONS[kind as usize]
}

/// Return the canonical spelling for an exception kind (e.g. `"ZeroDivisionError"`).
#[inline]
pub fn as_str(kind: ErrorKind) -> &'static str {
    info_for(kind).canonical
}

/// Resolve a spelling to an exception kind.
///
/// Matching is exact and case-sensitive; aliases are accepted.
pub fn from_str(name: &str) -> Option<ErrorKind> {
    if let Some(e) = EXCEPTIONS.iter().find(|e| e.canonical == name) {
        return Some(e.id);
    }
    EXCEPTIONS.iter().find(|e| e.aliases.contains(&name)).map(|e| e.id)
}

impl ErrorKind {
    /// Canonical spelling, see [`as_str`].
    pub fn name(self) -> &'static str {
        as_str(self)
    }

    /// Whether this kind is reported as a test *failure* rather than an *error*.
    pub fn is_failure(self) -> bool {
        matches!(self, ErrorKind::FailTest | ErrorKind::AssertionError)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(as_str(*self))
    }
}

impl FromStr for ErrorKind {
    type Err = CaptureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_str(s).ok_or_else(|| CaptureError::UnknownKind(s.to_string()))
    }
}

impl From<ErrorKind> for String {
    fn from(kind: ErrorKind) -> Self {
        as_str(kind).to_string()
    }
}

impl TryFrom<String> for ErrorKind {
    type Error = CaptureError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
