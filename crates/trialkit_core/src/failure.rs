//! Captured failures.
//!
//! A [`Failure`] records a caught error: its [`ErrorKind`], its value (the message), the [`Frame`]s it propagated
//! through and, optionally, the original error object. It can render itself as a traceback and can be *cleaned*:
//! cleaning renders the traceback once, keeps that text, and drops the frames and the original error. A cleaned
//! failure renders exactly like the full one did, so it can be stored, persisted or handed across a result boundary
//! without dragging live state along.

use std::cell::OnceCell;
use std::error::Error;
use std::fmt;

use crate::errors::ErrorKind;
#[cfg(feature = "json")]
use crate::errors::CaptureError;
use crate::traceback::{Frame, format_exception};

/// Result type returned by fixture phases and test bodies.
pub type Outcome = Result<(), Failure>;

type SourceError = Box<dyn Error + Send + Sync + 'static>;

/// A caught error with its traceback.
pub struct Failure {
    repr: Repr,
}

enum Repr {
    Full {
        kind: ErrorKind,
        value: String,
        frames: Vec<Frame>,
        source: Option<SourceError>,
        rendered: OnceCell<String>,
    },
    Cleaned {
        kind: ErrorKind,
        value: String,
        rendered: String,
    },
}

impl Failure {
    /// Create a failure with no frames yet.
    pub fn new(kind: ErrorKind, value: impl Into<String>) -> Self {
        Self {
            repr: Repr::Full {
                kind,
                value: value.into(),
                frames: Vec::new(),
                source: None,
                rendered: OnceCell::new(),
            },
        }
    }

    /// Wrap an arbitrary error. Its `Display` text becomes the value and the error itself is kept until
    /// [`clean`](Self::clean).
    pub fn from_error(kind: ErrorKind, error: impl Error + Send + Sync + 'static) -> Self {
        let value = error.to_string();
        let mut failure = Self::new(kind, value);
        if let Repr::Full { source, .. } = &mut failure.repr {
            *source = Some(Box::new(error));
        }
        failure
    }

    /// Restore a cleaned failure from its persisted record.
    pub fn from_record(record: FailureRecord) -> Self {
        Self {
            repr: Repr::Cleaned {
                kind: record.kind,
                value: record.value,
                rendered: record.traceback,
            },
        }
    }

    /// Append the innermost frame (the raise site).
    ///
    /// Has no effect once the failure has been rendered or cleaned: its traceback text is final.
    pub fn with_frame(mut self, frame: Frame) -> Self {
        if let Some(frames) = self.unrendered_frames() {
            frames.push(frame);
        }
        self
    }

    /// Prepend an outer frame as the failure propagates to a caller.
    ///
    /// Same rule as [`with_frame`](Self::with_frame): ignored after the first render.
    pub fn called_from(mut self, frame: Frame) -> Self {
        if let Some(frames) = self.unrendered_frames() {
            frames.insert(0, frame);
        }
        self
    }

    fn unrendered_frames(&mut self) -> Option<&mut Vec<Frame>> {
        match &mut self.repr {
            Repr::Full { frames, rendered, .. } if rendered.get().is_none() => Some(frames),
            _ => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match &self.repr {
            Repr::Full { kind, .. } | Repr::Cleaned { kind, .. } => *kind,
        }
    }

    /// The exception value (message). Unaffected by cleaning.
    pub fn value(&self) -> &str {
        match &self.repr {
            Repr::Full { value, .. } | Repr::Cleaned { value, .. } => value,
        }
    }

    /// The frames, outermost first. `None` once cleaned.
    pub fn frames(&self) -> Option<&[Frame]> {
        match &self.repr {
            Repr::Full { frames, .. } => Some(frames),
            Repr::Cleaned { .. } => None,
        }
    }

    /// The original error, if one was captured. `None` once cleaned.
    pub fn source_error(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        match &self.repr {
            Repr::Full { source, .. } => source.as_deref(),
            Repr::Cleaned { .. } => None,
        }
    }

    pub fn is_cleaned(&self) -> bool {
        matches!(self.repr, Repr::Cleaned { .. })
    }

    /// Return the first of `kinds` this failure matches. [`ErrorKind::Exception`] matches everything.
    pub fn check(&self, kinds: &[ErrorKind]) -> Option<ErrorKind> {
        let own = self.kind();
        kinds
            .iter()
            .copied()
            .find(|&k| k == own || k == ErrorKind::Exception)
    }

    /// The full traceback text. Rendered once and memoized; identical before and after [`clean`](Self::clean).
    pub fn render(&self) -> &str {
        match &self.repr {
            Repr::Full {
                kind,
                value,
                frames,
                rendered,
                ..
            } => rendered.get_or_init(|| format_exception(*kind, value, frames)),
            Repr::Cleaned { rendered, .. } => rendered,
        }
    }

    /// Drop frames and the original error, keeping the rendered traceback. One-way and idempotent.
    pub fn clean(&mut self) {
        let Repr::Full {
            kind,
            value,
            frames,
            rendered,
            ..
        } = &mut self.repr
        else {
            return;
        };
        let kind = *kind;
        let text = rendered
            .take()
            .unwrap_or_else(|| format_exception(kind, value, frames));
        let value = std::mem::take(value);
        self.repr = Repr::Cleaned {
            kind,
            value,
            rendered: text,
        };
    }

    /// Owned variant of [`clean`](Self::clean).
    pub fn into_cleaned(mut self) -> Self {
        self.clean();
        self
    }

    /// Snapshot the failure in its persistable (cleaned) form.
    pub fn to_record(&self) -> FailureRecord {
        FailureRecord {
            kind: self.kind(),
            value: self.value().to_string(),
            traceback: self.render().to_string(),
        }
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Failure")
            .field("kind", &self.kind())
            .field("value", &self.value())
            .field("frames", &self.frames().map(<[Frame]>::len))
            .field("cleaned", &self.is_cleaned())
            .finish()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value().is_empty() {
            write!(f, "{}", self.kind())
        } else {
            write!(f, "{}: {}", self.kind(), self.value())
        }
    }
}

impl Error for Failure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.repr {
            Repr::Full {
                source: Some(source), ..
            } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// The persistable form of a [`Failure`]: kind, value and rendered traceback.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct FailureRecord {
    pub kind: ErrorKind,
    pub value: String,
    pub traceback: String,
}

#[cfg(feature = "json")]
impl FailureRecord {
    pub fn to_json(&self) -> Result<String, CaptureError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, CaptureError> {
        Ok(serde_json::from_str(text)?)
    }
}
