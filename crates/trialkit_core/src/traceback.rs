//! Traceback frames and the canonical traceback formatter.
//!
//! The layout matches the interpreter-style traceback that test tooling expects:
//!
//! ```text
//! Traceback (most recent call last):
//!   File "src/ops.rs", line 12, in div
//!     raise!(ZeroDivisionError, "division by zero");
//! ZeroDivisionError: division by zero
//! ```
//!
//! ## Notes
//!
//! - Frames are ordered outermost first ("most recent call last").
//! - A frame without an attached source line is looked up through [`linecache`] at format time. Lookup failures are
//!   silent; the source line is simply omitted.
//! - Every function here returns text ending in `\n` (or the empty string for no frames).

use std::borrow::Cow;
use std::fmt::Write as _;

use crate::errors::ErrorKind;

const HEADER: &str = "Traceback (most recent call last):\n";

/// One entry of a traceback: a named function and the file position that was executing in it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame {
    name: Cow<'static, str>,
    file: Cow<'static, str>,
    line: u32,
    source: Option<String>,
}

impl Frame {
    pub fn new(name: impl Into<Cow<'static, str>>, file: impl Into<Cow<'static, str>>, line: u32) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
            line,
            source: None,
        }
    }

    /// Attach the source line explicitly instead of looking it up at format time.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// The attached source line, if any. Does not consult the [`linecache`].
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn source_line(&self) -> Option<String> {
        match &self.source {
            Some(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
            None => linecache::getline(&self.file, self.line),
        }
    }
}

/// Format the frames of a traceback, without header or exception line.
pub fn format_tb(frames: &[Frame]) -> String {
    let mut out = String::new();
    for frame in frames {
        // Writing to String cannot fail.
        let _ = writeln!(
            out,
            "  File \"{}\", line {}, in {}",
            frame.file, frame.line, frame.name
        );
        if let Some(source) = frame.source_line() {
            let _ = writeln!(out, "    {source}");
        }
    }
    out
}

/// Format the final `Kind: value` line of a traceback.
///
/// An empty value yields just the kind.
pub fn format_exception_only(kind: ErrorKind, value: &str) -> String {
    if value.is_empty() {
        format!("{kind}\n")
    } else {
        format!("{kind}: {value}\n")
    }
}

/// Format a full traceback: header, frames and exception line.
///
/// With no frames only the exception line is produced.
pub fn format_exception(kind: ErrorKind, value: &str, frames: &[Frame]) -> String {
    let mut out = String::new();
    if !frames.is_empty() {
        out.push_str(HEADER);
        out.push_str(&format_tb(frames));
    }
    out.push_str(&format_exception_only(kind, value));
    out
}

/// Cached, best-effort source line lookup.
///
/// Paths are resolved relative to the current directory, which is where `file!()` paths point when tests run under
/// cargo. Files are read once per thread and kept until [`clearcache`](linecache::clearcache).
pub mod linecache {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::fs;
    use std::rc::Rc;

    thread_local! {
        static CACHE: RefCell<HashMap<String, Option<Rc<Vec<String>>>>> = RefCell::new(HashMap::new());
    }

    /// Return line `lineno` (1-based) of `file`, stripped, or `None` when unavailable or blank.
    pub fn getline(file: &str, lineno: u32) -> Option<String> {
        let index = usize::try_from(lineno).ok()?.checked_sub(1)?;
        let lines = CACHE.with(|cache| {
            cache
                .borrow_mut()
                .entry(file.to_string())
                .or_insert_with(|| read_lines(file))
                .clone()
        })?;
        lines
            .get(index)
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
    }

    /// Drop every cached file for the current thread.
    pub fn clearcache() {
        CACHE.with(|cache| cache.borrow_mut().clear());
    }

    fn read_lines(file: &str) -> Option<Rc<Vec<String>>> {
        let text = fs::read_to_string(file).ok()?;
        Some(Rc::new(text.lines().map(str::to_string).collect()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn frames() -> Vec<Frame> {
        vec![
            Frame::new("run", "harness/case.rs", 120).with_source("    let outcome = body(fixture);"),
            Frame::new("test_foo", "suite/test_arith.rs", 31).with_source("traced!(div(1, 0));"),
            Frame::new("div", "lib/ops.rs", 18),
        ]
    }

    #[test]
    fn exception_layout() {
        let text = format_exception(ErrorKind::ZeroDivisionError, "division by zero", &frames());
        insta::assert_snapshot!(text, @r#"
        Traceback (most recent call last):
          File "harness/case.rs", line 120, in run
            let outcome = body(fixture);
          File "suite/test_arith.rs", line 31, in test_foo
            traced!(div(1, 0));
          File "lib/ops.rs", line 18, in div
        ZeroDivisionError: division by zero
        "#);
    }

    #[test]
    fn trailing_newline_convention() {
        let text = format_exception(ErrorKind::ValueError, "bad", &frames());
        assert!(text.ends_with("ValueError: bad\n"));
        assert!(!text.ends_with("\n\n"));
        assert!(format_tb(&frames()).ends_with('\n'));
    }

    #[test]
    fn no_frames_omits_header() {
        assert_eq!(format_exception(ErrorKind::KeyError, "'a'", &[]), "KeyError: 'a'\n");
        assert_eq!(format_tb(&[]), "");
    }

    #[test]
    fn empty_value_prints_kind_only() {
        assert_eq!(format_exception_only(ErrorKind::FailTest, ""), "FailTest\n");
    }

    #[test]
    fn blank_source_is_omitted() {
        let frame = Frame::new("f", "nowhere.rs", 1).with_source("   ");
        assert_eq!(format_tb(&[frame]), "  File \"nowhere.rs\", line 1, in f\n");
    }

    #[test]
    fn linecache_reads_and_strips() {
        let dir = std::env::temp_dir().join(format!("trialkit_linecache_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sample.rs");
        std::fs::write(&path, "fn main() {\n    let x = 1 / 0;\n}\n").unwrap();
        let path = path.to_string_lossy().to_string();

        assert_eq!(linecache::getline(&path, 2).as_deref(), Some("let x = 1 / 0;"));
        assert_eq!(linecache::getline(&path, 0), None);
        assert_eq!(linecache::getline(&path, 99), None);
        assert_eq!(linecache::getline("does/not/exist.rs", 1), None);

        // Cached content survives the file changing on disk until the cache is cleared.
        std::fs::write(&path, "changed\nchanged\n").unwrap();
        assert_eq!(linecache::getline(&path, 2).as_deref(), Some("let x = 1 / 0;"));
        linecache::clearcache();
        assert_eq!(linecache::getline(&path, 2).as_deref(), Some("changed"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
