//! Convert panics into [`Failure`]s.
//!
//! [`catch`] runs a closure under `catch_unwind`. A process-wide panic hook (installed on first use) records the
//! panic location into thread-local state while a capture is active on that thread; outside a capture it defers to
//! the previously installed hook, so ordinary panics elsewhere keep their usual output.
//!
//! ## Classification
//!
//! - Messages starting with `assertion` (what `assert!`/`assert_eq!` produce) become `AssertionError`.
//! - Messages of the form `Kind: message` with a known [`ErrorKind`] spelling become that kind.
//! - Anything else becomes `PanicException` with the whole message as value.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe, PanicHookInfo};
use std::sync::Once;

use crate::errors::{self, ErrorKind};
use crate::failure::Failure;
use crate::traceback::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Off,
    Quiet,
    Loud,
}

thread_local! {
    static MODE: Cell<Mode> = const { Cell::new(Mode::Off) };
    static LOCATION: RefCell<Option<(String, u32)>> = const { RefCell::new(None) };
}

static INSTALL: Once = Once::new();

fn install_hook() {
    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info: &PanicHookInfo<'_>| {
            let mode = MODE.with(Cell::get);
            if mode != Mode::Off {
                let location = info.location().map(|l| (l.file().to_string(), l.line()));
                LOCATION.with(|slot| *slot.borrow_mut() = location);
            }
            if mode != Mode::Quiet {
                previous(info);
            }
        }));
    });
}

/// Run `f`, converting a panic into a [`Failure`] whose single frame is named `name`.
///
/// With `quiet` set, the panic message is not printed by the default hook. Nested captures restore the outer mode.
pub fn catch<T>(name: &'static str, quiet: bool, f: impl FnOnce() -> Result<T, Failure>) -> Result<T, Failure> {
    install_hook();
    let mode = if quiet { Mode::Quiet } else { Mode::Loud };
    let outer = MODE.with(|m| m.replace(mode));
    LOCATION.with(|slot| slot.borrow_mut().take());

    let result = panic::catch_unwind(AssertUnwindSafe(f));

    MODE.with(|m| m.set(outer));
    match result {
        Ok(outcome) => outcome,
        Err(payload) => {
            let location = LOCATION.with(|slot| slot.borrow_mut().take());
            Err(from_panic(name, payload.as_ref(), location))
        }
    }
}

/// Extract the message from a panic payload.
pub fn payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}

/// Classify a panic message into a kind and value.
pub fn classify(message: &str) -> (ErrorKind, String) {
    if message.starts_with("assertion") {
        return (ErrorKind::AssertionError, message.to_string());
    }
    if let Some((name, rest)) = message.split_once(": ") {
        if let Some(kind) = errors::from_str(name) {
            return (kind, rest.to_string());
        }
    }
    (ErrorKind::PanicException, message.to_string())
}

fn from_panic(name: &'static str, payload: &(dyn Any + Send), location: Option<(String, u32)>) -> Failure {
    let message = payload_message(payload);
    let (kind, value) = classify(&message);
    let failure = Failure::new(kind, value);
    match location {
        Some((file, line)) => failure.with_frame(Frame::new(name, file, line)),
        None => failure,
    }
}
