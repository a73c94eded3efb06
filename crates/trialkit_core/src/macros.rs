//! Raise-site macros.
//!
//! Rust has no runtime notion of "the current frame", so frames are captured where errors are raised or propagated:
//! [`frame!`](crate::frame) records the enclosing function, file and line, and the other macros build on it.

/// Name of the enclosing function (last path segment, closures skipped).
#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        let name = ::core::any::type_name_of_val(&f);
        let name = name.strip_suffix("::f").unwrap_or(name);
        let name = name.trim_end_matches("::{{closure}}");
        name.rsplit("::").next().unwrap_or(name)
    }};
}

/// A [`Frame`](crate::traceback::Frame) for the current position.
#[macro_export]
macro_rules! frame {
    () => {
        $crate::traceback::Frame::new($crate::function_name!(), file!(), line!())
    };
}

/// Return early with a [`Failure`](crate::failure::Failure) of the given kind, raised here.
///
/// ```rust
/// use trialkit_core::{Failure, raise};
///
/// fn parse(digit: char) -> Result<u32, Failure> {
///     match digit.to_digit(10) {
///         Some(d) => Ok(d),
///         None => raise!(ValueError, "invalid digit {digit:?}"),
///     }
/// }
///
/// let err = parse('x').unwrap_err();
/// assert_eq!(err.to_string(), "ValueError: invalid digit 'x'");
/// assert_eq!(err.frames().unwrap()[0].name(), "parse");
/// ```
#[macro_export]
macro_rules! raise {
    ($kind:ident) => {
        $crate::raise!($kind, "")
    };
    ($kind:ident, $($arg:tt)+) => {
        return ::core::result::Result::Err(
            $crate::failure::Failure::new($crate::errors::ErrorKind::$kind, format!($($arg)+))
                .with_frame($crate::frame!()),
        )
    };
}

/// Fail the running test (`FailTest`).
#[macro_export]
macro_rules! fail {
    () => {
        $crate::raise!(FailTest)
    };
    ($($arg:tt)+) => {
        $crate::raise!(FailTest, $($arg)+)
    };
}

/// Skip the running test; the message is the skip reason.
#[macro_export]
macro_rules! skip {
    ($($arg:tt)+) => {
        $crate::raise!(SkipTest, $($arg)+)
    };
}

/// Fail the running test unless `cond` holds.
#[macro_export]
macro_rules! ensure {
    ($cond:expr) => {
        if !$cond {
            $crate::fail!("{} is not true", stringify!($cond));
        }
    };
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::fail!($($arg)+);
        }
    };
}

/// Fail the running test unless both sides compare equal.
#[macro_export]
macro_rules! ensure_eq {
    ($left:expr, $right:expr) => {
        match (&$left, &$right) {
            (left, right) => {
                if left != right {
                    $crate::fail!("{:?} != {:?}", left, right);
                }
            }
        }
    };
}

/// Unwrap a `Result<T, Failure>`, or return the failure with the current frame prepended.
#[macro_export]
macro_rules! traced {
    ($expr:expr) => {
        match $expr {
            ::core::result::Result::Ok(value) => value,
            ::core::result::Result::Err(failure) => {
                return ::core::result::Result::Err($crate::failure::Failure::called_from(failure, $crate::frame!()))
            }
        }
    };
}
