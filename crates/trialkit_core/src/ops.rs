//! Checked arithmetic that raises Python-like failures instead of panicking.

use crate::failure::Failure;
use crate::raise;

/// True division (`/`): always a float, `ZeroDivisionError` on a zero divisor.
pub fn div(lhs: i64, rhs: i64) -> Result<f64, Failure> {
    if rhs == 0 {
        raise!(ZeroDivisionError, "division by zero");
    }
    Ok(lhs as f64 / rhs as f64)
}

/// Floor division (`//`), rounding toward negative infinity. `OverflowError` when the quotient does not fit.
pub fn floor_div(lhs: i64, rhs: i64) -> Result<i64, Failure> {
    if rhs == 0 {
        raise!(ZeroDivisionError, "integer division or modulo by zero");
    }
    let (Some(q), Some(r)) = (lhs.checked_div(rhs), lhs.checked_rem(rhs)) else {
        raise!(OverflowError, "integer floor division result out of range");
    };
    if (r > 0 && rhs < 0) || (r < 0 && rhs > 0) { Ok(q - 1) } else { Ok(q) }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn div_by_zero_raises() {
        let err = div(1, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ZeroDivisionError);
        assert_eq!(err.value(), "division by zero");
        assert_eq!(err.frames().unwrap()[0].name(), "div");
    }

    #[test]
    fn div_is_true_division() {
        assert_eq!(div(7, 2).unwrap(), 3.5);
    }

    #[test]
    fn floor_div_rounds_down() {
        assert_eq!(floor_div(7, 2).unwrap(), 3);
        assert_eq!(floor_div(-7, 2).unwrap(), -4);
        assert_eq!(floor_div(7, -2).unwrap(), -4);
        assert_eq!(
            floor_div(1, 0).unwrap_err().to_string(),
            "ZeroDivisionError: integer division or modulo by zero"
        );
    }

    #[test]
    fn floor_div_overflow_raises() {
        let err = floor_div(i64::MIN, -1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OverflowError);
        assert_eq!(err.frames().unwrap()[0].name(), "floor_div");
        assert_eq!(floor_div(i64::MIN, 1).unwrap(), i64::MIN);
        assert_eq!(floor_div(i64::MIN + 1, -1).unwrap(), i64::MAX);
    }
}
