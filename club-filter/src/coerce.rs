//! Raw string → typed value coercion.
//!
//! | Operator              | Coercion                                     |
//! |-----------------------|----------------------------------------------|
//! | `gt` `gte` `lt` `lte` | finite number, otherwise an error            |
//! | `ne`                  | number if it parses, else text               |
//! | `like`                | verbatim text                                |
//! | `eq`                  | `true`/`false`, else number, else text       |
//!
//! Numbers that fit in an `i64` become [`Value::Int`], other finite
//! decimals [`Value::Float`]. `NaN` and infinities are never numbers.

use crate::error::Reason;
use crate::{Operator, Value};

/// Coerce a raw value for `op`.
///
/// Only the range operators can fail.
///
/// # Examples
///
/// ```
/// use club_filter::{Operator, Value, coerce};
///
/// assert_eq!(coerce(Operator::Eq, "true"), Ok(Value::Bool(true)));
/// assert_eq!(coerce(Operator::Eq, "42"), Ok(Value::Int(42)));
/// assert_eq!(coerce(Operator::Ne, "pending"), Ok(Value::text("pending")));
/// assert_eq!(coerce(Operator::Like, "42"), Ok(Value::text("42")));
/// assert!(coerce(Operator::Gt, "abc").is_err());
/// ```
pub fn coerce(op: Operator, raw: &str) -> Result<Value, Reason> {
    if op.is_range() {
        return parse_number(raw).ok_or_else(|| Reason::ValueCoercionFailure {
            operator: op,
            value: raw.to_string(),
        });
    }

    Ok(match op {
        Operator::Ne => parse_number(raw).unwrap_or_else(|| Value::text(raw)),
        Operator::Like => Value::text(raw),
        _ => parse_bool(raw)
            .map(Value::Bool)
            .or_else(|| parse_number(raw))
            .unwrap_or_else(|| Value::text(raw)),
    })
}

/// Exact, case-sensitive boolean literals.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Parse a finite number, preferring an integer.
pub(crate) fn parse_number(raw: &str) -> Option<Value> {
    if let Ok(i) = raw.parse::<i64>() {
        return Some(Value::Int(i));
    }
    raw.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Value::Float)
}
