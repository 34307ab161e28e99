//! Integer and boolean coercion.
//!
//! Every script value is a string.  These routines are the whole numeric and
//! boolean type system: 32-bit signed integers and a fixed truthy/falsy
//! vocabulary.  There are no floats.

use super::error::ScriptError;
use super::keyword::{FALSE_VALUE, TRUE_VALUE};
use crate::store::NULL_VALUE;

/// Parse a plain integer the way comparisons do: surrounding whitespace is
/// allowed, anything else must be a valid `i32`.
pub fn parse_int(s: &str) -> Option<i32> {
    s.trim().parse().ok()
}

/// Integer coercion: empty, `null` and `false` are 0, `true` is 1.
pub fn to_int(s: &str) -> Result<i32, ScriptError> {
    let t = s.trim();
    if t.is_empty() || t.eq_ignore_ascii_case(NULL_VALUE) || t.eq_ignore_ascii_case(FALSE_VALUE) {
        return Ok(0);
    }
    if t.eq_ignore_ascii_case(TRUE_VALUE) {
        return Ok(1);
    }
    t.parse()
        .map_err(|_| ScriptError::Coercion(format!("Value is not numeric: {s}")))
}

/// Boolean coercion.  Values outside the recognised vocabulary are errors;
/// callers decide whether to propagate or treat them as false.
pub fn to_bool(s: &str) -> Result<bool, ScriptError> {
    let t = s.trim().to_ascii_lowercase();
    match t.as_str() {
        "" | "null" | "false" | "f" | "off" | "no" | "n" | "0" => Ok(false),
        "true" | "t" | "on" | "yes" | "y" | "1" | "-1" => Ok(true),
        _ => Err(ScriptError::Coercion(format!("Value is not boolean: {s}"))),
    }
}

/// Boolean coercion with the "false on error" policy of predicates.
pub fn to_bool_lenient(s: &str) -> Result<bool, ScriptError> {
    match to_bool(s) {
        Err(e) if e.is_coercion() => Ok(false),
        other => other,
    }
}

/// Render a boolean as `"true"` / `"false"`.
pub fn bool_str(b: bool) -> &'static str {
    if b {
        TRUE_VALUE
    } else {
        FALSE_VALUE
    }
}

/// Narrow a wide intermediate to 32 bits, raising `message` on overflow.
pub fn narrow(value: i64, message: impl FnOnce() -> String) -> Result<i32, ScriptError> {
    i32::try_from(value).map_err(|_| ScriptError::Arithmetic(message()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
