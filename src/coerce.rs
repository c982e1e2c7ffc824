//! Coercion from a stored [`Value`] to a requested scalar type.
//!
//! The rules are deliberately permissive in one direction each: anything
//! renders as a string, numbers and numeric strings become integers, and a
//! small vocabulary of truthy/falsy strings becomes booleans. `key` is only
//! used to label the error.

use crate::error::ConfigError;
use crate::value::Value;

/// Render `val` as a string. Never fails.
///
/// Native strings pass through untouched; everything else uses the value's
/// canonical textual rendering (integers in decimal, floats without
/// trailing zeros, `true`/`false` for booleans).
pub fn to_string(val: &Value) -> String {
    val.to_string()
}

/// Coerce `val` to an integer.
///
/// Floats truncate toward zero. Strings are trimmed, then tried as an
/// integer parse, then as a float parse truncated to an integer.
pub fn to_int(val: &Value, key: &str) -> Result<i64, ConfigError> {
    match val {
        Value::Integer(i) => Ok(*i),
        Value::Float(f) => Ok(*f as i64),
        Value::String(s) => {
            let clean = s.trim();
            if let Ok(i) = clean.parse::<i64>() {
                return Ok(i);
            }
            if let Ok(f) = clean.parse::<f64>() {
                return Ok(f as i64);
            }
            Err(type_mismatch(key, "int", val))
        }
        _ => Err(type_mismatch(key, "int", val)),
    }
}

/// Coerce `val` to a boolean.
///
/// Numbers are true iff nonzero. Strings match case-insensitively against
/// `true/t/yes/y/on/1` and `false/f/no/n/off/0`; any other string fails.
pub fn to_bool(val: &Value, key: &str) -> Result<bool, ConfigError> {
    match val {
        Value::Bool(b) => Ok(*b),
        Value::Integer(i) => Ok(*i != 0),
        Value::Float(f) => Ok(*f != 0.0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "on" | "1" => Ok(true),
            "false" | "f" | "no" | "n" | "off" | "0" => Ok(false),
            _ => Err(type_mismatch(key, "bool", val)),
        },
        _ => Err(type_mismatch(key, "bool", val)),
    }
}

fn type_mismatch(key: &str, expected: &'static str, actual: &Value) -> ConfigError {
    ConfigError::TypeMismatch {
        key: key.to_string(),
        expected,
        actual: actual.type_name(),
    }
}
