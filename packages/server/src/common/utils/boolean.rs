//! Permissive boolean coercion for loosely-typed request fields.

use serde_json::Value;

/// Coerce a JSON value into a bool, accepting the common truthy/falsy string
/// and numeric spellings clients actually send. Returns `None` when the value
/// cannot reasonably be read as a boolean.
pub fn ensure_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "1" => Some(true),
            "false" | "f" | "no" | "n" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
