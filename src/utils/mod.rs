// Utility functions

use crate::types::*;
use serde_json::Value;

/// Validates a value against a constraint and returns an error if it fails
pub fn validate<T, F>(
    value: T,
    constraint: F,
    error_message: impl Into<String>,
) -> DsccResult<T>
where
    F: FnOnce(&T) -> bool,
{
    if constraint(&value) {
        Ok(value)
    } else {
        Err(DsccError::Validation(error_message.into()))
    }
}

/// Validates a string against common constraints
pub struct StringValidator;

impl StringValidator {
    /// Validates that a string is not blank
    pub fn not_empty(value: impl Into<String>, param_name: &str) -> DsccResult<String> {
        let value = value.into();
        validate(
            value,
            |s| !s.trim().is_empty(),
            format!("{} cannot be empty", param_name),
        )
    }

    /// Validates a value that will be placed in a URL path.
    /// Dot segments and percent escapes are refused.
    pub fn path_segment(value: impl Into<String>, param_name: &str) -> DsccResult<String> {
        let value = Self::not_empty(value, param_name)?;
        let value = validate(
            value,
            |s| !s.contains(['/', '\\', '?', '#', '%']),
            format!("{} must not contain '/', '\\', '?', '#' or '%'", param_name),
        )?;
        validate(
            value,
            |s| s != "." && s != "..",
            format!("{} must not be a dot segment", param_name),
        )
    }
}

/// Pull a human readable message out of an error body
pub fn error_message_from_body(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) {
        for key in ["message", "error", "errorMessage", "detail"] {
            match map.get(key) {
                Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.clone()),
                Some(Value::Object(inner)) => {
                    if let Some(Value::String(s)) = inner.get("message") {
                        return Some(s.clone());
                    }
                }
                _ => {}
            }
        }
    }

    Some(trimmed.to_string())
}

/// The `items` array of a list response, empty when absent
pub fn items(response: &Value) -> &[Value] {
    response
        .get("items")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// First object whose `key` field equals `value`
pub fn find_by_key<'a>(items: &'a [Value], key: &str, value: &str) -> Option<&'a Value> {
    items.iter().find(|item| match item.get(key) {
        Some(Value::String(s)) => s == value,
        Some(other @ (Value::Number(_) | Value::Bool(_))) => other.to_string() == value,
        _ => false,
    })
}
