// formguard-core/src/value.rs
//! Helpers for treating loosely-typed form values as text.
//!
//! Form payloads arrive as JSON, so a field value may be a string, a number, a
//! boolean, `null`, or occasionally a nested structure. Rules and sanitizers
//! operate on text, and this module defines the single coercion they share.

use std::borrow::Cow;

use lazy_static::lazy_static;
use log::debug;
use serde_json::Value;

lazy_static! {
    /// Whether raw field values may appear in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("FORMGUARD_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// Returns `true` for values that count as "nothing entered": `null` and `""`.
///
/// `0` and `false` are real answers and are *not* empty.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Coerces a value to the text that rules and sanitizers see.
///
/// * strings are borrowed as-is
/// * `null` becomes `""`
/// * numbers and booleans use their JSON spelling (`0`, `1.5`, `false`)
/// * arrays and objects use their compact JSON text
pub fn as_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Null => Cow::Borrowed(""),
        Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        Value::Number(n) => Cow::Owned(n.to_string()),
        other => Cow::Owned(other.to_string()),
    }
}

/// Length of a value in Unicode scalar values, after coercion.
pub fn char_len(value: &Value) -> usize {
    as_text(value).chars().count()
}

pub fn redact_value(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.chars().count() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.chars().count())
    }
}

fn loggable(s: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        s.to_string()
    } else {
        redact_value(s)
    }
}

pub(crate) fn log_rule_failure_debug(field: &str, rule_name: &str, value: &Value) {
    debug!(
        "Field '{}' failed rule '{}' for value '{}'",
        field,
        rule_name,
        loggable(&as_text(value))
    );
}
