//! Pure string transforms applied to raw user input before it is persisted.
//!
//! Sanitizers never judge validity and never fail: every function here is a
//! total `&str -> String` mapping. [`sanitize_value`] extends them to loosely
//! typed form values, treating `null` as the empty string.
//!
//! `sql` is a naive denylist. It exists as defense in depth only and must never
//! be the sole protection against SQL injection; persistence goes through
//! parameterized queries regardless.
//!
//! License: MIT OR APACHE 2.0

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::FormguardError;
use crate::value;

// `.*?` stops at the first closing tag, so two script blocks separated by
// ordinary text do not swallow that text.
static SCRIPT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b.*?</script>").expect("script pattern must compile"));
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag pattern must compile"));
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern must compile"));

/// Strips `<script>` blocks (tag and content), then every remaining tag, then trims.
pub fn html(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    let without_scripts = SCRIPT_BLOCK.replace_all(input, "");
    let without_tags = HTML_TAG.replace_all(&without_scripts, "");
    without_tags.trim().to_string()
}

/// Replaces `& < > " ' /` with HTML entities in a single pass.
///
/// Not idempotent: escaping an already escaped string escapes its `&` again.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            other => out.push(other),
        }
    }
    out
}

/// Collapses whitespace runs to a single space and trims both ends.
pub fn whitespace(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    WHITESPACE_RUN.replace_all(input, " ").trim().to_string()
}

/// Removes `'`, `"`, `;` and `\`.
pub fn sql(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, '\'' | '"' | ';' | '\\'))
        .collect()
}

/// Replaces every character outside `[a-zA-Z0-9.-]` with `_`.
pub fn filename(input: &str) -> String {
    input
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect()
}

/// Names a sanitizer, for schema files and the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sanitizer {
    Html,
    Escape,
    Whitespace,
    Sql,
    Filename,
}

impl Sanitizer {
    pub const ALL: [Sanitizer; 5] = [
        Sanitizer::Html,
        Sanitizer::Escape,
        Sanitizer::Whitespace,
        Sanitizer::Sql,
        Sanitizer::Filename,
    ];

    pub fn apply(&self, input: &str) -> String {
        match self {
            Sanitizer::Html => html(input),
            Sanitizer::Escape => escape(input),
            Sanitizer::Whitespace => whitespace(input),
            Sanitizer::Sql => sql(input),
            Sanitizer::Filename => filename(input),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sanitizer::Html => "html",
            Sanitizer::Escape => "escape",
            Sanitizer::Whitespace => "whitespace",
            Sanitizer::Sql => "sql",
            Sanitizer::Filename => "filename",
        }
    }
}

impl fmt::Display for Sanitizer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sanitizer {
    type Err = FormguardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sanitizer::ALL
            .iter()
            .copied()
            .find(|sanitizer| sanitizer.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FormguardError::UnknownSanitizer(s.to_string()))
    }
}

/// Applies `sanitizer` to a form value. `null` and `""` yield `""`.
pub fn sanitize_value(sanitizer: Sanitizer, value: &Value) -> String {
    if value::is_empty(value) {
        return String::new();
    }
    sanitizer.apply(&value::as_text(value))
}

/// Applies a sanitizer plan in order.
///
/// Only strings are rewritten; every other value passes through unchanged so
/// a cleaned form keeps its JSON shape.
pub fn apply_plan(plan: &[Sanitizer], value: &Value) -> Value {
    match value {
        Value::String(s) if !plan.is_empty() => {
            let cleaned = plan.iter().fold(s.clone(), |acc, sanitizer| sanitizer.apply(&acc));
            Value::String(cleaned)
        }
        other => other.clone(),
    }
}
