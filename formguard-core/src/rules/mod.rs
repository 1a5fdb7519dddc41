// formguard-core/src/rules/mod.rs
//! The rule registry: reusable validation primitives.
//!
//! A [`Rule`] is either a *pattern rule* (a compiled regular expression) or a
//! *predicate rule* (a closed set of checks over a value), each paired with
//! the message shown when it fails. The built-in rules are lazily compiled,
//! process-wide statics exposed through [`ValidationRules`].
//!
//! The patterns are intentionally the same loose expressions the CRM forms
//! have always used. They accept some addresses and numbers a stricter
//! validator would reject (and vice versa); they are kept as-is so existing
//! records keep validating the same way.
//!
//! License: MIT OR APACHE 2.0

pub mod compiler;

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::value;

pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";
pub const PHONE_PATTERN: &str = r"^[+]?[(]?[0-9]{3}[)]?[-\s.]?[(]?[0-9]{3}[)]?[-\s.]?[0-9]{4,6}$";
pub const URL_PATTERN: &str = r"^(https?://)?([0-9a-z.-]+)\.([a-z.]{2,6})([/0-9A-Za-z_ .-]*)*/?$";
pub const ALPHANUMERIC_PATTERN: &str = r"^[a-zA-Z0-9]+$";
pub const NO_SPECIAL_CHARS_PATTERN: &str = r"^[a-zA-Z0-9\s]+$";

pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const PHONE_MESSAGE: &str = "Please enter a valid phone number";
pub const URL_MESSAGE: &str = "Please enter a valid URL";
pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const ALPHANUMERIC_MESSAGE: &str = "Only letters and numbers are allowed";
pub const NO_SPECIAL_CHARS_MESSAGE: &str = "Special characters are not allowed";

/// Checks that are not expressible as a single pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// Fails for `null` and `""`. `0` and `false` pass.
    Required,
    /// Value must be non-empty and at least this many characters long.
    MinLength(usize),
    /// Empty values pass; otherwise at most this many characters.
    MaxLength(usize),
}

impl Predicate {
    pub fn test(&self, value: &Value) -> bool {
        match *self {
            Predicate::Required => !value::is_empty(value),
            Predicate::MinLength(n) => !value::is_empty(value) && value::char_len(value) >= n,
            Predicate::MaxLength(n) => value::is_empty(value) || value::char_len(value) <= n,
        }
    }

    /// The default failure message for this predicate.
    pub fn default_message(&self) -> String {
        match *self {
            Predicate::Required => REQUIRED_MESSAGE.to_string(),
            Predicate::MinLength(n) => format!("Must be at least {} characters", n),
            Predicate::MaxLength(n) => format!("Must be no more than {} characters", n),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Predicate::Required => write!(f, "required"),
            Predicate::MinLength(n) => write!(f, "min_length({})", n),
            Predicate::MaxLength(n) => write!(f, "max_length({})", n),
        }
    }
}

#[derive(Debug, Clone)]
pub enum RuleKind {
    Pattern(Regex),
    Predicate(Predicate),
}

/// A single validation rule and the message it reports on failure.
#[derive(Debug, Clone)]
pub struct Rule {
    name: String,
    kind: RuleKind,
    message: String,
}

impl Rule {
    pub fn pattern(name: impl Into<String>, regex: Regex, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: RuleKind::Pattern(regex),
            message: message.into(),
        }
    }

    pub fn predicate(name: impl Into<String>, predicate: Predicate, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: RuleKind::Predicate(predicate),
            message: message.into(),
        }
    }

    /// Returns a copy of this rule reporting `message` instead.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Tests a raw string against the rule with no empty-value exemption.
    ///
    /// For pattern rules this is exactly the regex test, so `""` fails the
    /// email and phone patterns here even though [`Rule::check`] lets it through.
    pub fn matches(&self, text: &str) -> bool {
        match &self.kind {
            RuleKind::Pattern(regex) => regex.is_match(text),
            RuleKind::Predicate(predicate) => predicate.test(&Value::String(text.to_string())),
        }
    }

    /// Evaluates the rule against a form value.
    ///
    /// Pattern rules pass on empty values: presence is `required`'s job.
    pub fn check(&self, value: &Value) -> bool {
        match &self.kind {
            RuleKind::Pattern(regex) => value::is_empty(value) || regex.is_match(&value::as_text(value)),
            RuleKind::Predicate(predicate) => predicate.test(value),
        }
    }

    /// Short human-readable description used in rule listings.
    pub fn describe(&self) -> String {
        match &self.kind {
            RuleKind::Pattern(_) => self.name.clone(),
            RuleKind::Predicate(predicate) => predicate.to_string(),
        }
    }
}

fn builtin_pattern(name: &str, pattern: &str, message: &str) -> Rule {
    let regex = Regex::new(pattern).expect("built-in validation pattern must compile");
    Rule::pattern(name, regex, message)
}

static EMAIL: Lazy<Rule> = Lazy::new(|| builtin_pattern("email", EMAIL_PATTERN, EMAIL_MESSAGE));
static PHONE: Lazy<Rule> = Lazy::new(|| builtin_pattern("phone", PHONE_PATTERN, PHONE_MESSAGE));
static URL: Lazy<Rule> = Lazy::new(|| builtin_pattern("url", URL_PATTERN, URL_MESSAGE));
static ALPHANUMERIC: Lazy<Rule> =
    Lazy::new(|| builtin_pattern("alphanumeric", ALPHANUMERIC_PATTERN, ALPHANUMERIC_MESSAGE));
static NO_SPECIAL_CHARS: Lazy<Rule> =
    Lazy::new(|| builtin_pattern("no_special_chars", NO_SPECIAL_CHARS_PATTERN, NO_SPECIAL_CHARS_MESSAGE));
static REQUIRED: Lazy<Rule> =
    Lazy::new(|| Rule::predicate("required", Predicate::Required, REQUIRED_MESSAGE));

/// Entry point to the built-in rules.
pub struct ValidationRules;

impl ValidationRules {
    pub fn email() -> &'static Rule {
        &EMAIL
    }

    pub fn phone() -> &'static Rule {
        &PHONE
    }

    pub fn url() -> &'static Rule {
        &URL
    }

    pub fn required() -> &'static Rule {
        &REQUIRED
    }

    pub fn alphanumeric() -> &'static Rule {
        &ALPHANUMERIC
    }

    pub fn no_special_chars() -> &'static Rule {
        &NO_SPECIAL_CHARS
    }

    pub fn min_length(length: usize) -> Rule {
        let predicate = Predicate::MinLength(length);
        Rule::predicate("min_length", predicate, predicate.default_message())
    }

    pub fn max_length(length: usize) -> Rule {
        let predicate = Predicate::MaxLength(length);
        Rule::predicate("max_length", predicate, predicate.default_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_email_pattern() {
        for email in ["test@example.com", "user.name@domain.co.uk", "user+tag@example.org"] {
            assert!(ValidationRules::email().matches(email), "expected valid: {}", email);
        }
        for email in ["notanemail", "@example.com", "user@", "user@.com", "user@domain", ""] {
            assert!(!ValidationRules::email().matches(email), "expected invalid: {}", email);
        }
    }

    #[test]
    fn test_phone_pattern() {
        for phone in ["1234567890", "+1234567890", "(123) 456-7890", "123-456-7890", "123.456.7890"] {
            assert!(ValidationRules::phone().matches(phone), "expected valid: {}", phone);
        }
        for phone in ["abc", "12345", "123-456-78", ""] {
            assert!(!ValidationRules::phone().matches(phone), "expected invalid: {}", phone);
        }
    }

    #[test]
    fn test_url_pattern_does_not_require_scheme() {
        for url in [
            "https://example.com",
            "http://subdomain.example.com",
            "example.com",
            "www.example.com/path/to/page",
        ] {
            assert!(ValidationRules::url().matches(url), "expected valid: {}", url);
        }
        assert!(!ValidationRules::url().matches("not a url"));
        assert!(!ValidationRules::url().matches("ftp://example.com"));
    }

    #[test]
    fn test_character_class_rules() {
        assert!(ValidationRules::alphanumeric().matches("abc123"));
        assert!(!ValidationRules::alphanumeric().matches("abc 123"));
        assert!(ValidationRules::no_special_chars().matches("abc 123"));
        assert!(!ValidationRules::no_special_chars().matches("John123@"));
    }

    #[test]
    fn test_required_treats_zero_and_false_as_present() {
        let required = ValidationRules::required();
        assert!(!required.check(&Value::Null));
        assert!(!required.check(&json!("")));
        assert!(required.check(&json!(0)));
        assert!(required.check(&json!(false)));
        assert!(required.check(&json!(" ")));
    }

    #[test]
    fn test_max_length_boundaries() {
        let rule = ValidationRules::max_length(5);
        assert!(rule.check(&json!("abcde")));
        assert!(!rule.check(&json!("abcdef")));
        assert!(rule.check(&Value::Null));
        assert!(rule.check(&json!("")));
        assert_eq!(rule.message(), "Must be no more than 5 characters");
    }

    #[test]
    fn test_min_length_rejects_empty() {
        let rule = ValidationRules::min_length(3);
        assert!(!rule.check(&json!("")));
        assert!(!rule.check(&Value::Null));
        assert!(!rule.check(&json!("ab")));
        assert!(rule.check(&json!("abc")));
        assert_eq!(rule.message(), "Must be at least 3 characters");
    }

    #[test]
    fn test_pattern_rule_skips_empty_values() {
        assert!(ValidationRules::phone().check(&json!("")));
        assert!(ValidationRules::phone().check(&Value::Null));
        assert!(!ValidationRules::phone().check(&json!("abc")));
    }

    #[test]
    fn test_pattern_rule_coerces_numbers() {
        assert!(ValidationRules::phone().check(&json!(1234567890u64)));
        assert!(ValidationRules::alphanumeric().check(&json!(42)));
    }
}
