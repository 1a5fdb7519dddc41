// formguard-core/src/field.rs
//! Field-level validation.
//!
//! [`Field`] is the closed set of contact-form fields with built-in rules.
//! Its bindings are resolved with an exhaustive `match`, so adding a field
//! without deciding its rules is a compile error. Names outside the set are
//! not an error: they simply have no rules and always validate.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rules::{Rule, ValidationRules};
use crate::sanitizers::Sanitizer;
use crate::source::{BuiltinRules, RuleSource};
use crate::value;

/// Outcome of validating one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self { valid: true, error: None }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(message.into()),
        }
    }
}

/// Contact-form fields with built-in validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Email,
    Phone,
    Website,
    FirstName,
    LastName,
    Company,
    Title,
    Notes,
}

static EMAIL_RULES: Lazy<Vec<Rule>> =
    Lazy::new(|| vec![ValidationRules::required().clone(), ValidationRules::email().clone()]);
static PHONE_RULES: Lazy<Vec<Rule>> = Lazy::new(|| vec![ValidationRules::phone().clone()]);
static WEBSITE_RULES: Lazy<Vec<Rule>> = Lazy::new(|| vec![ValidationRules::url().clone()]);
static PERSON_NAME_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        ValidationRules::required().clone(),
        ValidationRules::max_length(50),
        ValidationRules::no_special_chars().clone(),
    ]
});
static SHORT_TEXT_RULES: Lazy<Vec<Rule>> = Lazy::new(|| vec![ValidationRules::max_length(100)]);
static NOTES_RULES: Lazy<Vec<Rule>> = Lazy::new(|| vec![ValidationRules::max_length(5000)]);

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Email,
        Field::Phone,
        Field::Website,
        Field::FirstName,
        Field::LastName,
        Field::Company,
        Field::Title,
        Field::Notes,
    ];

    /// The name the field carries in form payloads.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Website => "website",
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Company => "company",
            Field::Title => "title",
            Field::Notes => "notes",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|field| field.name() == name)
    }

    /// Rules for this field, in evaluation order.
    pub fn rules(&self) -> &'static [Rule] {
        match self {
            Field::Email => EMAIL_RULES.as_slice(),
            Field::Phone => PHONE_RULES.as_slice(),
            Field::Website => WEBSITE_RULES.as_slice(),
            Field::FirstName | Field::LastName => PERSON_NAME_RULES.as_slice(),
            Field::Company | Field::Title => SHORT_TEXT_RULES.as_slice(),
            Field::Notes => NOTES_RULES.as_slice(),
        }
    }

    /// Sanitizers applied to this field before it is persisted.
    pub fn default_sanitizers(&self) -> &'static [Sanitizer] {
        match self {
            Field::Email | Field::Phone | Field::Website => &[Sanitizer::Whitespace],
            Field::FirstName | Field::LastName | Field::Company | Field::Title => {
                &[Sanitizer::Html, Sanitizer::Whitespace]
            }
            Field::Notes => &[Sanitizer::Html],
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing a name that is not a built-in field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFieldError(pub String);

impl fmt::Display for UnknownFieldError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "'{}' is not a built-in field", self.0)
    }
}

impl std::error::Error for UnknownFieldError {}

impl FromStr for Field {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::from_name(s).ok_or_else(|| UnknownFieldError(s.to_string()))
    }
}

/// Evaluates `rules` in order and reports the first failure.
pub fn validate(value: &Value, rules: &[Rule]) -> ValidationResult {
    rules
        .iter()
        .find(|rule| !rule.check(value))
        .map(|rule| ValidationResult::invalid(rule.message()))
        .unwrap_or_else(ValidationResult::ok)
}

/// Validates a value against the rules `source` binds to `name`.
pub fn validate_field_with(source: &dyn RuleSource, name: &str, value: &Value) -> ValidationResult {
    let rules = source.rules_for(name);
    match rules.iter().find(|rule| !rule.check(value)) {
        Some(rule) => {
            value::log_rule_failure_debug(name, rule.name(), value);
            ValidationResult::invalid(rule.message())
        }
        None => ValidationResult::ok(),
    }
}

/// Validates a value against the built-in rules for `name`.
pub fn validate_field(name: &str, value: &Value) -> ValidationResult {
    validate_field_with(&BuiltinRules, name, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_name(field.name()), Some(field));
            assert_eq!(field.name().parse::<Field>().unwrap(), field);
        }
        assert_eq!(Field::from_name("FirstName"), None);
        assert!("middleName".parse::<Field>().is_err());
    }

    #[test]
    fn test_validate_short_circuits_on_first_failure() {
        let rules = [ValidationRules::required().clone(), ValidationRules::email().clone()];
        assert_eq!(validate(&json!("test@example.com"), &rules), ValidationResult::ok());
        assert_eq!(
            validate(&json!(""), &rules),
            ValidationResult::invalid("This field is required")
        );
        assert_eq!(
            validate(&json!("notanemail"), &rules),
            ValidationResult::invalid("Please enter a valid email address")
        );
    }

    #[test]
    fn test_validate_with_no_rules_is_valid() {
        assert!(validate(&json!("anything"), &[]).valid);
    }

    #[test]
    fn test_email_field() {
        assert_eq!(validate_field("email", &json!("test@example.com")), ValidationResult::ok());
        assert_eq!(
            validate_field("email", &json!("")),
            ValidationResult::invalid("This field is required")
        );
        assert_eq!(
            validate_field("email", &Value::Null),
            ValidationResult::invalid("This field is required")
        );
    }

    #[test]
    fn test_phone_is_optional() {
        assert!(validate_field("phone", &json!("")).valid);
        assert!(validate_field("phone", &Value::Null).valid);
        assert_eq!(
            validate_field("phone", &json!("abc")),
            ValidationResult::invalid("Please enter a valid phone number")
        );
    }

    #[test]
    fn test_first_name_field() {
        assert!(validate_field("firstName", &json!("John")).valid);
        assert_eq!(
            validate_field("firstName", &json!("John123@")),
            ValidationResult::invalid("Special characters are not allowed")
        );
        assert_eq!(
            validate_field("lastName", &json!("a".repeat(51))),
            ValidationResult::invalid("Must be no more than 50 characters")
        );
    }

    #[test]
    fn test_notes_length_limit() {
        assert!(validate_field("notes", &json!("n".repeat(5000))).valid);
        assert!(!validate_field("notes", &json!("n".repeat(5001))).valid);
    }

    #[test]
    fn test_unknown_field_is_always_valid() {
        assert_eq!(validate_field("favouriteColour", &json!("<script>")), ValidationResult::ok());
    }

    #[test]
    fn test_validation_result_serialization() {
        assert_eq!(serde_json::to_string(&ValidationResult::ok()).unwrap(), r#"{"valid":true}"#);
        assert_eq!(
            serde_json::to_string(&ValidationResult::invalid("nope")).unwrap(),
            r#"{"valid":false,"error":"nope"}"#
        );
    }
}
