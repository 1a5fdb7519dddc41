// formguard-core/src/form.rs
//! Form-level validation and submission preparation.
//!
//! Every field is validated independently; one failing field never stops
//! the others from being checked.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::field::validate_field_with;
use crate::sanitizers::apply_plan;
use crate::source::{BuiltinRules, RuleSource};

/// Aggregate outcome of validating a whole form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormValidationResult {
    pub valid: bool,
    /// Failing field name to its first error message.
    pub errors: BTreeMap<String, String>,
}

/// A single field error, flattened for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FormValidationResult {
    pub fn from_errors(errors: BTreeMap<String, String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Errors as a list ordered by field name.
    pub fn feedback(&self) -> Vec<FieldError> {
        self.errors
            .iter()
            .map(|(field, message)| FieldError {
                field: field.clone(),
                message: message.clone(),
            })
            .collect()
    }
}

/// Validates every entry of `form_data` against `source`.
pub fn validate_form_with(source: &dyn RuleSource, form_data: &Map<String, Value>) -> FormValidationResult {
    let errors: BTreeMap<String, String> = form_data
        .iter()
        .filter_map(|(field, value)| {
            validate_field_with(source, field, value)
                .error
                .map(|message| (field.clone(), message))
        })
        .collect();

    debug!(
        "Validated form with {} field(s); {} error(s).",
        form_data.len(),
        errors.len()
    );
    FormValidationResult::from_errors(errors)
}

/// Validates every entry of `form_data` against the built-in rules.
pub fn validate_form(form_data: &Map<String, Value>) -> FormValidationResult {
    validate_form_with(&BuiltinRules, form_data)
}

/// A sanitized form together with the validation of its cleaned values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub cleaned: Map<String, Value>,
    pub result: FormValidationResult,
}

impl Submission {
    pub fn is_valid(&self) -> bool {
        self.result.valid
    }
}

/// Sanitizes each field with its plan, then validates the cleaned form.
///
/// Validation runs on what will be stored, so a name that is only invalid
/// because of markup (`<b>Jane</b>`) passes once the tags are stripped.
pub fn prepare_submission(source: &dyn RuleSource, form_data: &Map<String, Value>) -> Submission {
    let cleaned: Map<String, Value> = form_data
        .iter()
        .map(|(field, value)| (field.clone(), apply_plan(source.sanitizers_for(field), value)))
        .collect();

    let result = validate_form_with(source, &cleaned);
    Submission { cleaned, result }
}
