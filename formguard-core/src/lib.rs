// formguard-core/src/lib.rs
//! # formguard Core Library
//!
//! `formguard-core` provides the validation and sanitization logic behind the
//! CRM contact forms: a registry of reusable rules, pure string sanitizers,
//! per-field validation with short-circuiting rule lists, and form-level
//! aggregation of per-field errors.
//!
//! Validation is pure and synchronous. The built-in rules are process-wide
//! immutable statics, so every function here can be called from any thread
//! without coordination.
//!
//! ## Modules
//!
//! * `rules`: The rule registry ([`ValidationRules`]) and the schema compiler.
//! * `sanitizers`: `html`, `escape`, `whitespace`, `sql` and `filename` transforms.
//! * `field`: The closed [`Field`] set, its bindings, and [`validate_field`].
//! * `form`: [`validate_form`] and [`prepare_submission`].
//! * `source`: The [`RuleSource`] trait that decouples validators from bindings.
//! * `config`: YAML schema files: loading, merging and validation.
//! * `schema`: The compiled [`FormSchema`].
//! * `value`: Coercion of JSON form values to text.
//!
//! ## Usage Example
//!
//! ```rust
//! use formguard_core::{sanitizers, validate_field, validate_form};
//! use serde_json::json;
//!
//! let first_name = sanitizers::html("<b>Jane</b>");
//! assert!(validate_field("firstName", &json!(first_name)).valid);
//!
//! let form = json!({ "email": "bad", "phone": "" });
//! let result = validate_form(form.as_object().unwrap());
//! assert!(!result.valid);
//! assert_eq!(result.errors["email"], "Please enter a valid email address");
//! ```
//!
//! ## Error Handling
//!
//! Validation never fails; it returns [`ValidationResult`] and
//! [`FormValidationResult`]. Loading and compiling schemas can fail and uses
//! [`FormguardError`] (wrapped in `anyhow::Error` by the file loaders).
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod errors;
pub mod field;
pub mod form;
pub mod rules;
pub mod sanitizers;
pub mod schema;
pub mod source;
pub mod value;

/// Re-exports the schema configuration types and functions.
pub use config::{
    load_schema_by_name,
    merge_schemas,
    schema_candidate_paths,
    validate_schema,
    FieldConfig,
    RuleSpec,
    RuleType,
    SchemaConfig,
    MAX_PATTERN_LENGTH,
};

pub use errors::FormguardError;

pub use field::{validate, validate_field, validate_field_with, Field, UnknownFieldError, ValidationResult};

pub use form::{
    prepare_submission,
    validate_form,
    validate_form_with,
    FieldError,
    FormValidationResult,
    Submission,
};

pub use rules::compiler::{compile_rule, compile_schema, get_or_compile_schema};
pub use rules::{Predicate, Rule, RuleKind, ValidationRules};

pub use sanitizers::{sanitize_value, Sanitizer};

pub use schema::{CompiledField, FormSchema};

pub use source::{BuiltinRules, RuleSource};
