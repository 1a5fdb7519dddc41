//! compiler.rs - Compiles schema configs into evaluable rules, with caching.
//!
//! This module turns a `SchemaConfig` into a `FormSchema`. Built-in rule
//! kinds resolve to the shared registry rules; `pattern` rules are compiled
//! here. Compiled schemas are kept in a global, thread-safe cache keyed by a
//! hash of the config, so loading the same schema twice compiles it once.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::RegexBuilder;
use lazy_static::lazy_static;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::{RuleSpec, RuleType, SchemaConfig, MAX_PATTERN_LENGTH};
use crate::errors::FormguardError;
use crate::rules::{Rule, ValidationRules};
use crate::schema::{CompiledField, FormSchema};

lazy_static! {
    /// Compiled schemas keyed by a hash of their config.
    static ref COMPILED_SCHEMA_CACHE: RwLock<HashMap<u64, Arc<FormSchema>>> = RwLock::new(HashMap::new());
}

/// Hashes a `SchemaConfig` into a stable cache key.
///
/// Fields are sorted by name first so that two configs differing only in
/// field order share an entry.
fn hash_config(config: &SchemaConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    let mut fields_to_hash: Vec<_> = config.fields.iter().collect();

    fields_to_hash.sort_by(|a, b| a.name.cmp(&b.name));

    fields_to_hash.hash(&mut hasher);
    hasher.finish()
}

/// Compiles a single rule spec for `field`.
pub fn compile_rule(field: &str, spec: &RuleSpec) -> Result<Rule, FormguardError> {
    let missing_length =
        || FormguardError::InvalidSchema(format!("Field '{}': `{:?}` requires a `length`.", field, spec.kind));

    let rule = match spec.kind {
        RuleType::Required => ValidationRules::required().clone(),
        RuleType::Email => ValidationRules::email().clone(),
        RuleType::Phone => ValidationRules::phone().clone(),
        RuleType::Url => ValidationRules::url().clone(),
        RuleType::Alphanumeric => ValidationRules::alphanumeric().clone(),
        RuleType::NoSpecialChars => ValidationRules::no_special_chars().clone(),
        RuleType::MinLength => ValidationRules::min_length(spec.length.ok_or_else(missing_length)?),
        RuleType::MaxLength => ValidationRules::max_length(spec.length.ok_or_else(missing_length)?),
        RuleType::Pattern => {
            let pattern = spec.pattern.as_deref().filter(|p| !p.is_empty()).ok_or_else(|| {
                FormguardError::InvalidSchema(format!("Field '{}': `pattern` rule has no pattern.", field))
            })?;

            if pattern.len() > MAX_PATTERN_LENGTH {
                return Err(FormguardError::PatternLengthExceeded(
                    field.to_string(),
                    pattern.len(),
                    MAX_PATTERN_LENGTH,
                ));
            }

            let regex = RegexBuilder::new(pattern)
                .case_insensitive(spec.case_insensitive)
                .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
                .build()
                .map_err(|e| FormguardError::RuleCompilationError(field.to_string(), e))?;

            log::debug!(
                target: "formguard_core::compiler",
                "Pattern rule for field '{}' compiled successfully.",
                field
            );
            Rule::pattern("pattern", regex, spec.message.clone().unwrap_or_default())
        }
    };

    Ok(match &spec.message {
        Some(message) if spec.kind != RuleType::Pattern => rule.with_message(message.clone()),
        _ => rule,
    })
}

/// Compiles every field of a schema, reporting all failures together.
pub fn compile_schema(config: &SchemaConfig) -> Result<FormSchema, FormguardError> {
    debug!("Starting compilation of {} field bindings.", config.fields.len());

    let mut schema = FormSchema::default();
    let mut compilation_errors = Vec::new();

    for field in &config.fields {
        let mut rules = Vec::with_capacity(field.rules.len());
        for spec in &field.rules {
            match compile_rule(&field.name, spec) {
                Ok(rule) => rules.push(rule),
                Err(e) => compilation_errors.push(e),
            }
        }
        schema.insert(
            field.name.clone(),
            CompiledField {
                rules,
                sanitizers: field.sanitize.clone(),
            },
        );
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        return Err(FormguardError::Fatal(format!(
            "Failed to compile {} rule(s):\n{}",
            compilation_errors.len(),
            error_message
        )));
    }

    debug!("Finished compiling schema. Total fields: {}.", schema.len());
    Ok(schema)
}

/// Returns the compiled schema for `config`, compiling it on first use.
pub fn get_or_compile_schema(config: &SchemaConfig) -> Result<Arc<FormSchema>, FormguardError> {
    let cache_key = hash_config(config);

    {
        let cache = COMPILED_SCHEMA_CACHE.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(schema) = cache.get(&cache_key) {
            debug!("Serving compiled schema from cache for key: {}", cache_key);
            return Ok(Arc::clone(schema));
        }
    }

    debug!("Compiled schema not found in cache. Compiling now.");
    let compiled = Arc::new(compile_schema(config)?);

    COMPILED_SCHEMA_CACHE
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(cache_key, Arc::clone(&compiled));

    debug!("Successfully compiled and cached schema for key: {}", cache_key);
    Ok(compiled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldConfig;
    use crate::source::RuleSource;
    use serde_json::json;

    fn territory_schema() -> SchemaConfig {
        SchemaConfig {
            fields: vec![FieldConfig {
                name: "territory".to_string(),
                rules: vec![
                    RuleSpec::new(RuleType::Required).with_message("Pick a territory"),
                    RuleSpec::new(RuleType::Pattern)
                        .with_pattern(r"^[a-z]{2}-[0-9]+$")
                        .with_message("Territory codes look like CA-12"),
                ],
                sanitize: vec![],
            }],
        }
    }

    #[test]
    fn test_compile_rule_builtin_kinds() {
        let rule = compile_rule("email", &RuleSpec::new(RuleType::Email)).unwrap();
        assert!(rule.matches("test@example.com"));
        assert_eq!(rule.message(), "Please enter a valid email address");

        let rule = compile_rule("notes", &RuleSpec::new(RuleType::MaxLength).with_length(3)).unwrap();
        assert!(!rule.check(&json!("four")));
    }

    #[test]
    fn test_compile_rule_missing_length() {
        let err = compile_rule("notes", &RuleSpec::new(RuleType::MinLength)).unwrap_err();
        assert!(matches!(err, FormguardError::InvalidSchema(_)));
    }

    #[test]
    fn test_compile_rule_pattern_too_long() {
        let spec = RuleSpec::new(RuleType::Pattern)
            .with_pattern("x".repeat(MAX_PATTERN_LENGTH + 1))
            .with_message("m");
        let err = compile_rule("code", &spec).unwrap_err();
        assert!(matches!(err, FormguardError::PatternLengthExceeded(_, _, MAX_PATTERN_LENGTH)));
    }

    #[test]
    fn test_compile_schema_case_insensitive_pattern() {
        let mut config = territory_schema();
        config.fields[0].rules[1].case_insensitive = true;

        let schema = compile_schema(&config).unwrap();
        let rules = schema.rules_for("territory");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].message(), "Pick a territory");
        assert!(rules[1].check(&json!("CA-12")));
        assert!(!rules[1].check(&json!("California")));
    }

    #[test]
    fn test_compile_schema_reports_every_failure() {
        let mut config = territory_schema();
        config.fields[0].rules.push(RuleSpec::new(RuleType::Pattern).with_pattern("(").with_message("m"));
        config.fields[0].rules.push(RuleSpec::new(RuleType::MaxLength));

        let err = compile_schema(&config).unwrap_err().to_string();
        assert!(err.contains("Failed to compile 2 rule(s)"), "{}", err);
    }

    #[test]
    fn test_get_or_compile_schema_uses_cache() {
        let config = territory_schema();
        let first = get_or_compile_schema(&config).unwrap();
        let second = get_or_compile_schema(&config).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_builtin_schema_compiles_to_builtin_rules() {
        let schema = compile_schema(&SchemaConfig::builtin()).unwrap();
        assert_eq!(schema.len(), crate::field::Field::ALL.len());
        assert_eq!(schema.rules_for("firstName")[1].message(), "Must be no more than 50 characters");
        assert_eq!(schema.field_names()[0], "email");
    }
}
