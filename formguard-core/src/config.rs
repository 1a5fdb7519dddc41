//! Configuration management for `formguard-core`.
//!
//! This module defines the serializable form of a validation schema: which
//! rules and sanitizers apply to which field. It handles YAML
//! (de)serialization and provides utilities for loading, merging, and
//! validating schemas before they are compiled.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::errors::FormguardError;
use crate::field::Field;
use crate::rules::{
    Predicate, Rule, RuleKind, ALPHANUMERIC_MESSAGE, EMAIL_MESSAGE, NO_SPECIAL_CHARS_MESSAGE, PHONE_MESSAGE,
    REQUIRED_MESSAGE, URL_MESSAGE,
};
use crate::sanitizers::Sanitizer;

/// Maximum allowed length for a user-supplied pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// The kind of check a [`RuleSpec`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    Required,
    Email,
    Phone,
    Url,
    Alphanumeric,
    NoSpecialChars,
    MinLength,
    MaxLength,
    /// A custom regular expression supplied in `pattern`.
    Pattern,
}

impl RuleType {
    /// Maps a built-in pattern rule's name back to its type.
    fn from_builtin_pattern_name(name: &str) -> Option<Self> {
        match name {
            "email" => Some(RuleType::Email),
            "phone" => Some(RuleType::Phone),
            "url" => Some(RuleType::Url),
            "alphanumeric" => Some(RuleType::Alphanumeric),
            "no_special_chars" => Some(RuleType::NoSpecialChars),
            _ => None,
        }
    }

    pub fn needs_length(&self) -> bool {
        matches!(self, RuleType::MinLength | RuleType::MaxLength)
    }
}

/// A single rule as written in a schema file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct RuleSpec {
    pub kind: RuleType,
    /// Regex source, only for `kind: pattern`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Bound for `min_length` / `max_length`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
    /// Overrides the rule's default failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub case_insensitive: bool,
}

impl RuleSpec {
    pub fn new(kind: RuleType) -> Self {
        Self {
            kind,
            pattern: None,
            length: None,
            message: None,
            case_insensitive: false,
        }
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Describes an already compiled rule as a spec.
    pub fn from_rule(rule: &Rule) -> Self {
        let (spec, default_message) = match rule.kind() {
            RuleKind::Predicate(predicate) => {
                let spec = match *predicate {
                    Predicate::Required => RuleSpec::new(RuleType::Required),
                    Predicate::MinLength(n) => RuleSpec::new(RuleType::MinLength).with_length(n),
                    Predicate::MaxLength(n) => RuleSpec::new(RuleType::MaxLength).with_length(n),
                };
                (spec, Some(predicate.default_message()))
            }
            RuleKind::Pattern(regex) => match RuleType::from_builtin_pattern_name(rule.name()) {
                Some(kind) => (RuleSpec::new(kind), None),
                None => (RuleSpec::new(RuleType::Pattern).with_pattern(regex.as_str()), None),
            },
        };

        let keeps_default = match &default_message {
            Some(default) => default == rule.message(),
            None => spec.kind != RuleType::Pattern && builtin_message(spec.kind) == Some(rule.message()),
        };

        if keeps_default {
            spec
        } else {
            spec.with_message(rule.message())
        }
    }
}

fn builtin_message(kind: RuleType) -> Option<&'static str> {
    match kind {
        RuleType::Email => Some(EMAIL_MESSAGE),
        RuleType::Phone => Some(PHONE_MESSAGE),
        RuleType::Url => Some(URL_MESSAGE),
        RuleType::Alphanumeric => Some(ALPHANUMERIC_MESSAGE),
        RuleType::NoSpecialChars => Some(NO_SPECIAL_CHARS_MESSAGE),
        RuleType::Required => Some(REQUIRED_MESSAGE),
        RuleType::MinLength | RuleType::MaxLength | RuleType::Pattern => None,
    }
}

/// The rules and sanitizers bound to one field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct FieldConfig {
    pub name: String,
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
    /// Sanitizers applied in order by `prepare_submission`.
    #[serde(default)]
    pub sanitize: Vec<Sanitizer>,
}

/// Top-level schema document.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SchemaConfig {
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

impl SchemaConfig {
    /// The built-in contact-form bindings expressed as a schema.
    pub fn builtin() -> Self {
        let fields = Field::ALL
            .iter()
            .map(|field| FieldConfig {
                name: field.name().to_string(),
                rules: field.rules().iter().map(RuleSpec::from_rule).collect(),
                sanitize: field.default_sanitizers().to_vec(),
            })
            .collect();
        Self { fields }
    }

    /// Parses and validates a schema from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: SchemaConfig = serde_yml::from_str(text).context("Failed to parse schema YAML")?;
        validate_schema(&config)?;
        Ok(config)
    }

    /// Loads a schema from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading schema from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read schema file {}", path.display()))?;
        let config: SchemaConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse schema file {}", path.display()))?;

        validate_schema(&config)?;
        info!("Loaded {} field bindings from file {}.", config.fields.len(), path.display());

        Ok(config)
    }

    pub fn field(&self, name: &str) -> Option<&FieldConfig> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yml::to_string(self).context("Failed to serialize schema")
    }
}

/// Merges a user schema over a default one.
///
/// A user field replaces the default field of the same name wholesale; new
/// field names are added. Default field order is kept, new fields follow in
/// the order the user wrote them.
pub fn merge_schemas(default_config: SchemaConfig, user_config: Option<SchemaConfig>) -> SchemaConfig {
    debug!("merge_schemas called. Default field count: {}", default_config.fields.len());

    let Some(user_cfg) = user_config else {
        return default_config;
    };

    debug!("User schema provided. Merging {} user fields.", user_cfg.fields.len());
    let mut overrides: HashMap<String, FieldConfig> = HashMap::new();
    let mut added: Vec<FieldConfig> = Vec::new();
    let default_names: HashSet<&str> = default_config.fields.iter().map(|f| f.name.as_str()).collect();

    for user_field in user_cfg.fields {
        if default_names.contains(user_field.name.as_str()) {
            debug!("Overriding default binding for field '{}'.", user_field.name);
            overrides.insert(user_field.name.clone(), user_field);
        } else {
            added.push(user_field);
        }
    }

    let mut fields: Vec<FieldConfig> = default_config
        .fields
        .into_iter()
        .map(|field| overrides.remove(&field.name).unwrap_or(field))
        .collect();
    fields.extend(added);

    debug!("Final field count after merge: {}", fields.len());
    SchemaConfig { fields }
}

/// Checks schema integrity, collecting every problem before failing.
pub fn validate_schema(config: &SchemaConfig) -> Result<(), FormguardError> {
    let mut field_names = HashSet::new();
    let mut errors = Vec::new();

    for field in &config.fields {
        if field.name.trim().is_empty() {
            errors.push("A field has an empty `name`.".to_string());
        } else if !field_names.insert(field.name.as_str()) {
            errors.push(format!("Duplicate field name found: '{}'.", field.name));
        }

        if field.rules.is_empty() && field.sanitize.is_empty() {
            warn!("Field '{}' has no rules and no sanitizers; it will always be valid.", field.name);
        }

        for (index, rule) in field.rules.iter().enumerate() {
            let position = index + 1;

            if rule.kind.needs_length() && rule.length.is_none() {
                errors.push(format!(
                    "Field '{}', rule {}: `{:?}` requires a `length`.",
                    field.name, position, rule.kind
                ));
            }

            if rule.kind != RuleType::Pattern {
                if rule.pattern.is_some() {
                    warn!(
                        "Field '{}', rule {}: `pattern` is ignored for `{:?}` rules.",
                        field.name, position, rule.kind
                    );
                }
                continue;
            }

            let pattern = match &rule.pattern {
                Some(p) if !p.is_empty() => p,
                _ => {
                    errors.push(format!(
                        "Field '{}', rule {}: `pattern` rules need a non-empty `pattern`.",
                        field.name, position
                    ));
                    continue;
                }
            };

            if pattern.len() > MAX_PATTERN_LENGTH {
                errors.push(format!(
                    "Field '{}', rule {}: pattern length ({}) exceeds maximum allowed ({}).",
                    field.name,
                    position,
                    pattern.len(),
                    MAX_PATTERN_LENGTH
                ));
                continue;
            }

            if let Err(e) = Regex::new(pattern) {
                errors.push(format!(
                    "Field '{}', rule {}: invalid regex pattern: {}",
                    field.name, position, e
                ));
            }

            if rule.message.is_none() {
                errors.push(format!(
                    "Field '{}', rule {}: `pattern` rules need a `message`.",
                    field.name, position
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(FormguardError::InvalidSchema(errors.join("\n")))
    }
}

/// Directories searched, in order, for a named schema.
pub fn schema_candidate_paths(name: &str) -> Vec<PathBuf> {
    let base_dirs = vec![
        dirs::home_dir().map(|p| p.join(".formguard").join("schemas")),
        dirs::config_dir().map(|p| p.join("formguard").join("schemas")),
        Some(PathBuf::from("./config")),
    ];

    base_dirs
        .into_iter()
        .flatten()
        .map(|dir| dir.join(format!("{}.yaml", name)))
        .collect()
}

/// Loads a schema given either a file path or a name to search for.
pub fn load_schema_by_name(name_or_path: &str) -> Result<SchemaConfig> {
    debug!("Attempting to load schema from: '{}'", name_or_path);

    let path = Path::new(name_or_path);
    let path_to_load = if path.is_file() {
        path.to_path_buf()
    } else {
        schema_candidate_paths(name_or_path)
            .into_iter()
            .find(|p| p.is_file())
            .with_context(|| {
                format!(
                    "Schema '{}' not found. It is not a file path and was not found in any schema directory.",
                    name_or_path
                )
            })?
    };

    SchemaConfig::load_from_file(path_to_load)
}
