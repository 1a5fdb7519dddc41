// formguard/src/commands/mod.rs
//! Subcommand implementations plus the input and schema plumbing they share.
//!
//! Each `run_*` function returns `Ok(true)` when the input passed, `Ok(false)`
//! when it was well-formed but failed validation, and `Err` for anything that
//! stopped the command from running at all.

pub mod field;
pub mod prepare;
pub mod rules;
pub mod sanitize;
pub mod validate;

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use serde_json::{Map, Value};

use formguard_core::{
    get_or_compile_schema,
    load_schema_by_name,
    merge_schemas,
    validate_schema,
    BuiltinRules,
    RuleSource,
    SchemaConfig,
};

use crate::cli::SchemaArgs;
use crate::ui::output_format;
use crate::ui::theme::ThemeMap;

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Reads the whole input from `path`, or from stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            debug!("Reading input from file: {}", path.display());
            fs::read_to_string(path).with_context(|| format!("Failed to read input file {}", path.display()))
        }
        None => {
            debug!("Reading input from stdin.");
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

/// Parses a form payload. The top level must be a JSON object.
pub fn parse_form(text: &str) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_str(text).context("Input is not valid JSON")?;
    match value {
        Value::Object(map) => Ok(map),
        other => bail!("Expected a JSON object of field values, got {}", json_kind(&other)),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The bindings a command runs against, along with the config they came from.
pub struct ResolvedSchema {
    pub config: SchemaConfig,
    pub source: Arc<dyn RuleSource>,
}

/// Resolves `--schema` into bindings.
///
/// Without a schema the compiled-in bindings are used directly. A user
/// schema is merged over them, re-validated, then compiled through the
/// shared cache.
pub fn resolve_schema(args: &SchemaArgs) -> Result<ResolvedSchema> {
    let Some(name) = args.schema.as_deref() else {
        return Ok(ResolvedSchema {
            config: SchemaConfig::builtin(),
            source: Arc::new(BuiltinRules),
        });
    };

    let user = load_schema_by_name(name).with_context(|| format!("Failed to load schema '{}'", name))?;
    let config = merge_schemas(SchemaConfig::builtin(), Some(user));
    validate_schema(&config)?;
    let compiled = get_or_compile_schema(&config)?;
    info!("Using schema '{}' with {} field(s).", name, compiled.len());

    let source: Arc<dyn RuleSource> = compiled;
    Ok(ResolvedSchema { config, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_form_rejects_non_objects() {
        assert!(parse_form("{\"email\": \"a@b.co\"}").is_ok());
        let err = parse_form("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("got an array"));
        assert!(parse_form("not json").is_err());
    }

    #[test]
    fn resolve_without_schema_uses_builtin() {
        let resolved = resolve_schema(&SchemaArgs { schema: None }).unwrap();
        assert_eq!(resolved.source.rules_for("email").len(), 2);
        assert_eq!(resolved.config, SchemaConfig::builtin());
    }
}
