// formguard/src/commands/field.rs
//! `formguard field`: validates one value against one field's rules.

use std::io::{self, Write};

use anyhow::{Context, Result};
use serde_json::Value;

use formguard_core::validate_field_with;

use crate::cli::FieldCommand;
use crate::commands::{resolve_schema, warn_msg};
use crate::ui::theme::ThemeMap;

/// Turns the raw command-line value into a form value.
///
/// A missing VALUE is treated as null.
pub fn parse_field_value(raw: Option<&str>, as_json: bool) -> Result<Value> {
    match raw {
        None => Ok(Value::Null),
        Some(text) if as_json => {
            serde_json::from_str(text).with_context(|| format!("VALUE is not a JSON literal: {}", text))
        }
        Some(text) => Ok(Value::String(text.to_string())),
    }
}

pub fn run_field(cmd: &FieldCommand, theme: &ThemeMap, quiet: bool) -> Result<bool> {
    let resolved = resolve_schema(&cmd.schema)?;
    if !quiet && !resolved.source.field_names().contains(&cmd.name.as_str()) {
        warn_msg(format!("Field '{}' has no bindings; any value is accepted.", cmd.name), theme);
    }

    let value = parse_field_value(cmd.value.as_deref(), cmd.json_value)?;
    let result = validate_field_with(resolved.source.as_ref(), &cmd.name, &value);

    let json = serde_json::to_string(&result).context("Failed to serialize validation result")?;
    writeln!(io::stdout(), "{}", json)?;
    Ok(result.valid)
}
