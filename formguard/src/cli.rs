// formguard/src/cli.rs
//! This file defines the command-line interface (CLI) for the formguard application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use formguard_core::Sanitizer;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "formguard",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Validate and sanitize CRM contact-form input",
    long_about = "formguard checks contact-form payloads (email, phone, website, names, company, title, notes) against the same rules the CRM forms use, and applies the input sanitizers used before records are persisted. Custom field bindings can be supplied as a YAML schema.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Specify the path to a custom YAML theme file.
    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `formguard` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validates a JSON form payload.
    #[command(about = "Validates a JSON object of field values and reports every failing field.")]
    Validate(ValidateCommand),

    /// Validates a single field value.
    #[command(about = "Validates a single value against the rules bound to a field.")]
    Field(FieldCommand),

    /// Applies a sanitizer to text.
    #[command(about = "Applies a sanitizer to an input file or stdin.")]
    Sanitize(SanitizeCommand),

    /// Sanitizes a form with each field's plan, then validates it.
    #[command(about = "Sanitizes each field of a JSON form, validates the result, and prints the cleaned form.")]
    Prepare(PrepareCommand),

    /// Lists field bindings.
    #[command(about = "Lists the rules and sanitizers bound to each field.")]
    Rules(RulesCommand),
}

/// Arguments shared by commands that read a schema.
#[derive(Parser, Debug, Clone)]
pub struct SchemaArgs {
    /// Schema file path or name, merged over the built-in bindings.
    #[arg(
        long = "schema",
        value_name = "FILE_OR_NAME",
        env = "FORMGUARD_SCHEMA",
        help = "YAML schema (path or name under ~/.formguard/schemas) merged over the built-in field bindings."
    )]
    pub schema: Option<String>,
}

/// Arguments for the `validate` command.
#[derive(Parser, Debug)]
pub struct ValidateCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read the JSON form from a file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    #[command(flatten)]
    pub schema: SchemaArgs,

    /// Print the result as JSON to stdout.
    #[arg(long = "json-stdout", help = "Print the validation result as JSON to stdout.")]
    pub json_stdout: bool,

    /// Exit successfully even if the form is invalid.
    #[arg(long = "no-fail", help = "Exit with status 0 even when the form is invalid.")]
    pub no_fail: bool,
}

/// Arguments for the `field` command.
#[derive(Parser, Debug)]
pub struct FieldCommand {
    /// The field name, e.g. `email` or `firstName`.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// The value to validate. Parsed as JSON when `--json-value` is set.
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: Option<String>,

    /// Interpret VALUE as a JSON literal (`null`, `0`, `false`, ...).
    #[arg(long = "json-value", help = "Interpret VALUE as a JSON literal instead of a string.")]
    pub json_value: bool,

    #[command(flatten)]
    pub schema: SchemaArgs,
}

/// Arguments for the `sanitize` command.
#[derive(Parser, Debug)]
pub struct SanitizeCommand {
    /// Which sanitizer to apply.
    #[arg(long, short = 'm', value_enum, value_name = "MODE", help = "The sanitizer to apply.")]
    pub mode: SanitizerChoice,

    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Write sanitized output to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Show a unified diff of the changes on stderr.
    #[arg(long, short = 'D', help = "Show a unified diff of the changes made on stderr.")]
    pub diff: bool,
}

/// Arguments for the `prepare` command.
#[derive(Parser, Debug)]
pub struct PrepareCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read the JSON form from a file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Write the cleaned form to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write the cleaned JSON form to a file instead of stdout.")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub schema: SchemaArgs,
}

/// Arguments for the `rules` command.
#[derive(Parser, Debug)]
pub struct RulesCommand {
    #[command(flatten)]
    pub schema: SchemaArgs,

    /// Print the effective schema as YAML instead of a table.
    #[arg(long = "yaml", help = "Print the effective schema as YAML instead of a table.")]
    pub yaml: bool,
}

/// Sanitizer selection on the command line.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SanitizerChoice {
    /// Strip script blocks and tags, then trim.
    Html,
    /// Escape HTML special characters.
    Escape,
    /// Collapse whitespace runs and trim.
    Whitespace,
    /// Remove quote, semicolon and backslash characters.
    Sql,
    /// Replace characters unsafe in file names with underscores.
    Filename,
}

impl From<SanitizerChoice> for Sanitizer {
    fn from(choice: SanitizerChoice) -> Self {
        match choice {
            SanitizerChoice::Html => Sanitizer::Html,
            SanitizerChoice::Escape => Sanitizer::Escape,
            SanitizerChoice::Whitespace => Sanitizer::Whitespace,
            SanitizerChoice::Sql => Sanitizer::Sql,
            SanitizerChoice::Filename => Sanitizer::Filename,
        }
    }
}
