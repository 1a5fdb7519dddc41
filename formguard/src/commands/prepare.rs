// formguard/src/commands/prepare.rs
//! `formguard prepare`: sanitizes each field with its plan, validates the
//! cleaned form, and emits the cleaned JSON.

use std::fs;
use std::io::{self, Write};

use anyhow::{Context, Result};
use is_terminal::IsTerminal;

use formguard_core::prepare_submission;

use crate::cli::PrepareCommand;
use crate::commands::{info_msg, parse_form, read_input, resolve_schema};
use crate::ui::report;
use crate::ui::theme::ThemeMap;

pub fn run_prepare(cmd: &PrepareCommand, theme: &ThemeMap, quiet: bool) -> Result<bool> {
    let resolved = resolve_schema(&cmd.schema)?;
    let input = read_input(cmd.input_file.as_deref())?;
    let form = parse_form(&input)?;

    let submission = prepare_submission(resolved.source.as_ref(), &form);
    let cleaned = serde_json::to_string_pretty(&submission.cleaned).context("Failed to serialize cleaned form")?;

    match &cmd.output {
        Some(path) => {
            if !quiet {
                info_msg(format!("Writing cleaned form to file: {}", path.display()), theme);
            }
            fs::write(path, format!("{}\n", cleaned))
                .with_context(|| format!("Failed to write output file {}", path.display()))?;
        }
        None => writeln!(io::stdout().lock(), "{}", cleaned)?,
    }

    if !submission.is_valid() {
        let stderr = io::stderr();
        let supports_color = stderr.is_terminal();
        report::print_form_report(&submission.result, &mut stderr.lock(), theme, supports_color)?;
    }

    Ok(submission.is_valid())
}
