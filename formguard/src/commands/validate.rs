// formguard/src/commands/validate.rs
//! `formguard validate`: checks a whole JSON form and reports failing fields.

use std::io::{self, Write};

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::info;

use formguard_core::validate_form_with;

use crate::cli::ValidateCommand;
use crate::commands::{parse_form, read_input, resolve_schema};
use crate::ui::report;
use crate::ui::theme::ThemeMap;

pub fn run_validate(cmd: &ValidateCommand, theme: &ThemeMap) -> Result<bool> {
    let resolved = resolve_schema(&cmd.schema)?;
    let input = read_input(cmd.input_file.as_deref())?;
    let form = parse_form(&input)?;

    let result = validate_form_with(resolved.source.as_ref(), &form);
    info!("Validated {} field(s); {} failed.", form.len(), result.errors.len());

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    if cmd.json_stdout {
        let json = serde_json::to_string_pretty(&result).context("Failed to serialize validation result")?;
        writeln!(writer, "{}", json)?;
    } else {
        let supports_color = stdout.is_terminal();
        report::print_form_report(&result, &mut writer, theme, supports_color)?;
    }

    Ok(result.valid || cmd.no_fail)
}
