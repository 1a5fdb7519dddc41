// formguard/src/commands/rules.rs
//! `formguard rules`: shows the effective field bindings.

use std::io::{self, Write};

use anyhow::Result;
use is_terminal::IsTerminal;

use crate::cli::RulesCommand;
use crate::commands::resolve_schema;
use crate::ui::report;
use crate::ui::theme::ThemeMap;

pub fn run_rules(cmd: &RulesCommand, theme: &ThemeMap) -> Result<bool> {
    let resolved = resolve_schema(&cmd.schema)?;
    let stdout = io::stdout();
    let mut writer = stdout.lock();

    if cmd.yaml {
        write!(writer, "{}", resolved.config.to_yaml_string()?)?;
    } else {
        let supports_color = stdout.is_terminal();
        report::print_rules_table(resolved.source.as_ref(), &mut writer, theme, supports_color)?;
    }
    Ok(true)
}
