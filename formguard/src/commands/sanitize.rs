// formguard/src/commands/sanitize.rs
//! `formguard sanitize`: runs one sanitizer over a file or stdin.

use std::fs;
use std::io::{self, Write};

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::debug;

use formguard_core::Sanitizer;

use crate::cli::SanitizeCommand;
use crate::commands::{info_msg, read_input};
use crate::ui::diff_viewer;
use crate::ui::theme::ThemeMap;

pub fn run_sanitize(cmd: &SanitizeCommand, theme: &ThemeMap, quiet: bool) -> Result<bool> {
    let sanitizer = Sanitizer::from(cmd.mode);
    let input = read_input(cmd.input_file.as_deref())?;
    let sanitized = sanitizer.apply(&input);
    debug!(
        "Applied '{}' sanitizer. Input length: {}, output length: {}",
        sanitizer,
        input.len(),
        sanitized.len()
    );

    if let Some(path) = &cmd.output {
        if !quiet {
            info_msg(format!("Writing sanitized content to file: {}", path.display()), theme);
        }
        fs::write(path, format!("{}\n", sanitized))
            .with_context(|| format!("Failed to write output file {}", path.display()))?;
    } else {
        writeln!(io::stdout().lock(), "{}", sanitized)?;
    }

    if cmd.diff {
        let stderr = io::stderr();
        let supports_color = stderr.is_terminal();
        diff_viewer::print_diff(&input, &sanitized, &mut stderr.lock(), theme, supports_color)?;
    }

    Ok(true)
}
