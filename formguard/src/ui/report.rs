// formguard/src/ui/report.rs
//! Tabular output: the per-field error report and the field bindings listing.

use std::io::{self, Write};

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};

use formguard_core::{FormValidationResult, RuleSource};

use crate::ui::output_format;
use crate::ui::theme::{ThemeColor, ThemeEntry, ThemeMap};

/// Maps a named theme color onto the 16-color ANSI palette.
fn table_color(color: &ThemeColor) -> Color {
    let ThemeColor::Named(name) = color;
    let base = name.strip_prefix("bright").unwrap_or(name.as_str());
    let index: u8 = match base {
        "black" => 0,
        "red" => 1,
        "green" => 2,
        "yellow" => 3,
        "blue" => 4,
        "magenta" => 5,
        "cyan" => 6,
        _ => 7,
    };
    let bright = if name.starts_with("bright") { 8 } else { 0 };
    Color::AnsiValue(index + bright)
}

fn themed_cell(text: impl ToString, entry: ThemeEntry, theme: &ThemeMap, enable_colors: bool) -> Cell {
    let cell = Cell::new(text);
    if !enable_colors {
        return cell;
    }
    match theme.get(&entry).and_then(|style| style.fg.as_ref()) {
        Some(color) => cell.fg(table_color(color)),
        None => cell,
    }
}

fn new_table(header: &[&str], theme: &ThemeMap, enable_colors: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_content_arrangement(ContentArrangement::Dynamic);
    if enable_colors {
        table.enforce_styling();
    } else {
        table.force_no_tty();
    }
    table.set_header(
        header
            .iter()
            .map(|h| themed_cell(h, ThemeEntry::Header, theme, enable_colors))
            .collect::<Vec<_>>(),
    );
    table
}

/// Prints a success line for a valid form, or a table of failing fields.
pub fn print_form_report<W: Write>(
    result: &FormValidationResult,
    writer: &mut W,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    if result.valid {
        return output_format::print_success_message(writer, "Form is valid.", theme, enable_colors);
    }

    let mut table = new_table(&["Field", "Error"], theme, enable_colors);
    for error in result.feedback() {
        table.add_row(vec![
            themed_cell(&error.field, ThemeEntry::FieldName, theme, enable_colors),
            themed_cell(&error.message, ThemeEntry::ValidationMessage, theme, enable_colors),
        ]);
    }
    writeln!(writer, "{}", table)?;
    output_format::print_error_message(
        writer,
        &format!("{} field(s) failed validation.", result.errors.len()),
        theme,
        enable_colors,
    )
}

/// Prints every field's rules and sanitizers in binding order.
pub fn print_rules_table<W: Write>(
    source: &dyn RuleSource,
    writer: &mut W,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    let mut table = new_table(&["Field", "Rules", "Sanitizers"], theme, enable_colors);
    for name in source.field_names() {
        let rules = source
            .rules_for(name)
            .iter()
            .map(|rule| rule.describe())
            .collect::<Vec<_>>()
            .join(", ");
        let sanitizers = source
            .sanitizers_for(name)
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(" -> ");
        table.add_row(vec![
            themed_cell(name, ThemeEntry::FieldName, theme, enable_colors),
            themed_cell(if rules.is_empty() { "-".to_string() } else { rules }, ThemeEntry::RuleName, theme, enable_colors),
            Cell::new(if sanitizers.is_empty() { "-".to_string() } else { sanitizers }),
        ]);
    }
    writeln!(writer, "{}", table)
}
