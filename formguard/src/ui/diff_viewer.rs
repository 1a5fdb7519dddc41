// formguard/src/ui/diff_viewer.rs
//! Line diff between the raw and sanitized text, rendered with the theme's
//! added/removed colors.

use std::io::{self, Write};

use diffy::{create_patch, Line as DiffLine};

use crate::ui::theme::{paint, ThemeEntry, ThemeMap};

/// Writes a line diff of `original` against `sanitized` to `writer`.
pub fn print_diff<W: Write>(
    original: &str,
    sanitized: &str,
    writer: &mut W,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    writeln!(writer, "{}", paint("--- Diff View ---", ThemeEntry::DiffHeader, theme, enable_colors))?;

    let patch = create_patch(original, sanitized);
    let mut changed = false;
    for hunk in patch.hunks() {
        for line in hunk.lines() {
            match line {
                DiffLine::Delete(s) => {
                    changed = true;
                    write!(writer, "{}", paint(&format!("-{}", s), ThemeEntry::DiffRemoved, theme, enable_colors))?;
                }
                DiffLine::Insert(s) => {
                    changed = true;
                    write!(writer, "{}", paint(&format!("+{}", s), ThemeEntry::DiffAdded, theme, enable_colors))?;
                }
                DiffLine::Context(s) => write!(writer, " {}", s)?,
            }
            if !line_ends_with_newline(line) {
                writeln!(writer)?;
            }
        }
    }

    if !changed {
        writeln!(writer, "No changes.")?;
    }
    writeln!(writer, "{}", paint("-----------------", ThemeEntry::DiffHeader, theme, enable_colors))
}

fn line_ends_with_newline(line: &DiffLine<'_, str>) -> bool {
    match line {
        DiffLine::Delete(s) | DiffLine::Insert(s) | DiffLine::Context(s) => s.ends_with('\n'),
    }
}
