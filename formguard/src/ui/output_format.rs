// formguard/src/ui/output_format.rs
//! Prefixed, themed status lines written to an arbitrary writer (usually stderr).

use std::io::{self, Write};

use crate::ui::theme::{paint, ThemeEntry, ThemeMap};

fn print_prefixed<W: Write>(
    writer: &mut W,
    prefix: &str,
    entry: ThemeEntry,
    msg: &str,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    writeln!(writer, "{}", paint(&format!("{} {}", prefix, msg), entry, theme, enable_colors))
}

pub fn print_info_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_prefixed(writer, "[info]", ThemeEntry::Info, msg, theme, enable_colors)
}

pub fn print_success_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_prefixed(writer, "[ok]", ThemeEntry::Success, msg, theme, enable_colors)
}

pub fn print_warn_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_prefixed(writer, "[warn]", ThemeEntry::Warn, msg, theme, enable_colors)
}

pub fn print_error_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_prefixed(writer, "[error]", ThemeEntry::Error, msg, theme, enable_colors)
}
