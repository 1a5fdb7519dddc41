// formguard/src/ui/mod.rs
//! Terminal presentation: theming, status messages, report tables and diffs.

pub mod diff_viewer;
pub mod output_format;
pub mod report;
pub mod theme;
