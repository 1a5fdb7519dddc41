//! errors.rs - Custom error types for the formguard-core library.
//!
//! Validation and sanitization never fail; bad input is reported through
//! `ValidationResult` values. The errors here cover the fallible edges of the
//! library: loading schema files and compiling user-supplied rules.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// All error types produced by `formguard-core`.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FormguardError {
    #[error("Failed to compile rule for field '{0}': {1}")]
    RuleCompilationError(String, regex::Error),

    #[error("Field '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Schema validation failed:\n{0}")]
    InvalidSchema(String),

    #[error("Unknown sanitizer '{0}'")]
    UnknownSanitizer(String),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}
