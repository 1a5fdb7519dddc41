// formguard/src/logger.rs
//! Logger setup for the formguard binary.
//!
//! Logs go to stderr so stdout stays clean for sanitized text and JSON.
//! `RUST_LOG` is honoured unless an explicit level is passed in.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Initializes `env_logger`. Safe to call more than once; later calls are no-ops.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    builder.target(Target::Stderr).format_timestamp(None);

    if let Some(level) = level {
        builder.filter_level(level);
    }

    let _ = builder.try_init();
}

/// Chooses the log level override from the CLI flags.
///
/// `--quiet` wins over `--debug`. With neither, `RUST_LOG` decides.
pub fn level_from_flags(quiet: bool, debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_overrides_debug() {
        assert_eq!(level_from_flags(true, true), Some(LevelFilter::Off));
        assert_eq!(level_from_flags(false, true), Some(LevelFilter::Debug));
        assert_eq!(level_from_flags(false, false), None);
    }
}
