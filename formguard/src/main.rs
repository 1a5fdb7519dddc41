// formguard/src/main.rs
//! formguard entry point.
//!
//! Exit codes: 0 when the input passed, 2 when it failed validation, 1 when
//! the command could not run (bad arguments, unreadable input, broken schema).

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use formguard::cli::{Cli, Commands};
use formguard::commands::{error_msg, field, prepare, rules, sanitize, validate};
use formguard::logger;
use formguard::ui::theme::{build_theme_map, ThemeStyle};

const EXIT_INVALID: i32 = 2;
const EXIT_ERROR: i32 = 1;

fn run(cli: &Cli) -> Result<bool> {
    let theme_map = build_theme_map(cli.theme.as_deref()).context("Failed to load theme")?;

    match &cli.command {
        Commands::Validate(cmd) => validate::run_validate(cmd, &theme_map),
        Commands::Field(cmd) => field::run_field(cmd, &theme_map, cli.quiet),
        Commands::Sanitize(cmd) => sanitize::run_sanitize(cmd, &theme_map, cli.quiet),
        Commands::Prepare(cmd) => prepare::run_prepare(cmd, &theme_map, cli.quiet),
        Commands::Rules(cmd) => rules::run_rules(cmd, &theme_map),
    }
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logger::init_logger(logger::level_from_flags(cli.quiet, cli.debug));
    debug!("Parsed CLI arguments: {:?}", cli);

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(EXIT_INVALID),
        Err(e) => {
            // The theme itself may be what failed to load.
            let theme_map = ThemeStyle::default_theme_map();
            error_msg(format!("{:#}", e), &theme_map);
            std::process::exit(EXIT_ERROR);
        }
    }
}
