//! # webcal-cli
//!
//! Command line front end over `webcal-l10n`: look up strings, print
//! calendar vocabulary, validate and audit locale files, and convert
//! tables between formats.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands};
pub use commands::{App, Source};

use anyhow::{Context, Result};
use std::io::Write;
use webcal_config::{Config, ConfigLoader};

/// Load configuration and fold in the global command line overrides
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config =
        ConfigLoader::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    apply_cli_overrides(&mut config, cli)?;
    Ok(config)
}

/// Command line flags take precedence over files and environment
pub fn apply_cli_overrides(config: &mut Config, cli: &Cli) -> Result<()> {
    if let Some(dir) = &cli.locales {
        config.locales.dir = dir.clone();
        config.locales.bundled = false;
    }
    if cli.bundled {
        config.locales.bundled = true;
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }

    config
        .validate_all()
        .context("invalid command line overrides")?;
    Ok(())
}

/// Run the parsed command, returning whether it succeeded
pub fn run<W: Write>(cli: &Cli, config: Config, out: &mut W) -> Result<bool> {
    App::new(config).run(&cli.command, out)
}
