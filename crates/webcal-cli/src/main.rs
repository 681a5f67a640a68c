//! Main entry point for webcal-l10n.

use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error};
use webcal_cli::{resolve_config, run, Cli};
use webcal_common::init_logging;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match try_main(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn try_main(cli: &Cli) -> anyhow::Result<bool> {
    let config = resolve_config(cli)?;
    init_logging(config.logging.to_logging_config()).context("failed to initialize logging")?;
    debug!("Effective configuration: {:?}", config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(cli, config, &mut out)
}
