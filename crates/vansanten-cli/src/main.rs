//! vansanten CLI - translations for the Van Santen site
//!
//! Main entry point for the `vansanten` binary.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use vansanten_common_config::Environment;

mod cli;
mod commands;
mod error;
mod host;
mod output;

use cli::Cli;
use error::CliError;

/// Application exit codes
#[repr(u8)]
pub enum Exit {
    Success = 0,
    GeneralError = 1,
    ConfigError = 2,
    IoError = 3,
    ValidationError = 5,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

fn main() -> ExitCode {
    // .env files have to be loaded before clap reads env-backed flags
    let environment = Environment::init();

    let cli = Cli::parse();
    let config = cli.load_config();

    let log_settings = config.as_ref().ok().map(|c| &c.log);
    if let Err(e) = vansanten_common_log::init(cli.log_config(log_settings)) {
        eprintln!("{e}");
    }

    match run(cli, environment, config) {
        Ok(()) => Exit::Success.into(),
        Err(e) => {
            error!("{e}");
            e.exit_code()
        }
    }
}

fn run(
    cli: Cli,
    environment: Result<Environment, vansanten_common_config::EnvError>,
    config: Result<vansanten_common_config::SiteConfig, CliError>,
) -> Result<(), CliError> {
    let environment = environment?;
    if !environment.loaded_files().is_empty() {
        tracing::debug!(files = ?environment.loaded_files(), "loaded environment files");
    }

    cli.execute(config?)
}
