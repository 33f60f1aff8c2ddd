//! `strata`: scaffold Go service layers from a domain contract.
//!
//! Exit codes: 0 success, 1 internal, 2 bad input, 3 missing contract,
//! 4 configuration or unknown module path.

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use tracing::{debug, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(if e.use_stderr() { 2 } else { 0 });
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("strata: cannot set up logging: {e}");
        return ExitCode::from(1);
    }
    debug!(command = ?cli.command, "strata invoked");

    let verbose = cli.global.verbose > 0;
    let result = load_config(cli.global.config.as_ref()).and_then(|config| {
        let output = OutputManager::new(&cli.global, &config);
        run(cli.command, config, output)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => handle_error(e, verbose),
    }
}

fn load_config(path: Option<&PathBuf>) -> CliResult<AppConfig> {
    AppConfig::load(path).map_err(|e| CliError::ConfigError {
        message: format!("{e:#}"),
        source: Some(e.into()),
    })
}

#[instrument(skip_all)]
fn run(command: Commands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match command {
        Commands::New(args) => commands::new::execute(args, config, output),
        Commands::Generate(args) => commands::generate::execute(args, config, output),
        Commands::Inspect(args) => commands::inspect::execute(args, config, output),
        Commands::List(args) => commands::list::execute(args, output),
        Commands::Init(args) => commands::init::execute(args, output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => commands::config::execute(cmd, config, output),
    }
}

fn handle_error(err: CliError, verbose: bool) -> ExitCode {
    err.log();

    let msg = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn unreadable_config_exits_with_configuration_code() {
        let err = load_config(Some(&PathBuf::from("/nonexistent/strata.toml"))).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
