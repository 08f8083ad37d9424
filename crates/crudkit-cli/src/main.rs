//! # crudkit CLI
//!
//! Scaffolds CRUD web services, prunes the example record from a generated
//! project, and runs the reference service.
//!
//! Startup reads `.env`, parses arguments, loads layered configuration and
//! only then installs the tracing subscriber, because the log file and the
//! `serve --debug` floor both come from configuration.
//!
//! ## Exit codes
//!
//! | Code | Meaning                 |
//! |------|-------------------------|
//! |  0   | Success                 |
//! |  1   | Internal / system error |
//! |  2   | User / input error      |
//! |  3   | Resource not found      |
//! |  4   | Configuration error     |
//!
//! `post-gen` never fails: it always exits 0.

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};
use tracing_appender::non_blocking::WorkerGuard;

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

/// Everything `main` needs once startup succeeded.
struct Startup {
    cli: Cli,
    config: AppConfig,
    _log_guard: Option<WorkerGuard>,
}

fn main() -> ExitCode {
    let Startup {
        cli,
        config,
        _log_guard,
    } = match startup() {
        Ok(ready) => ready,
        Err(code) => return code,
    };

    let verbose = cli.global.verbose > 0;
    let output = OutputManager::new(&cli.global, &config);

    match run(cli, config, output) {
        Ok(()) => {
            info!("crudkit finished");
            ExitCode::SUCCESS
        }
        Err(err) => report(err, verbose),
    }
}

/// Arguments, configuration, logging. Failures here print straight to
/// stderr since no subscriber exists yet.
fn startup() -> Result<Startup, ExitCode> {
    let _ = dotenvy::dotenv();

    let cli = Cli::try_parse().map_err(|e| {
        let _ = e.print();
        // --help and --version are reported as errors by clap but succeed.
        ExitCode::from(if e.use_stderr() { 2 } else { 0 })
    })?;

    let config = AppConfig::load(cli.global.config.as_ref()).map_err(|e| {
        eprintln!("Failed to load configuration: {e:#}");
        ExitCode::from(4)
    })?;

    let debug_floor =
        matches!(&cli.command, Commands::Serve(args) if args.debug || config.server.debug);

    let guard = init_logging(&cli.global, &config.logging, debug_floor).map_err(|e| {
        eprintln!("Failed to initialise logging: {e:#}");
        ExitCode::from(1)
    })?;

    debug!(
        command = cli.command.name(),
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        "arguments parsed"
    );

    Ok(Startup {
        cli,
        config,
        _log_guard: guard,
    })
}

#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cli.command {
        Commands::New(cmd) => commands::new::execute(cmd, cli.global, config, output),
        Commands::PostGen(cmd) => commands::post_gen::execute(cmd, output),
        Commands::Serve(cmd) => commands::serve::execute(cmd, config, output),
        Commands::Init(cmd) => commands::init::execute(cmd, config, output),
        Commands::Completions(cmd) => commands::completions::execute(cmd),
        Commands::Config(cmd) => commands::config::execute(cmd, config, output),
    }
}

fn report(err: CliError, verbose: bool) -> ExitCode {
    err.log();
    eprint!("{}", err.render(std::io::stderr().is_terminal(), verbose));
    ExitCode::from(err.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_passes_clap_checks() {
        Cli::command().debug_assert();
    }

    #[test]
    fn version_comes_from_the_manifest() {
        assert_eq!(
            Cli::command().get_version(),
            Some(env!("CARGO_PKG_VERSION"))
        );
    }
}
