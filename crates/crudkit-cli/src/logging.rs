//! Tracing subscriber setup.
//!
//! Only the binary installs a subscriber; `crudkit-core` and
//! `crudkit-adapters` only emit events.
//!
//! | Flag(s)   | Level |
//! |-----------|-------|
//! | (none)    | WARN  |
//! | `-v`      | INFO  |
//! | `-vv`     | DEBUG |
//! | `-vvv`    | TRACE |
//! | `--quiet` | ERROR |
//!
//! `serve --debug` (or `server.debug = true`) raises the level to at least
//! DEBUG. A set `RUST_LOG` replaces the computed filter entirely.

use std::io::IsTerminal as _;
use std::path::Path;

use anyhow::Context as _;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{cli::GlobalArgs, config::LoggingConfig};

/// Crates whose events the default filter lets through.
const OWN_CRATES: &[&str] = &["crudkit_cli", "crudkit_core", "crudkit_adapters"];

/// Install the global subscriber: stderr always, plus `logging.file` when
/// configured. Keep the returned guard alive until exit or buffered file
/// output is lost.
pub fn init_logging(
    args: &GlobalArgs,
    logging: &LoggingConfig,
    debug_floor: bool,
) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(derive_level(args, debug_floor)));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    let mut guard = None;
    let file_layer = match logging.file.as_deref() {
        Some(path) => {
            let (writer, file_guard) = file_writer(path)?;
            guard = Some(file_guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(writer),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("tracing subscriber already installed")?;

    Ok(guard)
}

fn default_filter(level: LevelFilter) -> EnvFilter {
    let directives = OWN_CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",");
    EnvFilter::new(directives)
}

/// Non-blocking appender for a single, never-rotated log file.
fn file_writer(path: &Path) -> anyhow::Result<(NonBlocking, WorkerGuard)> {
    let file_name = path
        .file_name()
        .with_context(|| format!("log file path has no file name: {}", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;

    Ok(tracing_appender::non_blocking(
        tracing_appender::rolling::never(dir, file_name),
    ))
}

fn derive_level(args: &GlobalArgs, debug_floor: bool) -> LevelFilter {
    let level = match (args.quiet, args.verbose) {
        (true, _) => LevelFilter::ERROR,
        (false, 0) => LevelFilter::WARN,
        (false, 1) => LevelFilter::INFO,
        (false, 2) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    };

    if debug_floor {
        level.max(LevelFilter::DEBUG)
    } else {
        level
    }
}
