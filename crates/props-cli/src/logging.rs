//! Tracing setup for the `props` binary

use std::io::IsTerminal;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::{CliError, Result};

/// Install a compact stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level is `info`, or `debug` with
/// `--verbose`. Stdout stays reserved for command output.
pub fn init(verbose: bool) -> Result<()> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(verbose)
        .with_level(true)
        .compact();

    let default_level = if verbose { "debug" } else { "info" };
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| CliError::Logging {
            message: e.to_string(),
        })?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| CliError::Logging {
            message: e.to_string(),
        })
}
