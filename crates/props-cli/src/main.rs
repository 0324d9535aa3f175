//! props CLI
//!
//! Resolves layered `.properties`/`.env` configuration from the command line.

mod cli;
mod commands;
mod context;
mod error;
mod logging;

use clap::{CommandFactory, Parser};
use colored::Colorize;

use cli::{Cli, Commands};
use context::Context;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)?;
    tracing::debug!("Verbose mode enabled");

    let context = Context {
        options_file: cli.options,
        order: cli.order,
    };

    execute_command(&context, cli.command)
}

fn execute_command(context: &Context, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Resolve {
            scope,
            json,
            show_secrets,
        } => commands::run_resolve(context, &scope, json, show_secrets),
        Commands::Get {
            key,
            scope,
            default,
        } => commands::run_get(context, &scope, &key, default.as_deref()),
        Commands::Sources { scope, json } => commands::run_sources(context, &scope, json),
        Commands::Credentials { scope, json } => commands::run_credentials(context, &scope, json),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "props", &mut std::io::stdout());
            Ok(())
        }
    }
}
