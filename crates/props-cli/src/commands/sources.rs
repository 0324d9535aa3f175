//! `props sources`: show discovery and load results

use colored::Colorize;
use props_core::SourceOutcome;

use crate::cli::ScopeArgs;
use crate::context::Context;
use crate::error::Result;

/// List every candidate file with its outcome, then unreadable scopes.
pub fn run_sources(context: &Context, args: &ScopeArgs, json: bool) -> Result<()> {
    let (_, report) = context.resolve(args)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "Sources".bold());
    if report.outcomes.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for outcome in &report.outcomes {
        match outcome {
            SourceOutcome::Loaded {
                path,
                scope,
                entries,
            } => println!(
                "  {} {:<8} {} {}",
                "+".green(),
                "loaded".green(),
                path,
                format!("(:{scope}, {entries} entries)").dimmed()
            ),
            SourceOutcome::AlreadyLoaded { path, scope } => println!(
                "  {} {:<8} {} {}",
                "=".dimmed(),
                "cached".dimmed(),
                path,
                format!("(:{scope})").dimmed()
            ),
            SourceOutcome::Failed { path, failure, .. } => println!(
                "  {} {:<8} {}: {}",
                "x".red(),
                "failed".red(),
                path,
                failure
            ),
        }
    }

    if !report.unreadable_scopes.is_empty() {
        println!();
        println!("{}", "Unreadable scopes".bold());
        for scope in &report.unreadable_scopes {
            println!(
                "  {} :{} {}: {}",
                "!".yellow(),
                scope.scope,
                scope.path,
                scope.message.dimmed()
            );
        }
    }

    if report.environment_keys > 0 {
        println!();
        println!(
            "{} environment variables overlaid",
            report.environment_keys
        );
    }
    Ok(())
}
