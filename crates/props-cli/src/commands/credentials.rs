//! `props credentials`: report publishing credential availability

use colored::Colorize;
use props_core::credentials::{REPOSITORY_KEYS, SIGNING_KEYS};
use props_core::{ConfigResolver, RepositoryCredentials, SigningInfo};
use serde::Serialize;

use crate::cli::ScopeArgs;
use crate::context::Context;
use crate::error::Result;

#[derive(Debug, Serialize)]
struct KeyStatus {
    key: &'static str,
    present: bool,
}

#[derive(Debug, Serialize)]
struct CredentialsReport {
    signing: Vec<KeyStatus>,
    signing_complete: bool,
    repository: Vec<KeyStatus>,
    repository_complete: bool,
}

fn statuses(resolver: &ConfigResolver, keys: &[&'static str]) -> Vec<KeyStatus> {
    keys.iter()
        .map(|&key| KeyStatus {
            key,
            present: !resolver.get_or(key, "").is_empty(),
        })
        .collect()
}

/// Print which signing and repository keys are set. Values are never printed.
pub fn run_credentials(context: &Context, args: &ScopeArgs, json: bool) -> Result<()> {
    let (resolver, _) = context.resolve(args)?;

    let report = CredentialsReport {
        signing: statuses(&resolver, &SIGNING_KEYS),
        signing_complete: SigningInfo::from_resolver(&resolver).is_complete(),
        repository: statuses(&resolver, &REPOSITORY_KEYS),
        repository_complete: RepositoryCredentials::from_resolver(&resolver).is_ok(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_group("Signing", &report.signing, report.signing_complete);
    println!();
    print_group("Repository", &report.repository, report.repository_complete);
    Ok(())
}

fn print_group(title: &str, keys: &[KeyStatus], complete: bool) {
    let summary = if complete {
        "complete".green()
    } else {
        "incomplete".yellow()
    };
    println!("{} {}", title.bold(), summary);
    for status in keys {
        if status.present {
            println!("  {} {}", "+".green(), status.key);
        } else {
            println!("  {} {} {}", "-".red(), status.key, "(missing)".dimmed());
        }
    }
}
