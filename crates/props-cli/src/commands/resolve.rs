//! `props resolve`: print the merged store

use std::collections::BTreeMap;

use crate::cli::ScopeArgs;
use crate::context::Context;
use crate::error::Result;

/// Substrings that mark a key as holding a secret.
const SECRET_MARKERS: [&str; 4] = ["PASSWORD", "SECRET", "TOKEN", "KEY"];

const MASK: &str = "****";

/// Print every resolved `key=value`, sorted by key.
pub fn run_resolve(context: &Context, args: &ScopeArgs, json: bool, show_secrets: bool) -> Result<()> {
    let (resolver, _) = context.resolve(args)?;

    let entries: BTreeMap<&str, &str> = resolver
        .store()
        .iter()
        .map(|(key, value)| {
            if show_secrets || !is_secret(key) {
                (key, value)
            } else {
                (key, MASK)
            }
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for (key, value) in entries {
        println!("{key}={value}");
    }
    Ok(())
}

/// Whether `key` looks like it names a credential.
pub fn is_secret(key: &str) -> bool {
    let upper = key.to_uppercase();
    SECRET_MARKERS.iter().any(|marker| upper.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_detection_is_case_insensitive() {
        assert!(is_secret("OSSRH_PASSWORD"));
        assert!(is_secret("signing.password"));
        assert!(is_secret("SIGNING_KEY_ID"));
        assert!(is_secret("github_token"));
        assert!(is_secret("client-secret"));
        assert!(!is_secret("OSSRH_USERNAME"));
        assert!(!is_secret("VERSION"));
    }
}
