//! `props get`: print one value

use crate::cli::ScopeArgs;
use crate::context::Context;
use crate::error::Result;

/// Print the value of `key`, or `default` when it is absent.
///
/// Without a default an absent key is an error.
pub fn run_get(context: &Context, args: &ScopeArgs, key: &str, default: Option<&str>) -> Result<()> {
    let (resolver, _) = context.resolve(args)?;

    let value = match default {
        Some(default) => resolver.get_or(key, default),
        None => resolver.get(key)?,
    };
    println!("{value}");
    Ok(())
}
