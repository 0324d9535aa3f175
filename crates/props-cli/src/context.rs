//! Resolver construction from global flags and scope arguments

use std::path::PathBuf;

use props_core::{ConfigResolver, ResolveReport, ResolverOptions, Scope, SourceOrder};

use crate::cli::ScopeArgs;
use crate::error::Result;

/// Global settings shared by every resolving command.
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub options_file: Option<PathBuf>,
    pub order: Option<SourceOrder>,
}

impl Context {
    /// Options from `--options`, with `--order` and `--no-env` applied on top.
    pub fn resolver_options(&self, no_env: bool) -> Result<ResolverOptions> {
        let mut options = match &self.options_file {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading resolver options");
                ResolverOptions::load(path)?
            }
            None => ResolverOptions::default(),
        };
        if let Some(order) = self.order {
            options.order = order;
        }
        if no_env {
            options.overlay_environment = false;
        }
        Ok(options)
    }

    /// Resolve the scopes named by `args` with a fresh resolver.
    pub fn resolve(&self, args: &ScopeArgs) -> Result<(ConfigResolver, ResolveReport)> {
        let options = self.resolver_options(args.no_env)?;
        let scopes = scopes(&args.scopes)?;

        let mut resolver = ConfigResolver::new().with_options(options);
        let report = resolver.resolve_with_report(&scopes, false).clone();
        Ok((resolver, report))
    }
}

/// The given directories, or the current directory when none are given.
pub fn scopes(paths: &[PathBuf]) -> Result<Vec<Scope>> {
    if paths.is_empty() {
        return Ok(vec![Scope::new(std::env::current_dir()?)]);
    }
    Ok(paths.iter().map(|path| Scope::new(path.as_path())).collect())
}
