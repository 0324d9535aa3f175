//! Hierarchical resolution of property sources
//!
//! The `ConfigResolver` discovers `*.properties` and `*.env` files in one or
//! more scope directories, loads each file once, merges them into a single
//! [`ConfigStore`] and finally overlays the environment:
//!
//! 1. Files of the first scope, in [`SourceOrder`](props_fs::SourceOrder)
//! 2. Files of each following scope, in the order the scopes are given
//! 3. Environment variables (always win)
//!
//! Later layers override earlier ones key by key. A file that fails to load
//! is skipped and reported; it is not marked as loaded, so the next resolve
//! tries it again.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use props_fs::checksum::{compute_checksum, compute_file_checksum};
use props_fs::io::read_text;
use props_fs::path::canonicalize;
use props_fs::{SourceFile, list_candidates};

use crate::env::{EnvironmentSource, ProcessEnvironment};
use crate::options::ResolverOptions;
use crate::parser;
use crate::report::{LoadedSource, ResolveReport, SourceFailure, SourceOutcome, UnreadableScope};
use crate::scope::Scope;
use crate::store::ConfigStore;
use crate::{Error, Result};

/// Lifecycle of a resolver's store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverState {
    /// No resolve has run yet; lookups without a default fail.
    Uninitialized,
    /// The store holds the result of at least one resolve.
    Ready,
}

/// Merges property files and the environment into one cached store.
///
/// # Example
///
/// ```no_run
/// use props_core::{ConfigResolver, Scope};
///
/// let mut resolver = ConfigResolver::new();
/// resolver.resolve(&[Scope::new("."), Scope::new("./library")], false);
///
/// let version = resolver.get_or("VERSION", "0.0.0-SNAPSHOT");
/// println!("version {version}");
/// ```
#[derive(Debug)]
pub struct ConfigResolver {
    options: ResolverOptions,
    environment: Box<dyn EnvironmentSource>,
    state: ResolverState,
    store: ConfigStore,
    loaded: Vec<LoadedSource>,
    loaded_paths: HashSet<PathBuf>,
    last_report: Option<ResolveReport>,
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigResolver {
    /// Create a resolver with default options reading the process environment.
    pub fn new() -> Self {
        Self {
            options: ResolverOptions::default(),
            environment: Box::new(ProcessEnvironment),
            state: ResolverState::Uninitialized,
            store: ConfigStore::new(),
            loaded: Vec::new(),
            loaded_paths: HashSet::new(),
            last_report: None,
        }
    }

    pub fn with_options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the environment applied after the files.
    pub fn with_environment(mut self, environment: impl EnvironmentSource + 'static) -> Self {
        self.environment = Box::new(environment);
        self
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Resolve `scopes` and return the merged store.
    ///
    /// # Arguments
    ///
    /// * `scopes` - Directories to scan, lowest precedence first
    /// * `force_reload` - Clear the store and every loaded mark first
    ///
    /// Never fails: unreadable scopes and files are logged and recorded in
    /// [`last_report`](Self::last_report).
    pub fn resolve(&mut self, scopes: &[Scope], force_reload: bool) -> &ConfigStore {
        self.resolve_with_report(scopes, force_reload);
        &self.store
    }

    /// Like [`resolve`](Self::resolve), returning what happened to each source.
    pub fn resolve_with_report(&mut self, scopes: &[Scope], force_reload: bool) -> &ResolveReport {
        let mut report = ResolveReport::default();

        if force_reload || self.state == ResolverState::Uninitialized {
            tracing::debug!(force_reload, "Rebuilding configuration store");
            self.store.clear();
            self.loaded.clear();
            self.loaded_paths.clear();
            report.rebuilt = true;
        }

        for scope in scopes {
            self.resolve_scope(scope, &mut report);
        }

        if self.options.overlay_environment {
            let vars = self.environment.vars();
            report.environment_keys = vars.len();
            tracing::debug!(count = vars.len(), "Overlaying environment variables");
            self.store.merge(vars);
        }

        self.state = ResolverState::Ready;
        self.last_report.insert(report)
    }

    /// Clear everything and resolve `scopes` from scratch.
    pub fn reload(&mut self, scopes: &[Scope]) -> &ConfigStore {
        self.resolve(scopes, true)
    }

    fn resolve_scope(&mut self, scope: &Scope, report: &mut ResolveReport) {
        let candidates = canonicalize(scope.dir()).and_then(|dir| {
            list_candidates(&dir, &self.options.filter(), self.options.order)
        });

        let candidates = match candidates {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::debug!(scope = scope.name(), error = %e, "Scope contributes no sources");
                report.unreadable_scopes.push(UnreadableScope {
                    scope: scope.name().to_string(),
                    path: scope.dir().display().to_string(),
                    message: e.to_string(),
                });
                return;
            }
        };

        for source in candidates {
            let outcome = self.resolve_source(scope, source);
            report.outcomes.push(outcome);
        }
    }

    fn resolve_source(&mut self, scope: &Scope, source: SourceFile) -> SourceOutcome {
        let scope_name = scope.name().to_string();
        let SourceFile { native, path } = source;

        if self.loaded_paths.contains(&native) {
            tracing::debug!(path = %path, "Already loaded, skipping");
            return SourceOutcome::AlreadyLoaded {
                path,
                scope: scope_name,
            };
        }

        match self.load_source(&native) {
            Ok((entries, checksum)) => {
                tracing::info!("Loading: {} -> :{}", path, scope_name);
                let count = entries.len();
                self.store.merge(entries);
                self.loaded_paths.insert(native.clone());
                self.loaded.push(LoadedSource {
                    path: path.clone(),
                    native,
                    scope: scope_name.clone(),
                    entries: count,
                    checksum,
                });
                SourceOutcome::Loaded {
                    path,
                    scope: scope_name,
                    entries: count,
                }
            }
            Err(e) => {
                tracing::warn!("{} Failed. {}", path, e);
                SourceOutcome::Failed {
                    failure: SourceFailure::from(&e),
                    path,
                    scope: scope_name,
                }
            }
        }
    }

    /// Read and parse one source. Nothing is merged unless the whole file parses.
    fn load_source(&self, path: &Path) -> Result<(Vec<(String, String)>, String)> {
        let text = read_text(path, self.options.read_limits())?;
        let checksum = compute_checksum(text.as_bytes());
        let entries = parser::parse(&text, self.options.dialect_for(path)).map_err(|e| {
            Error::Parse {
                path: path.to_path_buf(),
                line: e.line,
                message: e.message,
            }
        })?;
        Ok((entries, checksum))
    }

    /// Look up `key`.
    ///
    /// Fails with [`Error::StoreUninitialized`] before the first resolve and
    /// with [`Error::KeyNotFound`] when no source supplied the key.
    pub fn get(&self, key: &str) -> Result<&str> {
        if self.state == ResolverState::Uninitialized {
            return Err(Error::StoreUninitialized);
        }
        self.store.get(key).ok_or_else(|| Error::key_not_found(key))
    }

    /// Look up `key`, falling back to `default` when it is absent or nothing
    /// has been resolved yet.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.try_get(key).unwrap_or(default)
    }

    pub fn try_get(&self, key: &str) -> Option<&str> {
        self.store.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.store.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn state(&self) -> ResolverState {
        self.state
    }

    /// The live store. Its contents change on the next resolve.
    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// An owned copy of the store, sorted by key.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.store.clone().into_map()
    }

    /// Sources merged since the last rebuild, in merge order.
    pub fn loaded_sources(&self) -> &[LoadedSource] {
        &self.loaded
    }

    pub fn last_report(&self) -> Option<&ResolveReport> {
        self.last_report.as_ref()
    }

    /// Loaded sources whose content changed or vanished since they were read.
    ///
    /// These keep their old values until the next forced reload.
    pub fn stale_sources(&self) -> Vec<&LoadedSource> {
        self.loaded
            .iter()
            .filter(|source| {
                match compute_file_checksum(&source.native) {
                    Ok(current) => current != source.checksum,
                    Err(_) => true,
                }
            })
            .collect()
    }
}
