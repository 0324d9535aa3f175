//! A resolver handle that can be shared across threads

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::report::ResolveReport;
use crate::{ConfigResolver, Result, Scope};

/// Cloneable handle serializing access to one [`ConfigResolver`].
///
/// Every clone sees the same store and loaded-source set. Lookups return
/// owned strings since the lock is released before returning.
#[derive(Debug, Clone, Default)]
pub struct SharedResolver {
    inner: Arc<Mutex<ConfigResolver>>,
}

impl SharedResolver {
    pub fn new(resolver: ConfigResolver) -> Self {
        Self {
            inner: Arc::new(Mutex::new(resolver)),
        }
    }

    // Resolver state is consistent between calls, so a panic in another
    // holder leaves nothing half-written.
    fn lock(&self) -> MutexGuard<'_, ConfigResolver> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Resolve and return a snapshot of the merged store.
    pub fn resolve(&self, scopes: &[Scope], force_reload: bool) -> BTreeMap<String, String> {
        let mut resolver = self.lock();
        resolver.resolve(scopes, force_reload);
        resolver.snapshot()
    }

    pub fn resolve_with_report(&self, scopes: &[Scope], force_reload: bool) -> ResolveReport {
        self.lock().resolve_with_report(scopes, force_reload).clone()
    }

    pub fn get(&self, key: &str) -> Result<String> {
        self.lock().get(key).map(str::to_string)
    }

    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.lock().get_or(key, default).to_string()
    }

    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.lock().snapshot()
    }

    /// Run `f` with exclusive access to the resolver.
    pub fn with<R>(&self, f: impl FnOnce(&mut ConfigResolver) -> R) -> R {
        f(&mut self.lock())
    }
}

impl From<ConfigResolver> for SharedResolver {
    fn from(resolver: ConfigResolver) -> Self {
        Self::new(resolver)
    }
}
