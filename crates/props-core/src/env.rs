//! Environment sources overlaid on top of file sources

use std::collections::BTreeMap;

/// Supplies the environment variables applied after all files.
pub trait EnvironmentSource: Send + Sync + std::fmt::Debug {
    /// Current variables. Called once per resolve.
    fn vars(&self) -> Vec<(String, String)>;
}

/// The real process environment.
///
/// Variables whose name or value is not valid Unicode are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl EnvironmentSource for ProcessEnvironment {
    fn vars(&self) -> Vec<(String, String)> {
        std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }
}

/// A fixed set of variables, for tests and embedding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticEnvironment {
    vars: BTreeMap<String, String>,
}

impl StaticEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StaticEnvironment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvironmentSource for StaticEnvironment {
    fn vars(&self) -> Vec<(String, String)> {
        self.vars
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}
