//! Resolver options

use std::path::Path;

use props_fs::path::name_has_suffix;
use props_fs::{NormalizedPath, ReadLimits, SourceOrder, SuffixFilter, io::DEFAULT_MAX_FILE_BYTES};
use serde::{Deserialize, Serialize};

use crate::parser::Dialect;
use crate::{Error, Result};

/// How sources are discovered, read and layered.
///
/// Loadable from TOML:
///
/// ```toml
/// extensions = ["properties", "env"]
/// order = "lexicographic"
/// overlay_environment = true
/// max_file_bytes = 1048576
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverOptions {
    /// File name suffixes (without the dot) that make a file a source.
    pub extensions: Vec<String>,
    /// Merge order of the files within one scope.
    pub order: SourceOrder,
    /// Whether environment variables are applied after the files.
    pub overlay_environment: bool,
    /// Sources larger than this fail to load.
    pub max_file_bytes: u64,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["properties".to_string(), "env".to_string()],
            order: SourceOrder::default(),
            overlay_environment: true,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }
}

impl ResolverOptions {
    /// Load and validate options from a `.toml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self> {
        let options: Self = props_fs::config::load(&NormalizedPath::new(path))?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if self.filter().extensions().is_empty() {
            return Err(Error::invalid_options("extensions must name at least one suffix"));
        }
        if self.max_file_bytes == 0 {
            return Err(Error::invalid_options("max_file_bytes must be greater than zero"));
        }
        Ok(())
    }

    pub fn with_order(mut self, order: SourceOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_environment_overlay(mut self, enabled: bool) -> Self {
        self.overlay_environment = enabled;
        self
    }

    pub fn filter(&self) -> SuffixFilter {
        SuffixFilter::new(&self.extensions)
    }

    pub fn read_limits(&self) -> ReadLimits {
        ReadLimits::new(self.max_file_bytes)
    }

    /// `.env` files use the env dialect; everything else is properties.
    pub fn dialect_for(&self, path: impl AsRef<Path>) -> Dialect {
        let is_env = path
            .as_ref()
            .file_name()
            .is_some_and(|name| name_has_suffix(&name.to_string_lossy(), "env"));
        if is_env {
            Dialect::Env
        } else {
            Dialect::Properties
        }
    }
}
