//! Single-level discovery of candidate source files in a scope directory

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::path::name_has_suffix;
use crate::{Error, NormalizedPath, Result};

/// Order in which the candidates of one scope are returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceOrder {
    /// Sorted by file name, byte-wise. Deterministic across platforms.
    #[default]
    Lexicographic,
    /// Whatever order the operating system lists the directory in.
    Listing,
}

impl std::str::FromStr for SourceOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "lexicographic" => Ok(Self::Lexicographic),
            "listing" => Ok(Self::Listing),
            other => Err(format!(
                "unknown source order '{other}' (expected 'lexicographic' or 'listing')"
            )),
        }
    }
}

impl std::fmt::Display for SourceOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexicographic => write!(f, "lexicographic"),
            Self::Listing => write!(f, "listing"),
        }
    }
}

/// Case-sensitive file name suffix filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixFilter {
    extensions: Vec<String>,
}

impl SuffixFilter {
    /// Build a filter from extensions given with or without the leading dot.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_string())
                .filter(|ext| !ext.is_empty())
                .collect(),
        }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn matches(&self, path: &NormalizedPath) -> bool {
        path.file_name().is_some_and(|name| self.matches_name(name))
    }

    pub fn matches_name(&self, name: &str) -> bool {
        self.extensions.iter().any(|ext| name_has_suffix(name, ext))
    }
}

/// A file found by [`list_candidates`].
///
/// `native` is the path exactly as the directory listing returned it and is
/// what gets opened. `path` is its normalized form for logs and reports; a
/// `\` in a Unix file name becomes `/` there, so it must not be used for I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub native: PathBuf,
    pub path: NormalizedPath,
}

impl SourceFile {
    pub fn new(native: impl Into<PathBuf>) -> Self {
        let native = native.into();
        Self {
            path: NormalizedPath::new(&native),
            native,
        }
    }

    /// The file name, if it is valid UTF-8.
    pub fn file_name(&self) -> Option<&str> {
        self.native.file_name()?.to_str()
    }
}

impl AsRef<Path> for SourceFile {
    fn as_ref(&self) -> &Path {
        &self.native
    }
}

/// List the regular files directly inside `dir` whose names pass `filter`.
///
/// Subdirectories are not descended into. Symlinks to regular files count as
/// regular files. Entries that vanish or cannot be inspected while listing
/// are skipped; only failure to list `dir` itself is an error.
pub fn list_candidates(
    dir: impl AsRef<Path>,
    filter: &SuffixFilter,
    order: SourceOrder,
) -> Result<Vec<SourceFile>> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(dir = %dir.display(), error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };

        if !filter.matches_name(&entry.file_name().to_string_lossy()) {
            continue;
        }

        let native = entry.path();
        if native.is_file() {
            candidates.push(SourceFile::new(native));
        }
    }

    if order == SourceOrder::Lexicographic {
        candidates.sort_by(|a, b| a.native.file_name().cmp(&b.native.file_name()));
    }

    Ok(candidates)
}
