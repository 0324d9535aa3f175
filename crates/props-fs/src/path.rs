//! Normalized path handling for source identity

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A path normalized to use forward slashes internally.
///
/// Backslashes become forward slashes, repeated separators collapse and
/// `.` segments are dropped. A leading `//` is kept for network paths.
/// `..` segments are left alone; use [`NormalizedPath::canonical`] when the
/// path must be absolute and resolved.
///
/// Two normalized paths compare equal exactly when their internal strings
/// do. The conversion is lossy on Unix (a `\` inside a file name and
/// non-UTF-8 bytes are rewritten), so file access goes through the native
/// path the directory listing returned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: clean(&path_str),
        }
    }

    /// Resolve `path` against the filesystem into an absolute normalized path.
    ///
    /// Uses `dunce` so Windows paths do not gain a `\\?\` prefix.
    pub fn canonical(path: impl AsRef<Path>) -> Result<Self> {
        canonicalize(path).map(Self::new)
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        if self.inner.is_empty() {
            return Self::new(segment);
        }
        Self {
            inner: clean(&format!("{}/{}", self.inner, segment)),
        }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        match self.inner.rfind('/') {
            Some(0) if self.inner.len() > 1 => Some(Self {
                inner: "/".to_string(),
            }),
            Some(idx) if idx > 0 && !(idx == 1 && self.inner.starts_with("//")) => Some(Self {
                inner: self.inner[..idx].to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        self.inner.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Whether the file name ends with `.<extension>` (case-sensitive).
    ///
    /// A dotfile such as `.env` counts as having the `env` suffix.
    pub fn has_suffix(&self, extension: &str) -> bool {
        self.file_name()
            .is_some_and(|name| name_has_suffix(name, extension))
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Check if this is a regular file (symlinks are followed).
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }
}

/// Resolve `path` against the filesystem without rewriting its separators.
///
/// Uses `dunce` so Windows paths do not gain a `\\?\` prefix.
pub fn canonicalize(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    dunce::canonicalize(path).map_err(|e| Error::io(path, e))
}

/// Whether `name` ends with `.<extension>` (case-sensitive).
pub fn name_has_suffix(name: &str, extension: &str) -> bool {
    name.len() > extension.len()
        && name.ends_with(extension)
        && name[..name.len() - extension.len()].ends_with('.')
}

fn clean(raw: &str) -> String {
    let replaced = raw.replace('\\', "/");
    if replaced.is_empty() {
        return replaced;
    }

    let (prefix, rest) = if replaced.starts_with("//") && !replaced.starts_with("///") {
        ("//", &replaced[2..])
    } else if replaced.starts_with('/') {
        ("/", replaced.trim_start_matches('/'))
    } else {
        ("", replaced.as_str())
    };

    let segments: Vec<&str> = rest
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect();

    let joined = format!("{}{}", prefix, segments.join("/"));
    if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl serde::Serialize for NormalizedPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
