//! Scopes: directories that contribute sources

use std::path::{Path, PathBuf};

/// A directory to scan, with the name used in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    name: String,
    dir: PathBuf,
}

impl Scope {
    /// Create a scope named after the directory's final component.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let name = default_name(&dir);
        Self { name, dir }
    }

    /// Create a scope with an explicit name.
    pub fn named(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn default_name(dir: &Path) -> String {
    if let Some(name) = dir.file_name() {
        return name.to_string_lossy().into_owned();
    }
    // `.` and `..` have no file name; use the resolved directory when possible.
    resolved_name(dir).unwrap_or_else(|| dir.display().to_string())
}

fn resolved_name(dir: &Path) -> Option<String> {
    let resolved = std::fs::canonicalize(dir).ok()?;
    resolved
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

impl From<PathBuf> for Scope {
    fn from(dir: PathBuf) -> Self {
        Self::new(dir)
    }
}

impl From<&Path> for Scope {
    fn from(dir: &Path) -> Self {
        Self::new(dir)
    }
}

impl From<&str> for Scope {
    fn from(dir: &str) -> Self {
        Self::new(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_defaults_to_final_component() {
        let scope = Scope::new("/work/library");
        assert_eq!(scope.name(), "library");
        assert_eq!(scope.dir(), Path::new("/work/library"));
    }

    #[test]
    fn explicit_name_is_kept() {
        let scope = Scope::named("root", "/work");
        assert_eq!(scope.name(), "root");
    }

    #[test]
    fn dot_resolves_to_directory_name() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("project");
        std::fs::create_dir(&dir).unwrap();

        let scope = Scope::new(dir.join("."));
        // `Path::file_name` ignores a trailing `.`
        assert_eq!(scope.name(), "project");
    }
}
