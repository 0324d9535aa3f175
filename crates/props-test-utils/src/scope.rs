//! [`TestScope`] and [`TestTree`] builders for resolver scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary scope directory with helpers for writing source files.
///
/// # Example
///
/// ```rust,no_run
/// use props_test_utils::TestScope;
///
/// let scope = TestScope::new()
///     .with_file("a.properties", "FOO=1\n")
///     .with_file("b.env", "FOO=2\n");
/// scope.assert_file_exists("a.properties");
/// ```
pub struct TestScope {
    temp_dir: TempDir,
}

impl Default for TestScope {
    fn default() -> Self {
        Self::new()
    }
}

impl TestScope {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the scope directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Builder-style [`write`](Self::write).
    pub fn with_file(self, name: &str, content: &str) -> Self {
        self.write(name, content);
        self
    }

    /// Write `content` to `name` (relative to the scope), creating parents.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        self.write_bytes(name, content.as_bytes())
    }

    /// Write raw bytes, for encoding failures.
    pub fn write_bytes(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Remove `name` from the scope.
    pub fn remove(&self, name: &str) {
        fs::remove_file(self.path().join(name)).unwrap();
    }

    /// Create an empty subdirectory.
    pub fn mkdir(&self, name: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Assert that `name` (relative to the scope) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, name: &str) {
        let full_path = self.path().join(name);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }
}

/// Several sibling scope directories under one temporary root, for
/// multi-scope layering such as `root` + `library`.
pub struct TestTree {
    temp_dir: TempDir,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Directory of the scope `name`, created on first use. `""` is the root.
    pub fn scope_dir(&self, name: &str) -> PathBuf {
        let dir = self.root().join(name);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Write `content` to `file` inside scope `scope`.
    pub fn write(&self, scope: &str, file: &str, content: &str) -> PathBuf {
        let path = self.scope_dir(scope).join(file);
        fs::write(&path, content).unwrap();
        path
    }
}
