//! Error types for props-fs

use std::path::PathBuf;

/// Result type for props-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in props-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File too large: {path} is {size} bytes (max {max})")]
    FileTooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("Invalid UTF-8 in {path} after byte {valid_up_to}")]
    InvalidUtf8 { path: PathBuf, valid_up_to: usize },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error means the path does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
