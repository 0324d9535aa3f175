//! Error types for props-core

use std::path::PathBuf;

/// Result type for props-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in props-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A value was requested before any resolve populated the store
    #[error("Configuration store is not initialized; resolve at least one scope first")]
    StoreUninitialized,

    /// The key is absent from an initialized store
    #[error("Key not found: {key}")]
    KeyNotFound { key: String },

    /// A source file was read but its content is malformed
    #[error("Malformed source {path} at line {line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Resolver options failed validation
    #[error("Invalid resolver options: {message}")]
    InvalidOptions { message: String },

    /// A required publishing credential is absent
    #[error("Missing credential: {key} is not set in any source or the environment")]
    MissingCredential { key: String },

    /// Filesystem error from props-fs
    #[error(transparent)]
    Fs(#[from] props_fs::Error),
}

impl Error {
    pub fn key_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound { key: key.into() }
    }

    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            message: message.into(),
        }
    }
}
