//! SHA-256 checksum utilities
//!
//! Checksums use the canonical format `sha256:<hex>` and are recorded for
//! every loaded source so later changes on disk can be detected.

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::{Error, Result};

/// Prefix for all checksums produced by this module
const PREFIX: &str = "sha256:";

/// Compute the SHA-256 checksum of raw bytes.
pub fn compute_checksum(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{}{:x}", PREFIX, hasher.finalize())
}

/// Compute the SHA-256 checksum of a file's current contents.
pub fn compute_file_checksum(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let content = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    Ok(compute_checksum(&content))
}
