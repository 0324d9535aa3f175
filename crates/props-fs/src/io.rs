//! Bounded text reads

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::{Error, Result};

/// Default upper bound for a single source file.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 1024 * 1024;

/// Limits applied when reading a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadLimits {
    /// Files larger than this are rejected without being read.
    pub max_bytes: u64,
}

impl Default for ReadLimits {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }
}

impl ReadLimits {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }
}

/// Read a whole file as bytes, refusing files above `limits.max_bytes`.
///
/// The handle is dropped before returning on every path.
pub fn read_bytes(path: impl AsRef<Path>, limits: ReadLimits) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| Error::io(path, e))?;

    let size = file.metadata().map_err(|e| Error::io(path, e))?.len();
    if size > limits.max_bytes {
        return Err(Error::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max: limits.max_bytes,
        });
    }

    let mut buffer = Vec::with_capacity(size as usize);
    // Bound the read as well, in case the file grows between stat and read.
    (&mut file)
        .take(limits.max_bytes.saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(|e| Error::io(path, e))?;

    if buffer.len() as u64 > limits.max_bytes {
        return Err(Error::FileTooLarge {
            path: path.to_path_buf(),
            size: buffer.len() as u64,
            max: limits.max_bytes,
        });
    }

    Ok(buffer)
}

/// Read a file as strict UTF-8 text.
pub fn read_text(path: impl AsRef<Path>, limits: ReadLimits) -> Result<String> {
    let path = path.as_ref();
    let bytes = read_bytes(path, limits)?;
    String::from_utf8(bytes).map_err(|e| Error::InvalidUtf8 {
        path: path.to_path_buf(),
        valid_up_to: e.utf8_error().valid_up_to(),
    })
}
