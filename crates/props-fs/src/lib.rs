//! Filesystem layer for the props resolver
//!
//! Provides normalized path identity, bounded text reads, single-level
//! scope scanning and content checksums.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod path;
pub mod scan;

pub use error::{Error, Result};
pub use io::ReadLimits;
pub use path::NormalizedPath;
pub use scan::{SourceFile, SourceOrder, SuffixFilter, list_candidates};
