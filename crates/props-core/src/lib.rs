//! Hierarchical property resolution
//!
//! This crate turns a set of scope directories into one flat key/value view:
//!
//! - **Discovery**: single-level scan of each scope for `*.properties` and `*.env`
//! - **Parsing**: the conventional properties dialect, plus `.env` quoting
//! - **Merging**: last writer wins, scopes in the order given
//! - **Environment overlay**: environment variables always win over files
//! - **Caching**: each file is loaded once until a forced reload
//!
//! # Architecture
//!
//! ```text
//!              props-cli
//!                  |
//!              props-core
//!   resolver -> parser, store, report, env
//!                  |
//!               props-fs
//! ```
//!
//! # Example
//!
//! ```no_run
//! use props_core::{ConfigResolver, Result, Scope};
//!
//! fn signing_key() -> Result<String> {
//!     let mut resolver = ConfigResolver::new();
//!     resolver.resolve(&[Scope::new(".")], false);
//!     Ok(resolver.get("SIGNING_KEY_ID")?.to_string())
//! }
//! ```

pub mod credentials;
pub mod env;
pub mod error;
pub mod options;
pub mod parser;
pub mod report;
pub mod resolver;
pub mod scope;
pub mod shared;
pub mod store;

pub use credentials::{RepositoryCredentials, SigningInfo};
pub use env::{EnvironmentSource, ProcessEnvironment, StaticEnvironment};
pub use error::{Error, Result};
pub use options::ResolverOptions;
pub use parser::{Dialect, ParseError};
pub use props_fs::{NormalizedPath, SourceOrder};
pub use report::{
    FailureKind, LoadedSource, ResolveReport, SourceFailure, SourceOutcome, UnreadableScope,
};
pub use resolver::{ConfigResolver, ResolverState};
pub use scope::Scope;
pub use shared::SharedResolver;
pub use store::ConfigStore;
