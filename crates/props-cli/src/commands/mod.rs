//! Command implementations for props-cli

pub mod credentials;
pub mod get;
pub mod resolve;
pub mod sources;

pub use credentials::run_credentials;
pub use get::run_get;
pub use resolve::run_resolve;
pub use sources::run_sources;
