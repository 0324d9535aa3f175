//! Shared test utilities for the props workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`scope`]: [`TestScope`] builder for scope directories full of sources

pub mod scope;

pub use scope::{TestScope, TestTree};
