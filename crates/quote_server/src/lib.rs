//! REST API server for the mortgage rate quoting engine
//!
//! Exposes the concurrent pricing pipeline over HTTP: one pricing endpoint
//! plus health and readiness probes. Configuration comes from CLI arguments,
//! environment variables, and an optional TOML file.

pub mod config;
pub mod routes;
pub mod server;

// Re-export pipeline crates for integration
pub use quote_core;
pub use quote_engine;
pub use quote_providers;

/// Server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
