//! Pricing run orchestration.
//!
//! One pricing run maps a loan application into provider-specific requests,
//! dispatches both providers at effectively the same instant, then applies a
//! single merge policy: the primary provider is required, the expanded
//! provider is best-effort. Mapping errors fail the run before any request
//! leaves the process.
//!
//! This crate provides:
//! - `Orchestrator`: owns the provider clients and runs the fan-out/fan-in
//! - `OrchestratorOptions`: deadline configuration for a run

#![deny(missing_docs)]

mod orchestrator;

pub use orchestrator::{Orchestrator, OrchestratorOptions, DEFAULT_SHARED_DEADLINE};
