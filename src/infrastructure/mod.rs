//! Infrastructure: configuration, wiring and process lifecycle.
//!
//! - [`config`] - TOML sections, validation and logging setup
//! - [`bootstrap`] - Builds feeds, executors, risk and analytics into an engine
//! - [`runtime`] - Runs the engine until shutdown, logging periodic reports
//! - [`operator`] - Implements the operator ports the CLI calls

pub mod bootstrap;
pub mod config;
pub mod operator;
pub mod runtime;
