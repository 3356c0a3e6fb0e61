//! Diagnostic check command handlers.

pub mod config;
