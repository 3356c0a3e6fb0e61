//! Inbound (driving) ports consumed by inbound adapters such as the CLI.

pub mod engine;
pub mod operator;
