//! Infrastructure configuration modules.
//!
//! One module per TOML section; [`settings`] aggregates them into
//! [`Config`](settings::Config).

pub mod analytics;
pub mod engine;
pub mod execution;
pub mod feed;
pub mod liquidity;
pub mod logging;
pub mod risk;
pub mod settings;
pub mod signal;
