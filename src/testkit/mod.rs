//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for snapshots, order books, intents and trades.
//! - [`clock`] - `ManualClock` for deterministic cooldowns and rollover.
//! - [`feed`] - Scripted market and liquidity feeds.
//! - [`executor`] - Scripted trade executor.
//! - [`model`] - Fixed-output signal model.
//! - [`engine`] - `LoopHarness` wiring a decision loop to the mocks above.
//! - [`config`] - Canonical test configurations.

pub mod clock;
pub mod config;
pub mod domain;
pub mod engine;
pub mod executor;
pub mod feed;
pub mod model;
