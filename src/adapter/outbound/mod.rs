//! Outbound adapters (driven side).

#[cfg(feature = "live")]
pub mod live;
pub mod model;
pub mod simulated;
