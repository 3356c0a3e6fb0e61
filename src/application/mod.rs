//! Application services (use cases).
//!
//! These services implement the decision cycle on top of the domain types
//! and drive outbound ports without knowing which adapters back them.

pub mod analytics;
pub mod engine;
pub mod liquidity;
pub mod risk;
pub mod signal;
