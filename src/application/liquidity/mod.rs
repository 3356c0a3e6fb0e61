//! Liquidity confirmation service module.

pub mod confirmer;
