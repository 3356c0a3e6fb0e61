//! Simulated market data and paper execution.

pub mod executor;
pub mod feed;
pub mod order_book;
pub mod rng;
