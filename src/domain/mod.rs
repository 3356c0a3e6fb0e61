//! Exchange-agnostic domain types.
//!
//! Everything here is plain data plus pure functions: no I/O, no async, no
//! knowledge of the outer layers.

pub mod error;
pub mod history;
pub mod id;
pub mod money;
pub mod portfolio;
pub mod signal;
pub mod snapshot;
pub mod stats;
pub mod trade;
