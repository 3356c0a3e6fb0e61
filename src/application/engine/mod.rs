//! Decision loops and the engine that controls them.
//!
//! - [`decision_loop`] - One closed decision cycle per trading mode
//! - [`service`] - [`Engine`](service::Engine), the `EngineControl` implementation

pub mod decision_loop;
pub mod service;
