//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!     ┌──────────────┐      ┌──────────────────────┐      ┌──────────────┐
//!     │ Market/Book  │─────▶│     Application      │─────▶│   Trade      │
//!     │    feeds     │      │  (decision loop,     │      │  executor    │
//!     └──────────────┘      │   risk, analytics)   │      └──────────────┘
//!                           └──────────▲───────────┘
//!                                      │
//!                              ┌───────┴───────┐
//!                              │ EngineControl │  (CLI / chat front-ends)
//!                              └───────────────┘
//! ```
//!
//! - [`outbound`]: collaborators the core consumes (feeds, executor, model, clock)
//! - [`inbound`]: the control surface the core exposes

pub mod inbound;
pub mod outbound;
