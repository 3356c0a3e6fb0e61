//! PolyPulse - a risk-gated micro-decision trading loop.
//!
//! Each cycle turns a market snapshot into a directional signal, confirms
//! it against order-book liquidity, sizes it against an insured portfolio
//! and executes it, either simulated (paper) or through a live venue.
//!
//! # Architecture
//!
//! The crate is laid out hexagonally:
//!
//! - [`domain`] - Value types: snapshots, signals, intents, portfolio state
//! - [`port`] - Traits the core consumes (feeds, executor, model, clock)
//!   and exposes (engine control, operator)
//! - [`application`] - Signal generation, liquidity confirmation, risk
//!   management, analytics and the decision loop
//! - [`adapter`] - Simulated feeds and executor, live HTTP executor,
//!   momentum model, CLI
//! - [`infrastructure`] - Configuration, wiring and runtime lifecycle
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `live` (default) - HTTP-backed live execution
//! - `testkit` - Scripted collaborators and builders for integration tests
//!
//! # Example
//!
//! ```no_run
//! use polypulse::infrastructure::bootstrap::build_engine;
//! use polypulse::infrastructure::config::settings::Config;
//! use polypulse::port::inbound::engine::EngineControl;
//!
//! # async fn demo() -> polypulse::error::Result<()> {
//! let engine = build_engine(&Config::default())?;
//! engine.start();
//! engine.stop();
//! engine.join().await;
//! println!("{}", engine.dashboard());
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
