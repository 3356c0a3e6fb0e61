//! Risk management service module.
//!
//! Provides stake sizing, the loss-streak cooldown and the daily drawdown
//! halt for one portfolio.

pub mod manager;
