//! Trade and market analytics module.

pub mod recorder;
