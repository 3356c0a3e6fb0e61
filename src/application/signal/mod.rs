//! Signal generation service module.

pub mod generator;
