//! Live execution over HTTP.

pub mod executor;
