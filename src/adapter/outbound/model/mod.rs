//! Signal model implementations.

pub mod momentum;
