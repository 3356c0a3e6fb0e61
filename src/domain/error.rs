//! Domain validation errors for core domain types.
//!
//! These errors are returned by `try_new` constructors when a value would
//! break a domain invariant.
//!
//! # Examples
//!
//! ```
//! use polypulse::domain::error::DomainError;
//! use polypulse::domain::snapshot::ReferenceOdds;
//!
//! let result = ReferenceOdds::try_new(1.4);
//! assert!(matches!(result, Err(DomainError::ProbabilityOutOfRange { .. })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Probabilities must lie in `[0, 1]`.
    #[error("probability must be within [0, 1], got {value}")]
    ProbabilityOutOfRange {
        /// The rejected probability.
        value: f64,
    },

    /// Numeric market inputs must be finite.
    #[error("{field} must be finite, got {value}")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Quoted prices cannot be negative.
    #[error("{field} must not be negative, got {value}")]
    NegativePrice {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Buffers need room for at least one entry.
    #[error("capacity must be greater than 0")]
    ZeroCapacity,
}
