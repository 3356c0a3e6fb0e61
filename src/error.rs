use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors raised by a trade execution collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("trade rejected: {0}")]
    Rejected(String),

    #[error("invalid trade intent: {0}")]
    InvalidIntent(String),
}

/// Transient market-data errors. The decision loop backs off and retries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("feed unavailable: {0}")]
    FeedUnavailable(String),

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error(transparent)]
    Data(#[from] DataError),

    /// A broken internal invariant (for example a negative stake reaching
    /// execution). Indicates a programming defect.
    #[error("invariant violated: {0}")]
    Invariant(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
