//! Runtime control projection types for operator-facing adapters.

use async_trait::async_trait;

use crate::domain::stats::PerformanceMetrics;
use crate::error::Result;
use crate::port::inbound::engine::LoopStatus;

/// Runtime configuration overrides from CLI flags.
///
/// Overrides take precedence over the configuration file.
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    /// Raw TOML configuration content.
    pub config_toml: String,

    /// Override for the engine mode (`paper`, `live`, `both`).
    pub mode: Option<String>,

    /// Stop after this many seconds instead of waiting for Ctrl-C.
    pub duration_secs: Option<u64>,

    /// Override for log level (e.g., "debug", "info", "warn").
    pub log_level: Option<String>,

    /// Whether to output logs as JSON.
    pub json_logs: bool,
}

/// Final engine state reported when a run shuts down.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub dashboard: String,
    pub correlation_map: String,
    pub performance: PerformanceMetrics,
    pub status: Vec<LoopStatus>,
}

/// Runtime control use-cases for operator-facing adapters.
///
/// Implementations must be thread-safe (`Send + Sync`).
#[async_trait]
pub trait RuntimeOperator: Send + Sync {
    /// Run the engine until Ctrl-C or the requested duration elapses.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the engine
    /// cannot be constructed.
    async fn execute_run(&self, request: RunRequest) -> Result<RunReport>;
}
