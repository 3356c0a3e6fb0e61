//! Diagnostic projections for operator-facing adapters.

use crate::error::Result;

/// Summary output for `check config`.
#[derive(Debug, Clone)]
pub struct ConfigCheckReport {
    /// Configured engine mode (`paper`, `live`, `both`).
    pub mode: String,
    pub shared_portfolio: bool,
    pub starting_balance: String,
    /// Tracked asset symbols in feed order.
    pub assets: Vec<String>,
    /// Whether the live execution path would be built.
    pub live_enabled: bool,
    pub live_endpoint_configured: bool,
    pub api_key_present: bool,
    /// Fixed RNG seed, when runs are reproducible.
    pub seed: Option<u64>,
}

impl ConfigCheckReport {
    /// True when the live loop has everything it needs, or is not enabled.
    #[must_use]
    pub const fn live_ready(&self) -> bool {
        !self.live_enabled || (self.live_endpoint_configured && self.api_key_present)
    }
}

/// Diagnostic use-cases for operator-facing adapters.
pub trait DiagnosticOperator: Send + Sync {
    /// Parse and validate configuration, summarising what a run would use.
    fn check_config(&self, config_toml: &str) -> Result<ConfigCheckReport>;
}
