//! Engine control port for operator-facing adapters.
//!
//! Keeps control surfaces (CLI today, a chat bot elsewhere) decoupled from
//! the concrete engine wiring.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::portfolio::{PortfolioState, RiskState};
use crate::domain::stats::{CorrelationEntry, PerformanceMetrics};

/// Which execution path a decision loop drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradingMode {
    /// Simulated fills.
    Paper,
    /// Delegates to the live execution venue.
    Live,
}

impl TradingMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paper => "paper",
            Self::Live => "live",
        }
    }
}

impl fmt::Display for TradingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "paper" | "sandbox" | "simulated" => Ok(Self::Paper),
            "live" | "real" => Ok(Self::Live),
            other => Err(format!("unknown trading mode '{other}'")),
        }
    }
}

/// Point-in-time view of one decision loop.
#[derive(Debug, Clone, Serialize)]
pub struct LoopStatus {
    pub mode: TradingMode,
    pub running: bool,
    pub risk_state: RiskState,
    pub portfolio: PortfolioState,
}

/// Operator-facing engine surface.
pub trait EngineControl: Send + Sync {
    /// Start every configured loop. Idempotent: returns the number of loops
    /// that were actually started by this call.
    fn start(&self) -> usize;

    /// Ask every loop to stop at its next iteration boundary.
    fn stop(&self);

    /// Human-readable trade dashboard.
    fn dashboard(&self) -> String;

    /// Human-readable asset correlation map.
    fn correlation_map(&self) -> String;

    /// Raw correlation coefficients for every tracked asset pair.
    fn correlations(&self) -> Vec<CorrelationEntry>;

    fn performance(&self) -> PerformanceMetrics;

    fn status(&self) -> Vec<LoopStatus>;

    /// Clear an active loss-streak cooldown on every portfolio.
    fn resume_trading(&self);
}
