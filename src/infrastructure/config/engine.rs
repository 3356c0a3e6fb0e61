//! Engine configuration: which loops run and how often.

use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::application::engine::decision_loop::LoopSettings;
use crate::port::inbound::engine::TradingMode;

/// Which decision loops the engine runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineMode {
    #[default]
    Paper,
    Live,
    Both,
}

impl EngineMode {
    /// Trading modes to start, in start order.
    #[must_use]
    pub fn trading_modes(self) -> Vec<TradingMode> {
        match self {
            Self::Paper => vec![TradingMode::Paper],
            Self::Live => vec![TradingMode::Live],
            Self::Both => vec![TradingMode::Paper, TradingMode::Live],
        }
    }

    #[must_use]
    pub fn includes_live(self) -> bool {
        matches!(self, Self::Live | Self::Both)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paper => "paper",
            Self::Live => "live",
            Self::Both => "both",
        }
    }
}

impl FromStr for EngineMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("both") {
            return Ok(Self::Both);
        }
        match s.parse::<TradingMode>()? {
            TradingMode::Paper => Ok(Self::Paper),
            TradingMode::Live => Ok(Self::Live),
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub mode: EngineMode,
    /// Loops share one portfolio when true; otherwise each gets its own.
    #[serde(default = "default_shared_portfolio")]
    pub shared_portfolio: bool,
    #[serde(default = "default_paper_interval_ms")]
    pub paper_interval_ms: u64,
    #[serde(default = "default_live_interval_ms")]
    pub live_interval_ms: u64,
    /// Pause after a failed cycle (milliseconds).
    #[serde(default = "default_error_backoff_ms")]
    pub error_backoff_ms: u64,
    /// Dashboard/status log interval (seconds).
    #[serde(default = "default_report_interval_secs")]
    pub report_interval_secs: u64,
}

const fn default_shared_portfolio() -> bool {
    true
}

const fn default_paper_interval_ms() -> u64 {
    500
}

const fn default_live_interval_ms() -> u64 {
    200
}

const fn default_error_backoff_ms() -> u64 {
    1000
}

const fn default_report_interval_secs() -> u64 {
    30
}

impl EngineConfig {
    /// Loop timing for `mode`.
    #[must_use]
    pub const fn loop_settings(&self, mode: TradingMode) -> LoopSettings {
        let interval_ms = match mode {
            TradingMode::Paper => self.paper_interval_ms,
            TradingMode::Live => self.live_interval_ms,
        };
        LoopSettings {
            interval: Duration::from_millis(interval_ms),
            error_backoff: Duration::from_millis(self.error_backoff_ms),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: EngineMode::default(),
            shared_portfolio: default_shared_portfolio(),
            paper_interval_ms: default_paper_interval_ms(),
            live_interval_ms: default_live_interval_ms(),
            error_backoff_ms: default_error_backoff_ms(),
            report_interval_secs: default_report_interval_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_mode_parses_both_and_aliases() {
        assert_eq!("both".parse::<EngineMode>(), Ok(EngineMode::Both));
        assert_eq!("sandbox".parse::<EngineMode>(), Ok(EngineMode::Paper));
        assert_eq!("LIVE".parse::<EngineMode>(), Ok(EngineMode::Live));
        assert!("margin".parse::<EngineMode>().is_err());
    }

    #[test]
    fn both_runs_paper_then_live() {
        assert_eq!(
            EngineMode::Both.trading_modes(),
            vec![TradingMode::Paper, TradingMode::Live]
        );
        assert!(EngineMode::Both.includes_live());
        assert!(!EngineMode::Paper.includes_live());
    }

    #[test]
    fn loop_settings_follow_mode() {
        let config = EngineConfig::default();
        assert_eq!(
            config.loop_settings(TradingMode::Paper).interval,
            Duration::from_millis(500)
        );
        assert_eq!(
            config.loop_settings(TradingMode::Live).interval,
            Duration::from_millis(200)
        );
        assert_eq!(
            config.loop_settings(TradingMode::Live).error_backoff,
            Duration::from_millis(1000)
        );
    }
}
