//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; the live execution credential is
//! read from the `POLYPULSE_API_KEY` environment variable only.
//!
//! # Example
//!
//! ```no_run
//! use polypulse::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::analytics::AnalyticsConfig;
use super::engine::EngineConfig;
use super::execution::{ExecutionConfig, API_KEY_ENV};
use super::feed::FeedConfig;
use super::liquidity::LiquidityConfig;
use super::logging::LoggingConfig;
use super::risk::RiskConfig;
use super::signal::SignalConfig;
use crate::error::{ConfigError, Result};

/// Longest accepted loss-streak cooldown.
const MAX_COOLDOWN_SECS: u32 = 86_400;

/// Largest scale a `Decimal` can carry.
const MAX_STAKE_PRECISION: u32 = 28;

/// Main application configuration.
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Which loops run, their intervals and portfolio sharing.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Signal generator and model settings.
    #[serde(default)]
    pub signal: SignalConfig,

    /// Order-book liquidity filter.
    #[serde(default)]
    pub liquidity: LiquidityConfig,

    /// Stake sizing, cooldown and daily halt.
    #[serde(default)]
    pub risk: RiskConfig,

    /// Trade and market history buffers.
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Simulated and live executor settings.
    #[serde(default)]
    pub execution: ExecutionConfig,

    /// Simulated market feed and order book.
    #[serde(default)]
    pub feed: FeedConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Loads the live API key from the `POLYPULSE_API_KEY` environment
    /// variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        // Never from the config file.
        config.execution.live.api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty());

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        self.validate_logging()?;
        self.validate_engine()?;
        self.validate_signal()?;
        self.validate_liquidity()?;
        self.validate_risk()?;
        self.validate_analytics()?;
        self.validate_feed()?;

        ensure(
            self.execution.live.timeout_ms > 0,
            "timeout_ms",
            "must be greater than 0",
        )
    }

    fn validate_logging(&self) -> Result<()> {
        ensure(
            matches!(self.logging.format.as_str(), "pretty" | "json"),
            "format",
            "must be \"pretty\" or \"json\"",
        )
    }

    fn validate_engine(&self) -> Result<()> {
        let engine = &self.engine;
        ensure(
            engine.paper_interval_ms > 0,
            "paper_interval_ms",
            "must be greater than 0",
        )?;
        ensure(
            engine.live_interval_ms > 0,
            "live_interval_ms",
            "must be greater than 0",
        )?;
        ensure(
            engine.error_backoff_ms > 0,
            "error_backoff_ms",
            "must be greater than 0",
        )?;
        ensure(
            engine.report_interval_secs > 0,
            "report_interval_secs",
            "must be greater than 0",
        )
    }

    fn validate_signal(&self) -> Result<()> {
        let signal = &self.signal;
        ensure(
            signal.history_capacity > 0,
            "history_capacity",
            "must be greater than 0",
        )?;
        ensure(
            is_unit_interval(signal.confidence_threshold),
            "confidence_threshold",
            "must be between 0 and 1",
        )?;
        ensure(
            is_unit_interval(signal.default_confidence),
            "default_confidence",
            "must be between 0 and 1",
        )?;
        ensure(
            signal.feature_weights.iter().all(|w| w.is_finite()),
            "feature_weights",
            "weights must be finite",
        )?;
        ensure(
            signal.momentum_window > 0,
            "momentum_window",
            "must be greater than 0",
        )?;
        ensure(
            signal.momentum_sensitivity.is_finite() && signal.momentum_sensitivity >= 0.0,
            "momentum_sensitivity",
            "must be 0 or greater",
        )
    }

    fn validate_liquidity(&self) -> Result<()> {
        let liquidity = &self.liquidity;
        ensure(
            liquidity.max_spread.is_finite() && liquidity.max_spread >= 0.0,
            "max_spread",
            "must be 0 or greater",
        )?;
        ensure(
            is_unit_interval(liquidity.min_liquidity_score),
            "min_liquidity_score",
            "must be between 0 and 1",
        )?;
        ensure(
            liquidity.min_bid_ask_ratio.is_finite() && liquidity.min_bid_ask_ratio > 0.0,
            "min_bid_ask_ratio",
            "must be greater than 0",
        )?;
        ensure(
            liquidity.max_bid_ask_ratio.is_finite()
                && liquidity.max_bid_ask_ratio >= liquidity.min_bid_ask_ratio,
            "max_bid_ask_ratio",
            "must be >= min_bid_ask_ratio",
        )?;
        ensure(
            liquidity.history_capacity > 0,
            "history_capacity",
            "must be greater than 0",
        )
    }

    fn validate_risk(&self) -> Result<()> {
        let risk = &self.risk;
        ensure(
            risk.starting_balance > Decimal::ZERO,
            "starting_balance",
            "must be greater than 0",
        )?;
        ensure(
            risk.insurance_fraction >= Decimal::ZERO && risk.insurance_fraction < Decimal::ONE,
            "insurance_fraction",
            "must be in [0, 1)",
        )?;
        ensure(
            risk.max_stake_fraction > Decimal::ZERO && risk.max_stake_fraction <= Decimal::ONE,
            "max_stake_fraction",
            "must be in (0, 1]",
        )?;
        ensure(
            is_unit_interval(risk.confidence_floor),
            "confidence_floor",
            "must be between 0 and 1",
        )?;
        ensure(
            risk.max_consecutive_losses > 0,
            "max_consecutive_losses",
            "must be greater than 0",
        )?;
        ensure(
            risk.cooldown_secs <= MAX_COOLDOWN_SECS,
            "cooldown_secs",
            "must be at most 86400",
        )?;
        ensure(
            risk.daily_loss_limit > Decimal::ZERO && risk.daily_loss_limit <= Decimal::ONE,
            "daily_loss_limit",
            "must be in (0, 1]",
        )?;
        ensure(
            risk.base_take_profit > Decimal::ZERO,
            "base_take_profit",
            "must be greater than 0",
        )?;
        ensure(
            risk.base_stop_loss > Decimal::ZERO,
            "base_stop_loss",
            "must be greater than 0",
        )?;
        ensure(
            risk.stake_precision <= MAX_STAKE_PRECISION,
            "stake_precision",
            "must be at most 28",
        )
    }

    fn validate_analytics(&self) -> Result<()> {
        let analytics = &self.analytics;
        ensure(
            analytics.trade_capacity > 0,
            "trade_capacity",
            "must be greater than 0",
        )?;
        ensure(
            analytics.market_capacity > 0,
            "market_capacity",
            "must be greater than 0",
        )?;
        ensure(
            analytics.min_correlation_points >= 2,
            "min_correlation_points",
            "must be at least 2",
        )
    }

    fn validate_feed(&self) -> Result<()> {
        let feed = &self.feed;
        ensure(
            is_unit_interval(feed.odds_min)
                && is_unit_interval(feed.odds_max)
                && feed.odds_min <= feed.odds_max,
            "odds_range",
            "odds_min <= odds_max, both between 0 and 1",
        )?;
        ensure(
            feed.book_min.is_finite()
                && feed.book_max.is_finite()
                && feed.book_min >= 0.0
                && feed.book_min <= feed.book_max,
            "book_range",
            "0 <= book_min <= book_max",
        )?;

        let mut symbols = BTreeSet::new();
        for asset in &feed.assets {
            ensure(
                !asset.symbol.trim().is_empty(),
                "assets",
                "symbol must not be empty",
            )?;
            ensure(
                symbols.insert(asset.symbol.trim().to_uppercase()),
                "assets",
                format!("duplicate symbol {}", asset.symbol),
            )?;
            ensure(
                asset.min.is_finite()
                    && asset.max.is_finite()
                    && asset.min >= 0.0
                    && asset.min <= asset.max,
                "assets",
                format!("{}: expected 0 <= min <= max", asset.symbol),
            )?;
        }
        Ok(())
    }
}

fn is_unit_interval(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

fn ensure(condition: bool, field: &'static str, reason: impl Into<String>) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: reason.into(),
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::infrastructure::config::engine::EngineMode;
    use rust_decimal_macros::dec;

    fn invalid_field(toml: &str) -> &'static str {
        match Config::parse_toml(toml) {
            Err(Error::Config(ConfigError::InvalidValue { field, .. })) => field,
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.engine.mode, EngineMode::Paper);
        assert!(config.engine.shared_portfolio);
        assert_eq!(config.risk.starting_balance, dec!(1));
        assert_eq!(config.risk.insurance_fraction, dec!(0.05));
        assert_eq!(config.signal.min_history, 10);
        assert_eq!(config.liquidity.min_bid_ask_ratio, 0.95);
        assert_eq!(config.analytics.trade_capacity, 200);
        assert_eq!(config.feed.assets.len(), 3);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn sections_override_defaults() {
        let config = Config::parse_toml(
            r#"
            [engine]
            mode = "both"
            shared_portfolio = false

            [risk]
            starting_balance = "250.0"
            cooldown_secs = 60

            [signal]
            feature_weights = [2.0, 1.0]
            "#,
        )
        .unwrap();
        assert_eq!(config.engine.mode, EngineMode::Both);
        assert!(!config.engine.shared_portfolio);
        assert_eq!(config.risk.starting_balance, dec!(250.0));
        assert_eq!(config.risk.cooldown_secs, 60);
        assert_eq!(config.signal.feature_weights, vec![2.0, 1.0]);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert_eq!(invalid_field("[risk]\ninsurance_fraction = 1.0"), "insurance_fraction");
        assert_eq!(invalid_field("[risk]\nmax_consecutive_losses = 0"), "max_consecutive_losses");
        assert_eq!(invalid_field("[risk]\ncooldown_secs = 90000"), "cooldown_secs");
        assert_eq!(invalid_field("[signal]\nconfidence_threshold = 1.5"), "confidence_threshold");
        assert_eq!(invalid_field("[liquidity]\nmax_bid_ask_ratio = 0.5"), "max_bid_ask_ratio");
        assert_eq!(invalid_field("[analytics]\nmin_correlation_points = 1"), "min_correlation_points");
        assert_eq!(invalid_field("[engine]\npaper_interval_ms = 0"), "paper_interval_ms");
        assert_eq!(invalid_field("[logging]\nformat = \"xml\""), "format");
        assert_eq!(invalid_field("[feed]\nodds_max = 1.2"), "odds_range");
    }

    #[test]
    fn rejects_duplicate_assets() {
        let toml = r#"
            [[feed.assets]]
            symbol = "BTC"
            min = 1.0
            max = 2.0

            [[feed.assets]]
            symbol = "btc"
            min = 1.0
            max = 2.0
        "#;
        assert_eq!(invalid_field(toml), "assets");
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            Config::parse_toml("[engine\nmode = 1"),
            Err(Error::Config(ConfigError::Parse(_)))
        ));
    }

    #[test]
    fn unknown_mode_is_a_parse_error() {
        assert!(matches!(
            Config::parse_toml("[engine]\nmode = \"margin\""),
            Err(Error::Config(ConfigError::Parse(_)))
        ));
    }
}
