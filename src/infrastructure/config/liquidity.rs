//! Liquidity confirmation configuration.

use serde::Deserialize;

use crate::application::liquidity::confirmer::LiquiditySettings;

/// Liquidity filter configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LiquidityConfig {
    #[serde(default = "default_max_spread")]
    pub max_spread: f64,
    #[serde(default = "default_min_liquidity_score")]
    pub min_liquidity_score: f64,
    #[serde(default = "default_min_bid_ask_ratio")]
    pub min_bid_ask_ratio: f64,
    #[serde(default = "default_max_bid_ask_ratio")]
    pub max_bid_ask_ratio: f64,
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

const fn default_max_spread() -> f64 {
    0.05
}

const fn default_min_liquidity_score() -> f64 {
    0.9
}

const fn default_min_bid_ask_ratio() -> f64 {
    0.95
}

const fn default_max_bid_ask_ratio() -> f64 {
    1.05
}

const fn default_history_capacity() -> usize {
    500
}

impl Default for LiquidityConfig {
    fn default() -> Self {
        Self {
            max_spread: default_max_spread(),
            min_liquidity_score: default_min_liquidity_score(),
            min_bid_ask_ratio: default_min_bid_ask_ratio(),
            max_bid_ask_ratio: default_max_bid_ask_ratio(),
            history_capacity: default_history_capacity(),
        }
    }
}

impl From<LiquidityConfig> for LiquiditySettings {
    fn from(config: LiquidityConfig) -> Self {
        Self {
            max_spread: config.max_spread,
            min_liquidity_score: config.min_liquidity_score,
            min_bid_ask_ratio: config.min_bid_ask_ratio,
            max_bid_ask_ratio: config.max_bid_ask_ratio,
            history_capacity: config.history_capacity,
        }
    }
}
