//! Analytics buffer configuration.

use serde::Deserialize;

use crate::application::analytics::recorder::AnalyticsSettings;

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default = "default_capacity")]
    pub trade_capacity: usize,
    #[serde(default = "default_capacity")]
    pub market_capacity: usize,
    #[serde(default = "default_min_correlation_points")]
    pub min_correlation_points: usize,
}

const fn default_capacity() -> usize {
    200
}

const fn default_min_correlation_points() -> usize {
    10
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            trade_capacity: default_capacity(),
            market_capacity: default_capacity(),
            min_correlation_points: default_min_correlation_points(),
        }
    }
}

impl From<AnalyticsConfig> for AnalyticsSettings {
    fn from(config: AnalyticsConfig) -> Self {
        Self {
            trade_capacity: config.trade_capacity,
            market_capacity: config.market_capacity,
            min_correlation_points: config.min_correlation_points,
        }
    }
}
