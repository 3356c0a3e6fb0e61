//! Simulated market data configuration.

use serde::Deserialize;

/// Uniform price range for one simulated asset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssetRange {
    pub symbol: String,
    pub min: f64,
    pub max: f64,
}

impl AssetRange {
    fn new(symbol: &str, min: f64, max: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            min,
            max,
        }
    }
}

/// Simulated feed and order book configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Reference market name carried on liquidity samples.
    #[serde(default = "default_market")]
    pub market: String,
    #[serde(default = "default_odds_min")]
    pub odds_min: f64,
    #[serde(default = "default_odds_max")]
    pub odds_max: f64,
    #[serde(default = "default_book_min")]
    pub book_min: f64,
    #[serde(default = "default_book_max")]
    pub book_max: f64,
    #[serde(default = "default_assets")]
    pub assets: Vec<AssetRange>,
    /// Seed for the simulated feeds; unseeded runs draw from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_market() -> String {
    "POLYMARKET".into()
}

const fn default_odds_min() -> f64 {
    0.4
}

const fn default_odds_max() -> f64 {
    0.6
}

const fn default_book_min() -> f64 {
    0.45
}

const fn default_book_max() -> f64 {
    0.55
}

fn default_assets() -> Vec<AssetRange> {
    vec![
        AssetRange::new("BTC", 26_000.0, 28_000.0),
        AssetRange::new("ETH", 1_600.0, 1_800.0),
        AssetRange::new("LINK", 6.5, 8.5),
    ]
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            market: default_market(),
            odds_min: default_odds_min(),
            odds_max: default_odds_max(),
            book_min: default_book_min(),
            book_max: default_book_max(),
            assets: default_assets(),
            seed: None,
        }
    }
}
