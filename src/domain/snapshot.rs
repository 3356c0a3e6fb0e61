//! Market and liquidity snapshots.
//!
//! Both snapshot types are immutable once built; derived fields are computed
//! at construction so consumers never see inconsistent values.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::AssetId;

/// Up/down probability pair for the reference market. Always sums to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceOdds {
    up: f64,
    down: f64,
}

impl ReferenceOdds {
    /// Build odds from the up probability.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ProbabilityOutOfRange`] when `up` is outside
    /// `[0, 1]` or not finite.
    pub fn try_new(up: f64) -> Result<Self, DomainError> {
        if !up.is_finite() || !(0.0..=1.0).contains(&up) {
            return Err(DomainError::ProbabilityOutOfRange { value: up });
        }
        Ok(Self { up, down: 1.0 - up })
    }

    #[must_use]
    pub const fn up(&self) -> f64 {
        self.up
    }

    #[must_use]
    pub const fn down(&self) -> f64 {
        self.down
    }
}

/// A timestamped view of the reference odds and tracked asset prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    reference_odds: ReferenceOdds,
    asset_prices: BTreeMap<AssetId, f64>,
    asset_deltas: BTreeMap<AssetId, f64>,
    timestamp: DateTime<Utc>,
}

impl MarketSnapshot {
    /// Build a snapshot, validating that every price and delta is finite and
    /// that prices are non-negative.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] describing the first invalid value.
    pub fn try_new(
        reference_odds: ReferenceOdds,
        asset_prices: BTreeMap<AssetId, f64>,
        asset_deltas: BTreeMap<AssetId, f64>,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        for &price in asset_prices.values() {
            if !price.is_finite() {
                return Err(DomainError::NonFinite {
                    field: "asset_price",
                    value: price,
                });
            }
            if price < 0.0 {
                return Err(DomainError::NegativePrice {
                    field: "asset_price",
                    value: price,
                });
            }
        }
        if let Some(&delta) = asset_deltas.values().find(|d| !d.is_finite()) {
            return Err(DomainError::NonFinite {
                field: "asset_delta",
                value: delta,
            });
        }

        Ok(Self {
            reference_odds,
            asset_prices,
            asset_deltas,
            timestamp,
        })
    }

    #[must_use]
    pub const fn reference_odds(&self) -> ReferenceOdds {
        self.reference_odds
    }

    #[must_use]
    pub const fn asset_prices(&self) -> &BTreeMap<AssetId, f64> {
        &self.asset_prices
    }

    #[must_use]
    pub const fn asset_deltas(&self) -> &BTreeMap<AssetId, f64> {
        &self.asset_deltas
    }

    #[must_use]
    pub fn price(&self, asset: &AssetId) -> Option<f64> {
        self.asset_prices.get(asset).copied()
    }

    /// Fractional change for an asset; zero when the feed did not report one.
    #[must_use]
    pub fn delta(&self, asset: &AssetId) -> f64 {
        self.asset_deltas.get(asset).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Feature vector handed to the signal model:
    /// `[up, down, delta(asset_1), ..., delta(asset_n)]` in asset order.
    #[must_use]
    pub fn features(&self) -> Vec<f64> {
        let mut features = Vec::with_capacity(2 + self.asset_prices.len());
        features.push(self.reference_odds.up());
        features.push(self.reference_odds.down());
        features.extend(self.asset_prices.keys().map(|asset| self.delta(asset)));
        features
    }
}

/// Order-book style liquidity sample for the reference market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquiditySnapshot {
    market: String,
    bid: f64,
    ask: f64,
    spread: f64,
    liquidity_score: f64,
    timestamp: DateTime<Utc>,
}

impl LiquiditySnapshot {
    /// Build a liquidity snapshot and derive spread and liquidity score.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if bid or ask is negative or not finite.
    pub fn try_new(
        market: impl Into<String>,
        bid: f64,
        ask: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        for (field, value) in [("bid", bid), ("ask", ask)] {
            if !value.is_finite() {
                return Err(DomainError::NonFinite { field, value });
            }
            if value < 0.0 {
                return Err(DomainError::NegativePrice { field, value });
            }
        }

        let high = bid.max(ask);
        let liquidity_score = if high > 0.0 { bid.min(ask) / high } else { 0.0 };

        Ok(Self {
            market: market.into(),
            bid,
            ask,
            spread: (bid - ask).abs(),
            liquidity_score,
            timestamp,
        })
    }

    #[must_use]
    pub fn market(&self) -> &str {
        &self.market
    }

    #[must_use]
    pub const fn bid(&self) -> f64 {
        self.bid
    }

    #[must_use]
    pub const fn ask(&self) -> f64 {
        self.ask
    }

    #[must_use]
    pub const fn spread(&self) -> f64 {
        self.spread
    }

    #[must_use]
    pub const fn liquidity_score(&self) -> f64 {
        self.liquidity_score
    }

    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prices(entries: &[(&str, f64)]) -> BTreeMap<AssetId, f64> {
        entries
            .iter()
            .map(|(name, value)| (AssetId::from(*name), *value))
            .collect()
    }

    #[test]
    fn odds_pair_sums_to_one() {
        let odds = ReferenceOdds::try_new(0.42).unwrap();
        assert!((odds.up() + odds.down() - 1.0).abs() < 1e-12);
        assert!(ReferenceOdds::try_new(-0.1).is_err());
        assert!(ReferenceOdds::try_new(f64::NAN).is_err());
    }

    #[test]
    fn snapshot_rejects_non_finite_prices() {
        let odds = ReferenceOdds::try_new(0.5).unwrap();
        let result = MarketSnapshot::try_new(
            odds,
            prices(&[("BTC", f64::INFINITY)]),
            BTreeMap::new(),
            Utc::now(),
        );
        assert!(matches!(result, Err(DomainError::NonFinite { .. })));

        let result = MarketSnapshot::try_new(
            odds,
            prices(&[("BTC", -1.0)]),
            BTreeMap::new(),
            Utc::now(),
        );
        assert!(matches!(result, Err(DomainError::NegativePrice { .. })));
    }

    #[test]
    fn features_follow_asset_order() {
        let snapshot = MarketSnapshot::try_new(
            ReferenceOdds::try_new(0.6).unwrap(),
            prices(&[("LINK", 7.0), ("BTC", 27000.0), ("ETH", 1700.0)]),
            prices(&[("BTC", 0.01), ("LINK", -0.02)]),
            Utc::now(),
        )
        .unwrap();

        let features = snapshot.features();
        assert_eq!(features.len(), 5);
        assert!((features[0] - 0.6).abs() < 1e-12);
        assert!((features[1] - 0.4).abs() < 1e-12);
        // BTC, ETH (missing delta -> 0), LINK
        assert_eq!(&features[2..], &[0.01, 0.0, -0.02]);
    }

    #[test]
    fn liquidity_derives_spread_and_score() {
        let snap = LiquiditySnapshot::try_new("POLY", 0.50, 0.52, Utc::now()).unwrap();
        assert!((snap.spread() - 0.02).abs() < 1e-12);
        assert!((snap.liquidity_score() - 0.50 / 0.52).abs() < 1e-12);

        let empty = LiquiditySnapshot::try_new("POLY", 0.0, 0.0, Utc::now()).unwrap();
        assert_eq!(empty.liquidity_score(), 0.0);

        assert!(LiquiditySnapshot::try_new("POLY", -0.1, 0.5, Utc::now()).is_err());
    }
}
