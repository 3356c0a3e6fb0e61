//! Builders for domain primitives used across tests.
//!
//! Provides concise factory functions for snapshots, order-book samples and
//! trade results so tests focus on assertions rather than construction
//! boilerplate.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::id::AssetId;
use crate::domain::money::Amount;
use crate::domain::signal::Signal;
use crate::domain::snapshot::{LiquiditySnapshot, MarketSnapshot, ReferenceOdds};
use crate::domain::trade::{TradeIntent, TradeResult};

/// Fixed instant used as the default test time: 2026-03-14 12:00:00 UTC.
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0)
        .single()
        .expect("fixed test time should be valid")
}

/// Snapshot with the three default assets (BTC, ETH, LINK) and zero deltas.
pub fn snapshot(up: f64) -> MarketSnapshot {
    snapshot_with_assets(up, &[("BTC", 27_000.0), ("ETH", 1_700.0), ("LINK", 7.5)])
}

/// Snapshot with the given `(asset, price)` pairs and zero deltas.
pub fn snapshot_with_assets(up: f64, assets: &[(&str, f64)]) -> MarketSnapshot {
    let prices: BTreeMap<AssetId, f64> = assets
        .iter()
        .map(|(asset, price)| (AssetId::from(*asset), *price))
        .collect();
    let deltas = prices.keys().map(|asset| (asset.clone(), 0.0)).collect();
    MarketSnapshot::try_new(odds(up), prices, deltas, fixed_time())
        .expect("test snapshot should be valid")
}

/// Snapshot with explicit `(asset, price, delta)` triples.
pub fn snapshot_with_deltas(up: f64, assets: &[(&str, f64, f64)]) -> MarketSnapshot {
    let mut prices = BTreeMap::new();
    let mut deltas = BTreeMap::new();
    for (asset, price, delta) in assets {
        prices.insert(AssetId::from(*asset), *price);
        deltas.insert(AssetId::from(*asset), *delta);
    }
    MarketSnapshot::try_new(odds(up), prices, deltas, fixed_time())
        .expect("test snapshot should be valid")
}

/// Reference odds with the given UP probability.
pub fn odds(up: f64) -> ReferenceOdds {
    ReferenceOdds::try_new(up).expect("test odds should be a probability")
}

/// Order-book sample for the default test market.
pub fn book(bid: f64, ask: f64) -> LiquiditySnapshot {
    LiquiditySnapshot::try_new("TEST", bid, ask, fixed_time()).expect("test book should be valid")
}

/// A book that confirms both UP and DOWN under default liquidity settings.
pub fn balanced_book() -> LiquiditySnapshot {
    book(0.5, 0.5)
}

/// A directional intent with explicit bounds.
pub fn intent(signal: Signal, stake: Amount, take_profit: Amount, stop_loss: Amount) -> TradeIntent {
    TradeIntent {
        signal,
        stake,
        take_profit,
        stop_loss,
        confidence: 0.7,
    }
}

/// A recorded trade with the given P/L and confidence.
pub fn trade(signal: Signal, profit_loss: Amount, confidence: f64) -> TradeResult {
    let intent = TradeIntent {
        signal,
        stake: rust_decimal_macros::dec!(0.05),
        take_profit: rust_decimal_macros::dec!(0.0025),
        stop_loss: rust_decimal_macros::dec!(0.0015),
        confidence,
    };
    TradeResult::from_intent(&intent, profit_loss, fixed_time())
}
