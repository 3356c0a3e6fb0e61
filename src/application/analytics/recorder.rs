//! Trade and market analytics.
//!
//! Keeps rolling buffers of executed trades and of per-series market values
//! (reference odds plus one series per asset), and derives the dashboard,
//! performance metrics and asset correlations from them.

use std::collections::{BTreeMap, BTreeSet};

use parking_lot::Mutex;
use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::history::BoundedHistory;
use crate::domain::id::AssetId;
use crate::domain::snapshot::MarketSnapshot;
use crate::domain::stats::{pearson, CorrelationEntry, PerformanceMetrics};
use crate::domain::trade::TradeResult;

/// Series name for the UP reference probability.
pub const ODDS_SERIES: &str = "ODDS";

const DASHBOARD_TITLE: &str = "📊 PolyPulse Dashboard";
const CORRELATION_TITLE: &str = "📈 Correlation Map";

/// Analytics buffer settings.
#[derive(Debug, Clone)]
pub struct AnalyticsSettings {
    pub trade_capacity: usize,
    /// Capacity of each market series.
    pub market_capacity: usize,
    /// Points each series needs before a correlation is reported.
    pub min_correlation_points: usize,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            trade_capacity: 200,
            market_capacity: 200,
            min_correlation_points: 10,
        }
    }
}

#[derive(Debug)]
struct MarketSeries {
    values: BTreeMap<String, BoundedHistory<f64>>,
    assets: BTreeSet<AssetId>,
}

/// Append-only recorder of trades and market history.
pub struct AnalyticsRecorder {
    settings: AnalyticsSettings,
    trades: Mutex<BoundedHistory<TradeResult>>,
    market: Mutex<MarketSeries>,
}

impl AnalyticsRecorder {
    /// Create a recorder.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ZeroCapacity`] if either buffer capacity is zero.
    pub fn new(settings: AnalyticsSettings) -> Result<Self, DomainError> {
        let trades = BoundedHistory::try_new(settings.trade_capacity)?;
        if settings.market_capacity == 0 {
            return Err(DomainError::ZeroCapacity);
        }
        Ok(Self {
            settings,
            trades: Mutex::new(trades),
            market: Mutex::new(MarketSeries {
                values: BTreeMap::new(),
                assets: BTreeSet::new(),
            }),
        })
    }

    /// Append an executed trade.
    pub fn record(&self, trade: TradeResult) {
        debug!(trade_id = %trade.id, profit_loss = %trade.profit_loss, "Trade recorded");
        self.trades.lock().push(trade);
    }

    /// Append the snapshot's reference odds and asset prices to their series.
    pub fn record_market(&self, snapshot: &MarketSnapshot) {
        let mut market = self.market.lock();
        self.push_value(&mut market, ODDS_SERIES, snapshot.reference_odds().up());
        for (asset, price) in snapshot.asset_prices() {
            self.push_value(&mut market, asset.as_str(), *price);
            if !market.assets.contains(asset) {
                market.assets.insert(asset.clone());
            }
        }
    }

    #[must_use]
    pub fn last_trade(&self) -> Option<TradeResult> {
        self.trades.lock().last().cloned()
    }

    /// Recorded trades, oldest first.
    #[must_use]
    pub fn trades(&self) -> Vec<TradeResult> {
        self.trades.lock().to_vec()
    }

    #[must_use]
    pub fn trade_count(&self) -> usize {
        self.trades.lock().len()
    }

    /// Values of one market series, oldest first. Empty for unknown names.
    #[must_use]
    pub fn series(&self, name: &str) -> Vec<f64> {
        self.market
            .lock()
            .values
            .get(&name.to_uppercase())
            .map(BoundedHistory::to_vec)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn dashboard(&self) -> String {
        let trades = self.trades.lock();
        let Some(last) = trades.last() else {
            return format!("{DASHBOARD_TITLE}\n\nNo trades yet.");
        };

        let profits: Vec<_> = trades.iter().map(|t| t.profit_loss).collect();
        let metrics = PerformanceMetrics::from_profits(&profits);

        format!(
            "{DASHBOARD_TITLE}\n\n\
             Last Trade: {}\n\
             P/L: {:.6}\n\
             Confidence: {:.2}\n\n\
             Avg Profit: {:.6}\n\
             Win Rate: {:.1}%\n\
             Total Trades: {}",
            last.signal,
            last.profit_loss,
            last.confidence,
            metrics.avg_profit,
            metrics.win_rate,
            metrics.trade_count,
        )
    }

    #[must_use]
    pub fn performance(&self) -> PerformanceMetrics {
        let profits: Vec<_> = self.trades.lock().iter().map(|t| t.profit_loss).collect();
        PerformanceMetrics::from_profits(&profits)
    }

    /// Pearson correlation between two series. Symmetric; `0.0` when either
    /// series is unknown or too short.
    #[must_use]
    pub fn correlation(&self, a: &str, b: &str) -> f64 {
        let market = self.market.lock();
        let (Some(a), Some(b)) = (
            market.values.get(&a.to_uppercase()),
            market.values.get(&b.to_uppercase()),
        ) else {
            return 0.0;
        };
        self.correlate(a, b)
    }

    /// Correlation for every pair of tracked assets, in asset order.
    #[must_use]
    pub fn correlation_map(&self) -> Vec<CorrelationEntry> {
        let market = self.market.lock();
        let assets: Vec<&AssetId> = market.assets.iter().collect();

        let mut entries = Vec::new();
        for (i, first) in assets.iter().enumerate() {
            for second in &assets[i + 1..] {
                let coefficient = match (
                    market.values.get(first.as_str()),
                    market.values.get(second.as_str()),
                ) {
                    (Some(a), Some(b)) => self.correlate(a, b),
                    _ => 0.0,
                };
                entries.push(CorrelationEntry {
                    first: (*first).clone(),
                    second: (*second).clone(),
                    coefficient,
                });
            }
        }
        entries
    }

    #[must_use]
    pub fn render_correlation_map(&self) -> String {
        let entries = self.correlation_map();
        if entries.is_empty() {
            return format!("{CORRELATION_TITLE}\n\nNo asset pairs tracked yet.");
        }

        let mut out = format!("{CORRELATION_TITLE}\n");
        for entry in &entries {
            out.push_str(&format!(
                "\n{} ↔ {}: {:.2}",
                entry.first, entry.second, entry.coefficient
            ));
        }
        out
    }

    fn push_value(&self, market: &mut MarketSeries, name: &str, value: f64) {
        if let Some(series) = market.values.get_mut(name) {
            series.push(value);
            return;
        }
        // Capacity is checked in `new`.
        if let Ok(mut series) = BoundedHistory::try_new(self.settings.market_capacity) {
            series.push(value);
            market.values.insert(name.to_string(), series);
        }
    }

    fn correlate(&self, a: &BoundedHistory<f64>, b: &BoundedHistory<f64>) -> f64 {
        pearson(&a.to_vec(), &b.to_vec(), self.settings.min_correlation_points)
    }
}
