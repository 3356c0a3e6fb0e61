//! Statistics over trade and market histories.
//!
//! All functions are total: degenerate input yields `0.0` rather than an
//! error or NaN.

use rust_decimal::Decimal;
use serde::Serialize;

use super::id::AssetId;
use super::money::Amount;

/// Aggregate performance over the recorded trade buffer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceMetrics {
    /// Percentage of trades with positive P/L, `0..=100`.
    pub win_rate: f64,
    pub avg_profit: Amount,
    /// Most negative peak-to-trough decline of cumulative P/L (`<= 0`).
    pub max_drawdown: Amount,
    pub trade_count: usize,
}

impl PerformanceMetrics {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            win_rate: 0.0,
            avg_profit: Decimal::ZERO,
            max_drawdown: Decimal::ZERO,
            trade_count: 0,
        }
    }

    /// Compute metrics from P/L values in buffer order.
    #[must_use]
    pub fn from_profits(profits: &[Amount]) -> Self {
        if profits.is_empty() {
            return Self::empty();
        }

        let count = profits.len();
        let wins = profits.iter().filter(|p| **p > Decimal::ZERO).count();
        let total: Amount = profits.iter().copied().sum();

        Self {
            win_rate: wins as f64 / count as f64 * 100.0,
            avg_profit: total / Decimal::from(count),
            max_drawdown: max_drawdown(profits),
            trade_count: count,
        }
    }
}

/// Pairwise correlation between two tracked assets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationEntry {
    pub first: AssetId,
    pub second: AssetId,
    pub coefficient: f64,
}

/// Minimum of `cumulative - running_max(cumulative)` over the P/L sequence.
///
/// The running maximum starts at the first cumulative value, so a sequence
/// that only ever falls reports the decline after its first trade.
#[must_use]
pub fn max_drawdown(profits: &[Amount]) -> Amount {
    let mut cumulative = Decimal::ZERO;
    let mut peak: Option<Amount> = None;
    let mut worst = Decimal::ZERO;

    for &pnl in profits {
        cumulative += pnl;
        let running_peak = peak.map_or(cumulative, |p| p.max(cumulative));
        peak = Some(running_peak);
        worst = worst.min(cumulative - running_peak);
    }

    worst
}

/// Pearson correlation of two equally weighted series.
///
/// Series are aligned on their most recent common suffix. Returns `0.0`
/// when fewer than `min_points` values overlap, when either side has zero
/// variance, or when the result is not finite.
#[must_use]
pub fn pearson(a: &[f64], b: &[f64], min_points: usize) -> f64 {
    let n = a.len().min(b.len());
    if n < min_points.max(2) {
        return 0.0;
    }
    let a = &a[a.len() - n..];
    let b = &b[b.len() - n..];

    let mean_a = a.iter().sum::<f64>() / n as f64;
    let mean_b = b.iter().sum::<f64>() / n as f64;

    let (mut cov, mut var_a, mut var_b) = (0.0, 0.0, 0.0);
    for (x, y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    if var_a <= f64::EPSILON || var_b <= f64::EPSILON {
        return 0.0;
    }

    let r = cov / (var_a.sqrt() * var_b.sqrt());
    if r.is_finite() {
        r.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}
