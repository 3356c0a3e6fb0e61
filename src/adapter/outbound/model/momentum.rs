//! Momentum heuristic signal model.
//!
//! Scores the latest snapshot by how far the up-probability sits above its
//! recent mean, plus the mean fractional asset move. Positive scores lean
//! `Up`, negative lean `Down`. It is a placeholder black box, not a
//! forecasting model.

use crate::domain::history::BoundedHistory;
use crate::domain::signal::Signal;
use crate::domain::snapshot::MarketSnapshot;
use crate::port::outbound::model::{ModelOutput, SignalModel};

/// Index of the up-probability in the feature vector.
const UP_FEATURE: usize = 0;

/// Index of the first asset delta in the feature vector.
const FIRST_DELTA_FEATURE: usize = 2;

/// Momentum score over the up-probability and asset deltas.
#[derive(Debug, Clone, Copy)]
pub struct MomentumModel {
    window: usize,
    sensitivity: f64,
}

impl MomentumModel {
    /// `window` snapshots before the latest form the baseline; a zero
    /// window compares against the latest snapshot itself.
    #[must_use]
    pub const fn new(window: usize, sensitivity: f64) -> Self {
        Self { window, sensitivity }
    }

    fn baseline(&self, up: f64, history: &BoundedHistory<MarketSnapshot>) -> f64 {
        // The latest snapshot is already the last history entry.
        let previous: Vec<f64> = history
            .iter()
            .rev()
            .skip(1)
            .take(self.window)
            .map(|s| s.reference_odds().up())
            .collect();
        if previous.is_empty() {
            up
        } else {
            previous.iter().sum::<f64>() / previous.len() as f64
        }
    }
}

impl SignalModel for MomentumModel {
    fn predict(&self, features: &[f64], history: &BoundedHistory<MarketSnapshot>) -> ModelOutput {
        let Some(&up) = features.get(UP_FEATURE) else {
            return ModelOutput {
                signal: Signal::Hold,
                confidence: 0.0,
            };
        };

        let deltas = features.get(FIRST_DELTA_FEATURE..).unwrap_or(&[]);
        let mean_delta = if deltas.is_empty() {
            0.0
        } else {
            deltas.iter().sum::<f64>() / deltas.len() as f64
        };

        let score = (up - self.baseline(up, history)) + mean_delta;
        let signal = if score > 0.0 {
            Signal::Up
        } else if score < 0.0 {
            Signal::Down
        } else {
            Signal::Hold
        };
        let confidence = (0.5 + score.abs() * self.sensitivity).clamp(0.0, 1.0);

        ModelOutput {
            signal,
            confidence: if confidence.is_finite() { confidence } else { 0.0 },
        }
    }

    fn model_name(&self) -> &'static str {
        "momentum"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit;

    fn history(ups: &[f64]) -> BoundedHistory<MarketSnapshot> {
        let mut history = BoundedHistory::try_new(50).unwrap();
        for &up in ups {
            history.push(testkit::domain::snapshot(up));
        }
        history
    }

    #[test]
    fn rising_odds_lean_up() {
        let history = history(&[0.45, 0.45, 0.55]);
        let latest = history.last().unwrap().features();
        let output = MomentumModel::new(20, 5.0).predict(&latest, &history);
        assert_eq!(output.signal, Signal::Up);
        assert!((output.confidence - 1.0).abs() < 1e-9);
    }

    #[test]
    fn falling_odds_and_assets_lean_down() {
        let mut history = history(&[0.5, 0.5]);
        let latest = testkit::domain::snapshot_with_deltas(0.49, &[("BTC", 27_000.0, -0.01)]);
        history.push(latest.clone());
        let output = MomentumModel::new(20, 5.0).predict(&latest.features(), &history);
        assert_eq!(output.signal, Signal::Down);
        // score = -0.01 - 0.01
        assert!((output.confidence - 0.6).abs() < 1e-9);
    }

    #[test]
    fn flat_market_holds() {
        let history = history(&[0.5, 0.5, 0.5]);
        let latest = history.last().unwrap().features();
        let output = MomentumModel::new(20, 5.0).predict(&latest, &history);
        assert_eq!(output.signal, Signal::Hold);
        assert!((output.confidence - 0.5).abs() < 1e-9);
    }

    #[test]
    fn window_limits_the_baseline() {
        // Only the 0.6 right before the latest counts with a window of 1.
        let history = history(&[0.2, 0.6, 0.5]);
        let latest = history.last().unwrap().features();
        let output = MomentumModel::new(1, 1.0).predict(&latest, &history);
        assert_eq!(output.signal, Signal::Down);
    }

    #[test]
    fn empty_features_hold() {
        let output = MomentumModel::new(5, 5.0).predict(&[], &history(&[]));
        assert_eq!(output.signal, Signal::Hold);
    }
}
