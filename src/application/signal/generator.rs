//! Signal generation service.
//!
//! Wraps a pluggable [`SignalModel`] with the bookkeeping around it: a
//! bounded snapshot history, a cold-start fallback, feature weighting of
//! confidence and the HOLD threshold.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::history::BoundedHistory;
use crate::domain::signal::{Signal, SignalDecision};
use crate::domain::snapshot::MarketSnapshot;
use crate::port::outbound::model::SignalModel;

/// Signal generator settings.
#[derive(Debug, Clone)]
pub struct SignalSettings {
    /// Snapshots retained as model context.
    pub history_capacity: usize,
    /// Observations required before the model is consulted.
    pub min_history: usize,
    /// Weighted confidence at or below this forces HOLD.
    pub confidence_threshold: f64,
    /// Signal returned during cold start.
    pub default_signal: Signal,
    /// Confidence returned during cold start.
    pub default_confidence: f64,
    /// Per-feature weights keyed by feature index. Empty means uniform.
    pub feature_weights: BTreeMap<usize, f64>,
}

impl Default for SignalSettings {
    fn default() -> Self {
        Self {
            history_capacity: 500,
            min_history: 10,
            confidence_threshold: 0.6,
            default_signal: Signal::Up,
            default_confidence: 0.7,
            feature_weights: BTreeMap::new(),
        }
    }
}

/// Maps snapshots to directional signals with a confidence score.
pub struct SignalGenerator {
    model: Arc<dyn SignalModel>,
    settings: SignalSettings,
    history: Mutex<BoundedHistory<MarketSnapshot>>,
}

impl SignalGenerator {
    /// Create a generator around `model`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ZeroCapacity`] if the history capacity is zero.
    pub fn new(model: Arc<dyn SignalModel>, settings: SignalSettings) -> Result<Self, DomainError> {
        let history = BoundedHistory::try_new(settings.history_capacity)?;
        Ok(Self {
            model,
            settings,
            history: Mutex::new(history),
        })
    }

    /// Produce this cycle's decision for `snapshot`.
    ///
    /// Never fails: during cold start the configured default is returned
    /// without consulting the model.
    pub fn predict(&self, snapshot: &MarketSnapshot) -> SignalDecision {
        let mut history = self.history.lock();
        history.push(snapshot.clone());

        let features = snapshot.features();
        let raw = if history.len() < self.settings.min_history {
            debug!(
                observations = history.len(),
                required = self.settings.min_history,
                "Cold start, using default signal"
            );
            SignalDecision::new(self.settings.default_signal, self.settings.default_confidence)
        } else {
            let output = self.model.predict(&features, &history);
            SignalDecision::new(output.signal, output.confidence)
        };
        drop(history);

        let weighted = raw.confidence * self.feature_weight(&features);
        let decision = if weighted.is_finite() && weighted > self.settings.confidence_threshold {
            SignalDecision::new(raw.signal, weighted)
        } else {
            SignalDecision::hold(weighted)
        };

        debug!(
            model = self.model.model_name(),
            raw_signal = %raw.signal,
            raw_confidence = raw.confidence,
            signal = %decision.signal,
            confidence = decision.confidence,
            "Signal generated"
        );
        decision
    }

    /// Number of snapshots currently held as context.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.lock().len()
    }

    #[must_use]
    pub const fn settings(&self) -> &SignalSettings {
        &self.settings
    }

    /// Confidence multiplier from the feature weighting table.
    ///
    /// Uniform (empty table) is a no-op; otherwise the weighted mean of the
    /// features, with unlisted features weighted 1.0.
    fn feature_weight(&self, features: &[f64]) -> f64 {
        if self.settings.feature_weights.is_empty() || features.is_empty() {
            return 1.0;
        }
        let weighted: f64 = features
            .iter()
            .enumerate()
            .map(|(i, f)| f * self.settings.feature_weights.get(&i).copied().unwrap_or(1.0))
            .sum();
        weighted / features.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit;
    use crate::testkit::model::FixedModel;

    fn model(signal: Signal, confidence: f64) -> Arc<FixedModel> {
        Arc::new(FixedModel::new(signal, confidence))
    }

    fn settings(min_history: usize) -> SignalSettings {
        SignalSettings {
            min_history,
            ..Default::default()
        }
    }

    #[test]
    fn cold_start_returns_default_without_model() {
        let model = model(Signal::Down, 0.95);
        let generator = SignalGenerator::new(model.clone(), settings(10)).unwrap();

        for _ in 0..9 {
            let decision = generator.predict(&testkit::domain::snapshot(0.5));
            assert_eq!(decision.signal, Signal::Up);
            assert!((decision.confidence - 0.7).abs() < 1e-12);
        }
        assert_eq!(model.calls(), 0);

        let decision = generator.predict(&testkit::domain::snapshot(0.5));
        assert_eq!(decision.signal, Signal::Down);
        assert_eq!(model.calls(), 1);
    }

    #[test]
    fn low_confidence_forces_hold() {
        let generator = SignalGenerator::new(model(Signal::Up, 0.6), settings(1)).unwrap();
        let decision = generator.predict(&testkit::domain::snapshot(0.5));
        assert_eq!(decision.signal, Signal::Hold);
        assert!((decision.confidence - 0.6).abs() < 1e-12);

        let generator = SignalGenerator::new(model(Signal::Up, 0.61), settings(1)).unwrap();
        assert_eq!(generator.predict(&testkit::domain::snapshot(0.5)).signal, Signal::Up);
    }

    #[test]
    fn feature_weights_scale_confidence() {
        // features = [0.5, 0.5] with no assets; weights 2.0 and 1.0 -> (1.0 + 0.5) / 2 = 0.75
        let mut weights = BTreeMap::new();
        weights.insert(0, 2.0);
        let settings = SignalSettings {
            min_history: 1,
            feature_weights: weights,
            ..Default::default()
        };
        let generator = SignalGenerator::new(model(Signal::Down, 0.9), settings).unwrap();

        let snapshot = testkit::domain::snapshot_with_assets(0.5, &[]);
        let decision = generator.predict(&snapshot);
        assert_eq!(decision.signal, Signal::Down);
        assert!((decision.confidence - 0.675).abs() < 1e-12);
    }

    #[test]
    fn history_is_bounded() {
        let settings = SignalSettings {
            history_capacity: 5,
            min_history: 1,
            ..Default::default()
        };
        let generator = SignalGenerator::new(model(Signal::Up, 0.9), settings).unwrap();
        for _ in 0..20 {
            generator.predict(&testkit::domain::snapshot(0.55));
        }
        assert_eq!(generator.history_len(), 5);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let settings = SignalSettings {
            history_capacity: 0,
            ..Default::default()
        };
        assert!(SignalGenerator::new(model(Signal::Up, 0.9), settings).is_err());
    }
}
