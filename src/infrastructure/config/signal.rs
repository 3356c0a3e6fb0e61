//! Signal generation configuration.

use serde::Deserialize;

use crate::application::signal::generator::SignalSettings;
use crate::domain::signal::Signal;

/// Signal generator and model configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SignalConfig {
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    /// Observations before the model is consulted.
    #[serde(default = "default_min_history")]
    pub min_history: usize,
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,
    #[serde(default = "default_signal")]
    pub default_signal: Signal,
    #[serde(default = "default_confidence")]
    pub default_confidence: f64,
    /// Weight per feature position; positions past the end weigh 1.0.
    /// Empty leaves confidence unweighted.
    #[serde(default)]
    pub feature_weights: Vec<f64>,
    /// Snapshots the momentum model averages over.
    #[serde(default = "default_momentum_window")]
    pub momentum_window: usize,
    /// Confidence gained per unit of momentum score.
    #[serde(default = "default_momentum_sensitivity")]
    pub momentum_sensitivity: f64,
}

const fn default_history_capacity() -> usize {
    500
}

const fn default_min_history() -> usize {
    10
}

const fn default_confidence_threshold() -> f64 {
    0.6
}

const fn default_signal() -> Signal {
    Signal::Up
}

const fn default_confidence() -> f64 {
    0.7
}

const fn default_momentum_window() -> usize {
    20
}

const fn default_momentum_sensitivity() -> f64 {
    5.0
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
            min_history: default_min_history(),
            confidence_threshold: default_confidence_threshold(),
            default_signal: default_signal(),
            default_confidence: default_confidence(),
            feature_weights: Vec::new(),
            momentum_window: default_momentum_window(),
            momentum_sensitivity: default_momentum_sensitivity(),
        }
    }
}

impl From<SignalConfig> for SignalSettings {
    fn from(config: SignalConfig) -> Self {
        Self {
            history_capacity: config.history_capacity,
            min_history: config.min_history,
            confidence_threshold: config.confidence_threshold,
            default_signal: config.default_signal,
            default_confidence: config.default_confidence,
            feature_weights: config.feature_weights.into_iter().enumerate().collect(),
        }
    }
}
