//! Predictive model port.

use crate::domain::history::BoundedHistory;
use crate::domain::signal::Signal;
use crate::domain::snapshot::MarketSnapshot;

/// Raw model output before confidence weighting and thresholding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelOutput {
    pub signal: Signal,
    pub confidence: f64,
}

/// Black-box signal source.
///
/// Receives the feature vector of the latest snapshot and the rolling
/// snapshot history (oldest first, latest included) as context.
pub trait SignalModel: Send + Sync {
    fn predict(&self, features: &[f64], history: &BoundedHistory<MarketSnapshot>) -> ModelOutput;

    /// Model name for logging/debugging.
    fn model_name(&self) -> &'static str;
}
