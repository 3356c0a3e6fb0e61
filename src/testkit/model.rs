//! Deterministic [`SignalModel`] implementations.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::history::BoundedHistory;
use crate::domain::signal::Signal;
use crate::domain::snapshot::MarketSnapshot;
use crate::port::outbound::model::{ModelOutput, SignalModel};

/// Model that always returns the same output and counts its calls.
pub struct FixedModel {
    output: ModelOutput,
    calls: AtomicUsize,
}

impl FixedModel {
    pub fn new(signal: Signal, confidence: f64) -> Self {
        Self {
            output: ModelOutput { signal, confidence },
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SignalModel for FixedModel {
    fn predict(&self, _features: &[f64], _history: &BoundedHistory<MarketSnapshot>) -> ModelOutput {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.output
    }

    fn model_name(&self) -> &'static str {
        "fixed"
    }
}
