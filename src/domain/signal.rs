//! Directional trading signals.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Directional trading intent for one decision cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    /// Expect the reference odds to rise.
    Up,
    /// Expect the reference odds to fall.
    Down,
    /// Stay flat this cycle.
    Hold,
}

impl Signal {
    /// Stable label used in logs and dashboard output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Hold => "HOLD",
        }
    }

    /// Returns true for `Up` and `Down`.
    #[must_use]
    pub const fn is_directional(self) -> bool {
        !matches!(self, Self::Hold)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A signal paired with the confidence it was produced with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalDecision {
    pub signal: Signal,
    /// Always within `[0, 1]`.
    pub confidence: f64,
}

impl SignalDecision {
    /// Build a decision, clamping confidence into `[0, 1]`.
    ///
    /// Non-finite confidence collapses to zero.
    #[must_use]
    pub fn new(signal: Signal, confidence: f64) -> Self {
        let confidence = if confidence.is_finite() {
            confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self { signal, confidence }
    }

    /// A `Hold` decision carrying the given confidence.
    #[must_use]
    pub fn hold(confidence: f64) -> Self {
        Self::new(Signal::Hold, confidence)
    }
}
