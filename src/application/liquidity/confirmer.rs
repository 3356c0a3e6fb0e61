//! Liquidity confirmation of directional signals.
//!
//! A synchronous filter: the only state it keeps is a bounded history of
//! the liquidity samples it has seen, for observability.

use parking_lot::Mutex;
use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::history::BoundedHistory;
use crate::domain::signal::Signal;
use crate::domain::snapshot::LiquiditySnapshot;

/// Floor applied to the ask when computing the bid/ask ratio.
const MIN_ASK: f64 = 0.0001;

/// Liquidity filter settings.
#[derive(Debug, Clone)]
pub struct LiquiditySettings {
    /// Widest acceptable absolute spread.
    pub max_spread: f64,
    /// Lowest acceptable `min(bid, ask) / max(bid, ask)`.
    pub min_liquidity_score: f64,
    /// UP requires `bid / ask` at or above this.
    pub min_bid_ask_ratio: f64,
    /// DOWN requires `bid / ask` at or below this.
    pub max_bid_ask_ratio: f64,
    /// Liquidity samples retained for observability.
    pub history_capacity: usize,
}

impl Default for LiquiditySettings {
    fn default() -> Self {
        Self {
            max_spread: 0.05,
            min_liquidity_score: 0.9,
            min_bid_ask_ratio: 0.95,
            max_bid_ask_ratio: 1.05,
            history_capacity: 500,
        }
    }
}

/// Downgrades signals to HOLD when the book cannot support them.
pub struct LiquidityConfirmer {
    settings: LiquiditySettings,
    history: Mutex<BoundedHistory<LiquiditySnapshot>>,
}

impl LiquidityConfirmer {
    /// Create a confirmer.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ZeroCapacity`] if the history capacity is zero.
    pub fn new(settings: LiquiditySettings) -> Result<Self, DomainError> {
        let history = BoundedHistory::try_new(settings.history_capacity)?;
        Ok(Self {
            settings,
            history: Mutex::new(history),
        })
    }

    /// Confirm or downgrade `signal` against `snapshot`.
    pub fn confirm(&self, signal: Signal, snapshot: &LiquiditySnapshot) -> Signal {
        self.history.lock().push(snapshot.clone());

        if signal == Signal::Hold {
            return Signal::Hold;
        }

        if !self.is_liquid(snapshot) {
            debug!(
                signal = %signal,
                spread = snapshot.spread(),
                liquidity_score = snapshot.liquidity_score(),
                "Illiquid book, holding"
            );
            return Signal::Hold;
        }

        let ratio = snapshot.bid() / snapshot.ask().max(MIN_ASK);
        let confirmed = match signal {
            Signal::Up if ratio < self.settings.min_bid_ask_ratio => Signal::Hold,
            Signal::Down if ratio > self.settings.max_bid_ask_ratio => Signal::Hold,
            other => other,
        };

        if confirmed != signal {
            debug!(signal = %signal, bid_ask_ratio = ratio, "Book imbalance against signal, holding");
        }
        confirmed
    }

    /// Spread and liquidity score are both within limits.
    #[must_use]
    pub fn is_liquid(&self, snapshot: &LiquiditySnapshot) -> bool {
        snapshot.spread() <= self.settings.max_spread
            && snapshot.liquidity_score() >= self.settings.min_liquidity_score
    }

    /// The newest `n` samples, oldest first.
    #[must_use]
    pub fn recent(&self, n: usize) -> Vec<LiquiditySnapshot> {
        self.history.lock().recent(n).cloned().collect()
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.lock().len()
    }
}
