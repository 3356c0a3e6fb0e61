//! Trade intent and trade result types.
//!
//! - [`TradeIntent`] - a sized, risk-approved order for one cycle
//! - [`TradeResult`] - the realised outcome, appended to analytics
//!
//! # Examples
//!
//! ```
//! use polypulse::domain::signal::Signal;
//! use polypulse::domain::trade::TradeIntent;
//! use rust_decimal_macros::dec;
//!
//! let hold = TradeIntent::hold(0.4);
//! assert_eq!(hold.stake, dec!(0));
//! assert!(!hold.is_executable());
//!
//! let intent = TradeIntent {
//!     signal: Signal::Up,
//!     stake: dec!(0.0855),
//!     take_profit: dec!(0.00513),
//!     stop_loss: dec!(0.002052),
//!     confidence: 0.9,
//! };
//! assert!(intent.is_executable());
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::money::Amount;
use super::signal::Signal;

/// A sized order ready for execution.
///
/// `take_profit` and `stop_loss` are absolute amounts bounding the outcome
/// magnitude, not percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeIntent {
    pub signal: Signal,
    pub stake: Amount,
    pub take_profit: Amount,
    pub stop_loss: Amount,
    pub confidence: f64,
}

impl TradeIntent {
    /// An intent that must never be executed.
    #[must_use]
    pub fn hold(confidence: f64) -> Self {
        Self {
            signal: Signal::Hold,
            stake: Decimal::ZERO,
            take_profit: Decimal::ZERO,
            stop_loss: Decimal::ZERO,
            confidence,
        }
    }

    /// Directional signal with a positive stake.
    #[must_use]
    pub fn is_executable(&self) -> bool {
        self.signal.is_directional() && self.stake > Decimal::ZERO
    }
}

/// The realised outcome of one executed trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeResult {
    pub id: Uuid,
    pub signal: Signal,
    pub stake: Amount,
    pub take_profit: Amount,
    pub stop_loss: Amount,
    /// Signed: negative on a loss.
    pub profit_loss: Amount,
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
}

impl TradeResult {
    /// Combine an executed intent with its realised P/L.
    #[must_use]
    pub fn from_intent(intent: &TradeIntent, profit_loss: Amount, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            signal: intent.signal,
            stake: intent.stake,
            take_profit: intent.take_profit,
            stop_loss: intent.stop_loss,
            profit_loss,
            confidence: intent.confidence,
            timestamp,
        }
    }

    #[must_use]
    pub fn is_win(&self) -> bool {
        self.profit_loss > Decimal::ZERO
    }
}
