//! Portfolio bookkeeping state and the risk-state machine labels.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::Amount;

/// Trading gate state derived from the portfolio.
///
/// ```text
/// ACTIVE ──max loss streak──▶ COOLDOWN ──interval elapsed / resume──▶ ACTIVE
///   │                            │
///   └──daily drawdown breach─────┴──▶ DAILY_HALTED ──next UTC day──▶ ACTIVE
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskState {
    Active,
    Cooldown,
    DailyHalted,
}

impl RiskState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Cooldown => "cooldown",
            Self::DailyHalted => "daily_halted",
        }
    }

    #[must_use]
    pub const fn allows_trading(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for RiskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable portfolio aggregate, exclusively owned by the risk manager.
///
/// Balance is never clamped: pathological P/L may drive it negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioState {
    pub balance: Amount,
    pub starting_balance: Amount,
    pub daily_start_balance: Amount,
    pub consecutive_losses: u32,
    pub last_trade_time: Option<DateTime<Utc>>,
    pub trading_paused: bool,
    /// End of the active loss-streak cooldown, if any.
    pub cooldown_until: Option<DateTime<Utc>>,
    pub last_reset_day: NaiveDate,
}

impl PortfolioState {
    /// Fresh portfolio funded with `balance` on `today`.
    #[must_use]
    pub const fn new(balance: Amount, today: NaiveDate) -> Self {
        Self {
            balance,
            starting_balance: balance,
            daily_start_balance: balance,
            consecutive_losses: 0,
            last_trade_time: None,
            trading_paused: false,
            cooldown_until: None,
            last_reset_day: today,
        }
    }

    /// Profit or loss since the portfolio was funded.
    #[must_use]
    pub fn pnl(&self) -> Amount {
        self.balance - self.starting_balance
    }

    /// Fraction of the day's opening balance lost so far.
    ///
    /// `None` when the day opened with a non-positive balance.
    #[must_use]
    pub fn daily_drawdown(&self) -> Option<Amount> {
        if self.daily_start_balance <= Decimal::ZERO {
            return None;
        }
        Some((self.daily_start_balance - self.balance) / self.daily_start_balance)
    }
}
