//! Risk management service.
//!
//! Owns the portfolio and gates every trade: stake sizing, take-profit and
//! stop-loss bands, the loss-streak cooldown and the daily drawdown halt.
//!
//! All portfolio mutation happens under a single lock, so one manager can be
//! shared by several decision loops.

use std::sync::Arc;

use chrono::Duration;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, info, warn};

use crate::domain::money::{amount_from_f64, round_amount, Amount};
use crate::domain::portfolio::{PortfolioState, RiskState};
use crate::domain::signal::Signal;
use crate::domain::trade::TradeIntent;
use crate::port::outbound::clock::Clock;

/// Decimal places for take-profit and stop-loss fractions.
const TP_SL_PRECISION: u32 = 4;

/// Risk parameters for a portfolio.
#[derive(Debug, Clone)]
pub struct RiskLimits {
    pub starting_balance: Decimal,
    /// Fraction of the balance that is never put at risk.
    pub insurance_fraction: Decimal,
    /// Largest fraction of the insured balance staked on one trade.
    pub max_stake_fraction: Decimal,
    /// Lowest confidence used for sizing.
    pub confidence_floor: f64,
    /// Losses in a row that start a cooldown.
    pub max_consecutive_losses: u32,
    pub cooldown_secs: u32,
    /// Daily drawdown fraction that halts trading until the next UTC day.
    pub daily_loss_limit: Decimal,
    /// Take-profit fraction of stake before confidence banding.
    pub base_take_profit: Decimal,
    /// Stop-loss fraction of stake before confidence banding.
    pub base_stop_loss: Decimal,
    /// Decimal places for stakes and absolute bounds.
    pub stake_precision: u32,
}

impl Default for RiskLimits {
    fn default() -> Self {
        Self {
            starting_balance: dec!(1.0),
            insurance_fraction: dec!(0.05),
            max_stake_fraction: dec!(0.10),
            confidence_floor: 0.3,
            max_consecutive_losses: 3,
            cooldown_secs: 300,
            daily_loss_limit: dec!(0.15),
            base_take_profit: dec!(0.05),
            base_stop_loss: dec!(0.03),
            stake_precision: 6,
        }
    }
}

/// Risk manager that sizes trades and tracks the portfolio they affect.
pub struct RiskManager {
    limits: RiskLimits,
    state: Mutex<PortfolioState>,
    clock: Arc<dyn Clock>,
}

impl RiskManager {
    /// Create a manager with a fresh portfolio funded at
    /// `limits.starting_balance`.
    pub fn new(limits: RiskLimits, clock: Arc<dyn Clock>) -> Self {
        let state = PortfolioState::new(limits.starting_balance, clock.today());
        Self {
            limits,
            state: Mutex::new(state),
            clock,
        }
    }

    #[must_use]
    pub const fn limits(&self) -> &RiskLimits {
        &self.limits
    }

    /// Whether a new trade may be placed right now.
    pub fn can_trade(&self) -> bool {
        let mut state = self.state.lock();
        let risk_state = self.refresh(&mut state);
        if !risk_state.allows_trading() {
            debug!(state = %risk_state, balance = %state.balance, "Trading gated");
        }
        risk_state.allows_trading()
    }

    /// Current gate state.
    pub fn risk_state(&self) -> RiskState {
        let mut state = self.state.lock();
        self.refresh(&mut state)
    }

    /// Stake for a trade at `confidence`, bounded by the insured balance.
    ///
    /// Non-finite confidence is sized at the floor.
    pub fn calculate_stake(&self, confidence: f64) -> Amount {
        let balance = self.state.lock().balance;
        self.stake_for(balance, confidence)
    }

    /// Take-profit and stop-loss as fractions of stake, banded by confidence.
    #[must_use]
    pub fn calculate_tp_sl(&self, confidence: f64) -> (Decimal, Decimal) {
        let (tp_mult, sl_mult) = if confidence > 0.8 {
            (dec!(1.2), dec!(0.8))
        } else if confidence < 0.5 {
            (dec!(0.7), dec!(1.3))
        } else {
            (Decimal::ONE, Decimal::ONE)
        };
        (
            round_amount(self.limits.base_take_profit * tp_mult, TP_SL_PRECISION),
            round_amount(self.limits.base_stop_loss * sl_mult, TP_SL_PRECISION),
        )
    }

    /// Build a sized intent for `signal`. HOLD yields a zero-stake intent.
    pub fn size(&self, signal: Signal, confidence: f64) -> TradeIntent {
        if !signal.is_directional() {
            return TradeIntent::hold(confidence);
        }

        let stake = self.calculate_stake(confidence);
        let (tp, sl) = self.calculate_tp_sl(confidence);
        let precision = self.limits.stake_precision;

        TradeIntent {
            signal,
            stake,
            take_profit: round_amount(stake * tp, precision),
            stop_loss: round_amount(stake * sl, precision),
            confidence,
        }
    }

    /// Fold a realised P/L into the portfolio.
    pub fn apply_trade_result(&self, profit_loss: Amount) {
        let now = self.clock.now();
        let mut state = self.state.lock();
        self.roll_over(&mut state);

        state.balance += profit_loss;
        state.last_trade_time = Some(now);
        if profit_loss < Decimal::ZERO {
            state.consecutive_losses += 1;
        } else {
            state.consecutive_losses = 0;
        }

        info!(
            profit_loss = %profit_loss,
            balance = %state.balance,
            consecutive_losses = state.consecutive_losses,
            "Trade result applied"
        );

        if state.consecutive_losses >= self.limits.max_consecutive_losses
            && state.cooldown_until.is_none()
        {
            let until = now + Duration::seconds(i64::from(self.limits.cooldown_secs));
            state.cooldown_until = Some(until);
            state.trading_paused = true;
            warn!(
                consecutive_losses = state.consecutive_losses,
                cooldown_until = %until,
                "Loss streak limit reached, cooling down"
            );
        }

        if self.daily_limit_breached(&state) {
            warn!(
                balance = %state.balance,
                daily_start_balance = %state.daily_start_balance,
                limit = %self.limits.daily_loss_limit,
                "Daily loss limit reached, halting until next UTC day"
            );
        }
    }

    /// End an active cooldown early. Returns whether one was active.
    ///
    /// Has no effect on a daily halt.
    pub fn resume_trading(&self) -> bool {
        let mut state = self.state.lock();
        if state.cooldown_until.is_none() {
            return false;
        }
        state.cooldown_until = None;
        state.trading_paused = false;
        state.consecutive_losses = 0;
        info!(balance = %state.balance, "Trading resumed by operator");
        true
    }

    /// Snapshot of the portfolio after applying any pending rollover.
    pub fn get_status(&self) -> PortfolioState {
        let mut state = self.state.lock();
        self.refresh(&mut state);
        state.clone()
    }

    fn stake_for(&self, balance: Amount, confidence: f64) -> Amount {
        let floor = self.limits.confidence_floor;
        let confidence = if confidence.is_finite() {
            confidence.clamp(floor, 1.0)
        } else {
            floor
        };

        let insured = balance * (Decimal::ONE - self.limits.insurance_fraction);
        let raw = insured * self.limits.max_stake_fraction * amount_from_f64(confidence);
        let cap = insured.max(Decimal::ZERO);

        round_amount(raw.clamp(Decimal::ZERO, cap), self.limits.stake_precision)
    }

    /// Apply rollover and cooldown expiry, then derive the gate state.
    fn refresh(&self, state: &mut PortfolioState) -> RiskState {
        self.roll_over(state);

        if let Some(until) = state.cooldown_until {
            if self.clock.now() >= until {
                state.cooldown_until = None;
                state.trading_paused = false;
                state.consecutive_losses = 0;
                info!(balance = %state.balance, "Cooldown elapsed, trading resumed");
            }
        }

        if self.daily_limit_breached(state) {
            RiskState::DailyHalted
        } else if state.cooldown_until.is_some() {
            RiskState::Cooldown
        } else {
            RiskState::Active
        }
    }

    fn roll_over(&self, state: &mut PortfolioState) {
        let today = self.clock.today();
        if today == state.last_reset_day {
            return;
        }
        state.daily_start_balance = state.balance;
        state.consecutive_losses = 0;
        state.cooldown_until = None;
        state.trading_paused = false;
        state.last_reset_day = today;
        info!(day = %today, balance = %state.balance, "Daily risk counters reset");
    }

    fn daily_limit_breached(&self, state: &PortfolioState) -> bool {
        state
            .daily_drawdown()
            .map_or(true, |drawdown| drawdown >= self.limits.daily_loss_limit)
    }
}
