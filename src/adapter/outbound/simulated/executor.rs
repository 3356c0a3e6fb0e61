//! Simulated (paper) trade executor.
//!
//! Settles each trade as a win or a loss. The win probability follows the
//! intent's confidence within `[0.55, 0.75]`; a win pays a uniform fraction
//! of the take-profit bound and a loss costs a uniform fraction of the
//! stop-loss bound.

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::Rng;
use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::money::{amount_from_f64, round_amount, Amount};
use crate::domain::signal::Signal;
use crate::domain::trade::TradeIntent;
use crate::error::ExecutionError;
use crate::port::outbound::execution::TradeExecutor;

const MIN_WIN_PROBABILITY: f64 = 0.55;
const MAX_WIN_PROBABILITY: f64 = 0.75;

/// Decimal places of simulated P/L.
const PNL_PRECISION: u32 = 6;

/// Paper executor backed by a seedable RNG.
pub struct SimulatedExecutor {
    rng: Mutex<StdRng>,
}

impl SimulatedExecutor {
    #[must_use]
    pub fn new(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }
}

#[async_trait]
impl TradeExecutor for SimulatedExecutor {
    async fn execute(&self, intent: &TradeIntent) -> Result<Amount, ExecutionError> {
        if intent.signal == Signal::Hold {
            return Ok(Decimal::ZERO);
        }
        if intent.take_profit <= Decimal::ZERO || intent.stop_loss <= Decimal::ZERO {
            return Err(ExecutionError::InvalidIntent(format!(
                "take_profit and stop_loss must be positive (tp={}, sl={})",
                intent.take_profit, intent.stop_loss
            )));
        }

        let confidence = if intent.confidence.is_finite() {
            intent.confidence
        } else {
            MIN_WIN_PROBABILITY
        };
        let p_win = confidence.clamp(MIN_WIN_PROBABILITY, MAX_WIN_PROBABILITY);

        let (won, fraction) = {
            let mut rng = self.rng.lock();
            (rng.gen_bool(p_win), rng.gen_range(0.5..=1.0))
        };
        let fraction = amount_from_f64(fraction);

        let pnl = if won {
            intent.take_profit * fraction
        } else {
            -(intent.stop_loss * fraction)
        };
        let pnl = round_amount(pnl, PNL_PRECISION);

        debug!(signal = %intent.signal, won, profit_loss = %pnl, "Simulated fill");
        Ok(pnl)
    }

    fn executor_name(&self) -> &'static str {
        "simulated"
    }
}
