//! Risk management configuration.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::application::risk::manager::RiskLimits;

/// Risk management configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RiskConfig {
    /// Funding of each portfolio.
    #[serde(default = "default_starting_balance")]
    pub starting_balance: Decimal,
    /// Fraction of the balance held back from staking (e.g., 0.05 = 5%).
    #[serde(default = "default_insurance_fraction")]
    pub insurance_fraction: Decimal,
    /// Largest fraction of the insured balance per trade.
    #[serde(default = "default_max_stake_fraction")]
    pub max_stake_fraction: Decimal,
    #[serde(default = "default_confidence_floor")]
    pub confidence_floor: f64,
    #[serde(default = "default_max_consecutive_losses")]
    pub max_consecutive_losses: u32,
    /// Cooldown after a loss streak (seconds, at most one day).
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u32,
    /// Daily drawdown fraction that halts trading.
    #[serde(default = "default_daily_loss_limit")]
    pub daily_loss_limit: Decimal,
    #[serde(default = "default_base_take_profit")]
    pub base_take_profit: Decimal,
    #[serde(default = "default_base_stop_loss")]
    pub base_stop_loss: Decimal,
    #[serde(default = "default_stake_precision")]
    pub stake_precision: u32,
}

fn default_starting_balance() -> Decimal {
    Decimal::ONE
}

fn default_insurance_fraction() -> Decimal {
    Decimal::new(5, 2) // 5%
}

fn default_max_stake_fraction() -> Decimal {
    Decimal::new(10, 2) // 10%
}

const fn default_confidence_floor() -> f64 {
    0.3
}

const fn default_max_consecutive_losses() -> u32 {
    3
}

const fn default_cooldown_secs() -> u32 {
    300
}

fn default_daily_loss_limit() -> Decimal {
    Decimal::new(15, 2) // 15%
}

fn default_base_take_profit() -> Decimal {
    Decimal::new(5, 2)
}

fn default_base_stop_loss() -> Decimal {
    Decimal::new(3, 2)
}

const fn default_stake_precision() -> u32 {
    6
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            starting_balance: default_starting_balance(),
            insurance_fraction: default_insurance_fraction(),
            max_stake_fraction: default_max_stake_fraction(),
            confidence_floor: default_confidence_floor(),
            max_consecutive_losses: default_max_consecutive_losses(),
            cooldown_secs: default_cooldown_secs(),
            daily_loss_limit: default_daily_loss_limit(),
            base_take_profit: default_base_take_profit(),
            base_stop_loss: default_base_stop_loss(),
            stake_precision: default_stake_precision(),
        }
    }
}

impl From<RiskConfig> for RiskLimits {
    fn from(config: RiskConfig) -> Self {
        Self {
            starting_balance: config.starting_balance,
            insurance_fraction: config.insurance_fraction,
            max_stake_fraction: config.max_stake_fraction,
            confidence_floor: config.confidence_floor,
            max_consecutive_losses: config.max_consecutive_losses,
            cooldown_secs: config.cooldown_secs,
            daily_loss_limit: config.daily_loss_limit,
            base_take_profit: config.base_take_profit,
            base_stop_loss: config.base_stop_loss,
            stake_precision: config.stake_precision,
        }
    }
}
