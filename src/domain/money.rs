//! Monetary amounts.
//!
//! Balances, stakes and P/L are `Decimal` so that bookkeeping never drifts.
//! Market data (prices, odds, confidence) stays `f64`.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Monetary amount represented as a Decimal for precision.
pub type Amount = Decimal;

/// Round an amount to `dp` decimal places, half away from zero.
#[must_use]
pub fn round_amount(value: Amount, dp: u32) -> Amount {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert an `f64` into an amount. Non-finite input maps to zero.
#[must_use]
pub fn amount_from_f64(value: f64) -> Amount {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// Lossy conversion for statistics and display.
#[must_use]
pub fn amount_to_f64(value: Amount) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_amount(dec!(0.0000005), 6), dec!(0.000001));
        assert_eq!(round_amount(dec!(-0.0000005), 6), dec!(-0.000001));
        assert_eq!(round_amount(dec!(0.0855), 6), dec!(0.0855));
    }

    #[test]
    fn non_finite_floats_become_zero() {
        assert_eq!(amount_from_f64(f64::NAN), Decimal::ZERO);
        assert_eq!(amount_from_f64(f64::INFINITY), Decimal::ZERO);
        assert_eq!(amount_from_f64(0.5), dec!(0.5));
    }
}
