//! Random number source shared by the simulated adapters.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// A seeded RNG for reproducible runs, or one seeded from OS entropy.
#[must_use]
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
}

/// Round `value` to `dp` decimal places.
pub(crate) fn round_to(value: f64, dp: i32) -> f64 {
    let factor = 10f64.powi(dp);
    (value * factor).round() / factor
}
