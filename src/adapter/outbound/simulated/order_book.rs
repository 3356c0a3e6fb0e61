//! Simulated order book for the reference market.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::Rng;

use super::feed::PriceRange;
use super::rng::round_to;
use crate::domain::snapshot::LiquiditySnapshot;
use crate::error::{DataError, Result};
use crate::port::outbound::clock::Clock;
use crate::port::outbound::feed::LiquidityFeed;

/// Liquidity feed drawing best bid and ask independently from one range.
pub struct SimulatedOrderBook {
    market: String,
    range: PriceRange,
    rng: Mutex<StdRng>,
    clock: Arc<dyn Clock>,
}

impl SimulatedOrderBook {
    #[must_use]
    pub fn new(market: impl Into<String>, range: PriceRange, rng: StdRng, clock: Arc<dyn Clock>) -> Self {
        Self {
            market: market.into(),
            range,
            rng: Mutex::new(rng),
            clock,
        }
    }

    fn draw(&self) -> (f64, f64) {
        let mut rng = self.rng.lock();
        if self.range.max <= self.range.min {
            return (self.range.min, self.range.min);
        }
        let bid = rng.gen_range(self.range.min..=self.range.max);
        let ask = rng.gen_range(self.range.min..=self.range.max);
        (round_to(bid, 3), round_to(ask, 3))
    }
}

#[async_trait]
impl LiquidityFeed for SimulatedOrderBook {
    async fn fetch_liquidity(&self) -> Result<LiquiditySnapshot> {
        let (bid, ask) = self.draw();
        LiquiditySnapshot::try_new(self.market.clone(), bid, ask, self.clock.now())
            .map_err(|e| DataError::InvalidSnapshot(e.to_string()).into())
    }
}
