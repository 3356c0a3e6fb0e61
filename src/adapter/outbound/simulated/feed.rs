//! Simulated market feed.
//!
//! Draws reference odds and asset prices uniformly from configured ranges.
//! Deltas are the fractional change against the previous draw.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::Rng;

use super::rng::round_to;
use crate::domain::id::AssetId;
use crate::domain::snapshot::{MarketSnapshot, ReferenceOdds};
use crate::error::{DataError, Result};
use crate::port::outbound::clock::Clock;
use crate::port::outbound::feed::MarketFeed;

/// Inclusive uniform draw range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn sample(self, rng: &mut StdRng) -> f64 {
        if self.max <= self.min {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }
}

struct FeedState {
    rng: StdRng,
    last_prices: BTreeMap<AssetId, f64>,
}

/// Market feed producing uniformly random snapshots.
pub struct SimulatedMarketFeed {
    odds: PriceRange,
    assets: Vec<(AssetId, PriceRange)>,
    state: Mutex<FeedState>,
    clock: Arc<dyn Clock>,
}

impl SimulatedMarketFeed {
    #[must_use]
    pub fn new(
        odds: PriceRange,
        assets: Vec<(AssetId, PriceRange)>,
        rng: StdRng,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            odds,
            assets,
            state: Mutex::new(FeedState {
                rng,
                last_prices: BTreeMap::new(),
            }),
            clock,
        }
    }

    fn draw(&self) -> Result<MarketSnapshot> {
        let mut state = self.state.lock();
        let up = round_to(self.odds.sample(&mut state.rng), 3);

        let mut prices = BTreeMap::new();
        let mut deltas = BTreeMap::new();
        for (asset, range) in &self.assets {
            let price = round_to(range.sample(&mut state.rng), 2);
            let delta = match state.last_prices.get(asset) {
                Some(&last) if last > 0.0 => (price - last) / last,
                _ => 0.0,
            };
            state.last_prices.insert(asset.clone(), price);
            prices.insert(asset.clone(), price);
            deltas.insert(asset.clone(), delta);
        }
        drop(state);

        let odds = ReferenceOdds::try_new(up)
            .map_err(|e| DataError::InvalidSnapshot(e.to_string()))?;
        MarketSnapshot::try_new(odds, prices, deltas, self.clock.now())
            .map_err(|e| DataError::InvalidSnapshot(e.to_string()).into())
    }
}

#[async_trait]
impl MarketFeed for SimulatedMarketFeed {
    async fn fetch_snapshot(&self) -> Result<MarketSnapshot> {
        self.draw()
    }

    fn feed_name(&self) -> &'static str {
        "simulated"
    }
}
