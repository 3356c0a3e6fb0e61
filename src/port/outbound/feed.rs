//! Market data ports.
//!
//! The decision loop treats both feeds as opaque snapshot sources; how the
//! numbers are produced is the adapter's business.

use async_trait::async_trait;

use crate::domain::snapshot::{LiquiditySnapshot, MarketSnapshot};
use crate::error::Result;

/// Source of reference-odds and asset-price snapshots.
#[async_trait]
pub trait MarketFeed: Send + Sync {
    /// Fetch the latest snapshot. May fail transiently.
    async fn fetch_snapshot(&self) -> Result<MarketSnapshot>;

    /// Feed name for logging/debugging.
    fn feed_name(&self) -> &'static str;
}

/// Source of order-book liquidity samples for the reference market.
#[async_trait]
pub trait LiquidityFeed: Send + Sync {
    /// Sample the current book. May fail transiently.
    async fn fetch_liquidity(&self) -> Result<LiquiditySnapshot>;
}
