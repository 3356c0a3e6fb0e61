//! Scripted [`MarketFeed`] and [`LiquidityFeed`] implementations.
//!
//! Each fetch pops the next scripted result. Once the script is exhausted the
//! feed keeps returning its fallback value, so loops can run indefinitely.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::domain;
use crate::domain::snapshot::{LiquiditySnapshot, MarketSnapshot};
use crate::error::{DataError, Result};
use crate::port::outbound::feed::{LiquidityFeed, MarketFeed};

// ---------------------------------------------------------------------------
// ScriptedMarketFeed
// ---------------------------------------------------------------------------

/// Market feed with a queue of scripted snapshots or failures.
pub struct ScriptedMarketFeed {
    script: Mutex<VecDeque<Result<MarketSnapshot>>>,
    fallback: MarketSnapshot,
    fetch_count: Arc<AtomicU32>,
}

impl ScriptedMarketFeed {
    /// Feed that always returns `snapshot`.
    pub fn repeating(snapshot: MarketSnapshot) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: snapshot,
            fetch_count: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn with_results(self, results: Vec<Result<MarketSnapshot>>) -> Self {
        *self.script.lock() = results.into();
        self
    }

    /// Queue a transient feed failure.
    pub fn push_failure(&self, reason: &str) {
        self.script
            .lock()
            .push_back(Err(DataError::FeedUnavailable(reason.to_string()).into()));
    }

    pub fn fetch_count(&self) -> u32 {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

impl Default for ScriptedMarketFeed {
    fn default() -> Self {
        Self::repeating(domain::snapshot(0.5))
    }
}

#[async_trait]
impl MarketFeed for ScriptedMarketFeed {
    async fn fetch_snapshot(&self) -> Result<MarketSnapshot> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(self.fallback.clone()))
    }

    fn feed_name(&self) -> &'static str {
        "scripted"
    }
}

// ---------------------------------------------------------------------------
// ScriptedLiquidityFeed
// ---------------------------------------------------------------------------

/// Liquidity feed with a queue of scripted books.
pub struct ScriptedLiquidityFeed {
    script: Mutex<VecDeque<Result<LiquiditySnapshot>>>,
    fallback: LiquiditySnapshot,
}

impl ScriptedLiquidityFeed {
    /// Feed that always returns `book`.
    pub fn repeating(book: LiquiditySnapshot) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: book,
        }
    }

    pub fn with_results(self, results: Vec<Result<LiquiditySnapshot>>) -> Self {
        *self.script.lock() = results.into();
        self
    }
}

impl Default for ScriptedLiquidityFeed {
    fn default() -> Self {
        Self::repeating(domain::balanced_book())
    }
}

#[async_trait]
impl LiquidityFeed for ScriptedLiquidityFeed {
    async fn fetch_liquidity(&self) -> Result<LiquiditySnapshot> {
        self.script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}
