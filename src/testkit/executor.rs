//! Scripted [`TradeExecutor`] that records every intent it receives.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::domain::money::Amount;
use crate::domain::trade::TradeIntent;
use crate::error::ExecutionError;
use crate::port::outbound::execution::TradeExecutor;

/// Executor that returns scripted outcomes.
///
/// Once the script is exhausted every execution returns the fallback P/L
/// (zero by default).
pub struct ScriptedExecutor {
    script: Mutex<VecDeque<Result<Amount, ExecutionError>>>,
    fallback: Amount,
    delay: Option<Duration>,
    executed: Mutex<Vec<TradeIntent>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Decimal::ZERO,
            delay: None,
            executed: Mutex::new(Vec::new()),
        }
    }

    pub fn with_results(self, results: Vec<Result<Amount, ExecutionError>>) -> Self {
        *self.script.lock() = results.into();
        self
    }

    /// Every execution after the script returns `pnl`.
    pub fn with_fallback(mut self, pnl: Amount) -> Self {
        self.fallback = pnl;
        self
    }

    /// Every execution takes `delay` before answering. The intent is
    /// recorded as soon as execution starts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Intents seen so far, in order.
    pub fn executed(&self) -> Vec<TradeIntent> {
        self.executed.lock().clone()
    }

    pub fn execution_count(&self) -> usize {
        self.executed.lock().len()
    }
}

impl Default for ScriptedExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TradeExecutor for ScriptedExecutor {
    async fn execute(&self, intent: &TradeIntent) -> Result<Amount, ExecutionError> {
        self.executed.lock().push(intent.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.script.lock().pop_front().unwrap_or(Ok(self.fallback))
    }

    fn executor_name(&self) -> &'static str {
        "scripted"
    }
}
