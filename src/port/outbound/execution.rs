//! Trade execution port.

use async_trait::async_trait;

use crate::domain::money::Amount;
use crate::domain::trade::TradeIntent;
use crate::error::ExecutionError;

/// Turns an approved intent into a realised profit or loss.
///
/// Implementations are either simulated or delegate to an external venue.
/// Persistence of the outcome is the caller's responsibility. A live venue
/// is expected to enforce its own request timeout.
#[async_trait]
pub trait TradeExecutor: Send + Sync {
    /// Execute the intent and return the signed P/L.
    async fn execute(&self, intent: &TradeIntent) -> Result<Amount, ExecutionError>;

    /// Executor name for logging/debugging.
    fn executor_name(&self) -> &'static str;
}
