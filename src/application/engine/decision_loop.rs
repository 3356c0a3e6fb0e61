//! The decision loop.
//!
//! One loop drives one trading mode. Each cycle fetches a market snapshot,
//! derives and confirms a signal, sizes it against the portfolio, executes
//! it and folds the outcome back into risk and analytics state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rust_decimal::Decimal;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::application::analytics::recorder::AnalyticsRecorder;
use crate::application::liquidity::confirmer::LiquidityConfirmer;
use crate::application::risk::manager::RiskManager;
use crate::application::signal::generator::SignalGenerator;
use crate::domain::signal::Signal;
use crate::domain::trade::TradeResult;
use crate::error::{Error, ExecutionError, Result};
use crate::port::inbound::engine::TradingMode;
use crate::port::outbound::clock::Clock;
use crate::port::outbound::execution::TradeExecutor;
use crate::port::outbound::feed::{LiquidityFeed, MarketFeed};

/// Loop timing.
#[derive(Debug, Clone, Copy)]
pub struct LoopSettings {
    /// Pause after every completed cycle.
    pub interval: Duration,
    /// Pause after a cycle that failed.
    pub error_backoff: Duration,
}

/// Collaborators a loop drives.
///
/// `risk` and `analytics` may be shared with other loops.
#[derive(Clone)]
pub struct DecisionContext {
    pub market_feed: Arc<dyn MarketFeed>,
    pub liquidity_feed: Arc<dyn LiquidityFeed>,
    pub executor: Arc<dyn TradeExecutor>,
    pub signals: Arc<SignalGenerator>,
    pub liquidity: Arc<LiquidityConfirmer>,
    pub risk: Arc<RiskManager>,
    pub analytics: Arc<AnalyticsRecorder>,
    pub clock: Arc<dyn Clock>,
}

/// What one cycle did.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// A trade was executed and recorded.
    Traded(TradeResult),
    /// The signal was HOLD after generation or confirmation.
    Held,
    /// The risk manager refused to trade.
    Gated,
    /// Sizing produced no stake.
    NoStake,
    /// Execution failed; treated as zero P/L.
    ExecutionFailed(ExecutionError),
}

/// The spawned task and its stop signal.
///
/// Every spawn gets a fresh channel, so a stop aimed at one task never
/// reaches the next.
#[derive(Default)]
struct TaskSlot {
    stop: Option<watch::Sender<bool>>,
    handle: Option<JoinHandle<()>>,
}

/// A repeatedly running decision cycle for one trading mode.
pub struct DecisionLoop {
    mode: TradingMode,
    context: DecisionContext,
    settings: LoopSettings,
    running: AtomicBool,
    task: Mutex<TaskSlot>,
}

impl DecisionLoop {
    #[must_use]
    pub fn new(mode: TradingMode, context: DecisionContext, settings: LoopSettings) -> Self {
        Self {
            mode,
            context,
            settings,
            running: AtomicBool::new(false),
            task: Mutex::new(TaskSlot::default()),
        }
    }

    #[must_use]
    pub const fn mode(&self) -> TradingMode {
        self.mode
    }

    #[must_use]
    pub fn risk(&self) -> &Arc<RiskManager> {
        &self.context.risk
    }

    #[must_use]
    pub fn analytics(&self) -> &Arc<AnalyticsRecorder> {
        &self.context.analytics
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Spawn the loop task. Returns `false` if the loop was already running.
    ///
    /// A task that was stopped but is still finishing its cycle is awaited
    /// by the new task before the first cycle, so two cycles never overlap.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(self: &Arc<Self>) -> bool {
        let mut slot = self.task.lock();
        if self.running.swap(true, Ordering::SeqCst) {
            return false;
        }

        let previous = slot.handle.take();
        let (stop_tx, stop_rx) = watch::channel(false);
        let this = Arc::clone(self);
        slot.stop = Some(stop_tx);
        slot.handle = Some(tokio::spawn(async move {
            if let Some(previous) = previous {
                if let Err(e) = previous.await {
                    warn!(mode = %this.mode, error = %e, "Previous decision loop task failed");
                }
            }
            this.run(stop_rx).await;
        }));
        info!(mode = %self.mode, interval_ms = self.settings.interval.as_millis(), "Decision loop started");
        true
    }

    /// Ask the loop to exit at its next iteration boundary.
    pub fn stop(&self) {
        let slot = self.task.lock();
        if self.running.swap(false, Ordering::SeqCst) {
            info!(mode = %self.mode, "Decision loop stopping");
            if let Some(stop) = &slot.stop {
                stop.send_replace(true);
            }
        }
    }

    /// Wait for the loop task to exit.
    pub async fn join(&self) {
        let handle = self.task.lock().handle.take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                warn!(mode = %self.mode, error = %e, "Decision loop task failed");
            }
        }
    }

    /// Run one decision cycle.
    ///
    /// # Errors
    ///
    /// Returns an error if either feed fails or a sized intent breaks the
    /// stake invariant. Execution failures are not errors; they are reported
    /// as [`CycleOutcome::ExecutionFailed`].
    pub async fn run_cycle(&self) -> Result<CycleOutcome> {
        let ctx = &self.context;

        let snapshot = ctx.market_feed.fetch_snapshot().await?;
        let decision = ctx.signals.predict(&snapshot);

        let book = ctx.liquidity_feed.fetch_liquidity().await?;
        let signal = ctx.liquidity.confirm(decision.signal, &book);
        if signal == Signal::Hold {
            return Ok(CycleOutcome::Held);
        }

        if !ctx.risk.can_trade() {
            return Ok(CycleOutcome::Gated);
        }

        let intent = ctx.risk.size(signal, decision.confidence);
        debug_assert!(intent.stake >= Decimal::ZERO, "negative stake sized: {}", intent.stake);
        if intent.stake < Decimal::ZERO {
            return Err(Error::Invariant(format!("negative stake {}", intent.stake)));
        }
        if intent.stake == Decimal::ZERO {
            return Ok(CycleOutcome::NoStake);
        }

        let profit_loss = match ctx.executor.execute(&intent).await {
            Ok(pnl) => pnl,
            Err(e) => {
                warn!(
                    mode = %self.mode,
                    executor = ctx.executor.executor_name(),
                    error = %e,
                    "Execution failed, treating as zero P/L"
                );
                return Ok(CycleOutcome::ExecutionFailed(e));
            }
        };

        ctx.risk.apply_trade_result(profit_loss);
        let result = TradeResult::from_intent(&intent, profit_loss, ctx.clock.now());
        ctx.analytics.record(result.clone());
        ctx.analytics.record_market(&snapshot);

        info!(
            mode = %self.mode,
            signal = %result.signal,
            stake = %result.stake,
            profit_loss = %result.profit_loss,
            confidence = result.confidence,
            "Trade executed"
        );
        Ok(CycleOutcome::Traded(result))
    }

    async fn run(&self, mut stop: watch::Receiver<bool>) {
        loop {
            let stopped = *stop.borrow();
            if stopped {
                break;
            }
            let pause = match self.run_cycle().await {
                Ok(outcome) => {
                    debug!(mode = %self.mode, outcome = ?outcome, "Cycle complete");
                    self.settings.interval
                }
                Err(e) => {
                    warn!(mode = %self.mode, error = %e, "Cycle failed, backing off");
                    self.settings.error_backoff
                }
            };

            tokio::select! {
                () = tokio::time::sleep(pause) => {}
                changed = stop.changed() => {
                    // Sender gone: the loop was restarted under a new signal.
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }
        info!(mode = %self.mode, "Decision loop stopped");
    }
}
