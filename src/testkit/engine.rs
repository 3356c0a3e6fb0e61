//! Decision-loop harness wired entirely from scripted collaborators.

use std::sync::Arc;
use std::time::Duration;

use super::clock::ManualClock;
use super::executor::ScriptedExecutor;
use super::feed::{ScriptedLiquidityFeed, ScriptedMarketFeed};
use super::model::FixedModel;
use crate::application::analytics::recorder::{AnalyticsRecorder, AnalyticsSettings};
use crate::application::engine::decision_loop::{DecisionContext, DecisionLoop, LoopSettings};
use crate::application::liquidity::confirmer::{LiquidityConfirmer, LiquiditySettings};
use crate::application::risk::manager::{RiskLimits, RiskManager};
use crate::application::signal::generator::{SignalGenerator, SignalSettings};
use crate::domain::signal::Signal;
use crate::port::inbound::engine::TradingMode;

/// Near-zero pauses so spawned loops spin quickly in tests.
pub fn fast_loop_settings() -> LoopSettings {
    LoopSettings {
        interval: Duration::from_millis(1),
        error_backoff: Duration::from_millis(1),
    }
}

/// Signal settings that consult the model from the first snapshot.
pub fn eager_signal_settings() -> SignalSettings {
    SignalSettings {
        min_history: 1,
        ..Default::default()
    }
}

/// A decision loop plus handles to every collaborator it drives.
pub struct LoopHarness {
    pub model: Arc<FixedModel>,
    pub market_feed: Arc<ScriptedMarketFeed>,
    pub liquidity_feed: Arc<ScriptedLiquidityFeed>,
    pub executor: Arc<ScriptedExecutor>,
    pub clock: Arc<ManualClock>,
    pub risk: Arc<RiskManager>,
    pub analytics: Arc<AnalyticsRecorder>,
    pub decision_loop: Arc<DecisionLoop>,
}

impl LoopHarness {
    /// Paper loop whose model always answers `signal` at `confidence`.
    pub fn new(signal: Signal, confidence: f64) -> Self {
        Self::builder(signal, confidence).build()
    }

    pub fn builder(signal: Signal, confidence: f64) -> LoopHarnessBuilder {
        LoopHarnessBuilder {
            mode: TradingMode::Paper,
            model: Arc::new(FixedModel::new(signal, confidence)),
            market_feed: ScriptedMarketFeed::default(),
            liquidity_feed: ScriptedLiquidityFeed::default(),
            executor: ScriptedExecutor::default(),
            limits: RiskLimits::default(),
            signal_settings: eager_signal_settings(),
            loop_settings: fast_loop_settings(),
            risk: None,
            analytics: None,
        }
    }

    /// Run `n` cycles, panicking on the first cycle error.
    pub async fn run_cycles(&self, n: usize) {
        for _ in 0..n {
            self.decision_loop
                .run_cycle()
                .await
                .expect("cycle should succeed");
        }
    }
}

pub struct LoopHarnessBuilder {
    mode: TradingMode,
    model: Arc<FixedModel>,
    market_feed: ScriptedMarketFeed,
    liquidity_feed: ScriptedLiquidityFeed,
    executor: ScriptedExecutor,
    limits: RiskLimits,
    signal_settings: SignalSettings,
    loop_settings: LoopSettings,
    risk: Option<Arc<RiskManager>>,
    analytics: Option<Arc<AnalyticsRecorder>>,
}

impl LoopHarnessBuilder {
    pub fn mode(mut self, mode: TradingMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn market_feed(mut self, feed: ScriptedMarketFeed) -> Self {
        self.market_feed = feed;
        self
    }

    pub fn liquidity_feed(mut self, feed: ScriptedLiquidityFeed) -> Self {
        self.liquidity_feed = feed;
        self
    }

    pub fn executor(mut self, executor: ScriptedExecutor) -> Self {
        self.executor = executor;
        self
    }

    pub fn limits(mut self, limits: RiskLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn signal_settings(mut self, settings: SignalSettings) -> Self {
        self.signal_settings = settings;
        self
    }

    pub fn loop_settings(mut self, settings: LoopSettings) -> Self {
        self.loop_settings = settings;
        self
    }

    /// Share an existing risk manager instead of creating one.
    pub fn shared_risk(mut self, risk: Arc<RiskManager>) -> Self {
        self.risk = Some(risk);
        self
    }

    /// Share an existing recorder instead of creating one.
    pub fn shared_analytics(mut self, analytics: Arc<AnalyticsRecorder>) -> Self {
        self.analytics = Some(analytics);
        self
    }

    pub fn build(self) -> LoopHarness {
        let clock = Arc::new(ManualClock::default());
        let risk = self
            .risk
            .unwrap_or_else(|| Arc::new(RiskManager::new(self.limits, clock.clone())));
        let analytics = self.analytics.unwrap_or_else(|| {
            Arc::new(
                AnalyticsRecorder::new(AnalyticsSettings::default())
                    .expect("default analytics settings should be valid"),
            )
        });
        let signals = Arc::new(
            SignalGenerator::new(self.model.clone(), self.signal_settings)
                .expect("test signal settings should be valid"),
        );
        let liquidity = Arc::new(
            LiquidityConfirmer::new(LiquiditySettings::default())
                .expect("default liquidity settings should be valid"),
        );

        let market_feed = Arc::new(self.market_feed);
        let liquidity_feed = Arc::new(self.liquidity_feed);
        let executor = Arc::new(self.executor);

        let context = DecisionContext {
            market_feed: market_feed.clone(),
            liquidity_feed: liquidity_feed.clone(),
            executor: executor.clone(),
            signals,
            liquidity,
            risk: risk.clone(),
            analytics: analytics.clone(),
            clock: clock.clone(),
        };
        let decision_loop = Arc::new(DecisionLoop::new(self.mode, context, self.loop_settings));

        LoopHarness {
            model: self.model,
            market_feed,
            liquidity_feed,
            executor,
            clock,
            risk,
            analytics,
            decision_loop,
        }
    }
}
