//! Infrastructure bootstrap: wires configuration into a runnable engine.
//!
//! Every collaborator is constructed here and injected into the decision
//! loops. Configuration problems surface as errors before any loop starts.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::model::momentum::MomentumModel;
use crate::adapter::outbound::simulated::executor::SimulatedExecutor;
use crate::adapter::outbound::simulated::feed::{PriceRange, SimulatedMarketFeed};
use crate::adapter::outbound::simulated::order_book::SimulatedOrderBook;
use crate::adapter::outbound::simulated::rng::seeded_rng;
use crate::application::analytics::recorder::AnalyticsRecorder;
use crate::application::engine::decision_loop::{DecisionContext, DecisionLoop};
use crate::application::engine::service::Engine;
use crate::application::liquidity::confirmer::LiquidityConfirmer;
use crate::application::risk::manager::RiskManager;
use crate::application::signal::generator::SignalGenerator;
use crate::domain::id::AssetId;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::engine::TradingMode;
use crate::port::outbound::clock::{Clock, SystemClock};
use crate::port::outbound::execution::TradeExecutor;
use crate::port::outbound::feed::{LiquidityFeed, MarketFeed};
use crate::port::outbound::model::SignalModel;

/// Build the engine on the system clock.
///
/// # Errors
///
/// Returns an error if a collaborator cannot be constructed, for example
/// when live mode is enabled without an endpoint or API key.
pub fn build_engine(config: &Config) -> Result<Engine> {
    build_engine_with_clock(config, Arc::new(SystemClock))
}

/// Build the engine on an injected clock.
///
/// # Errors
///
/// See [`build_engine`].
pub fn build_engine_with_clock(config: &Config, clock: Arc<dyn Clock>) -> Result<Engine> {
    let analytics = Arc::new(AnalyticsRecorder::new(config.analytics.clone().into())?);
    let shared_risk = config
        .engine
        .shared_portfolio
        .then(|| build_risk_manager(config, &clock));

    let mut loops = Vec::new();
    for (index, mode) in config.engine.mode.trading_modes().into_iter().enumerate() {
        let risk = shared_risk
            .clone()
            .unwrap_or_else(|| build_risk_manager(config, &clock));

        let context = DecisionContext {
            market_feed: build_market_feed(config, index, &clock),
            liquidity_feed: build_liquidity_feed(config, index, &clock),
            executor: build_executor(config, mode, index)?,
            signals: Arc::new(SignalGenerator::new(
                build_signal_model(config),
                config.signal.clone().into(),
            )?),
            liquidity: Arc::new(LiquidityConfirmer::new(config.liquidity.clone().into())?),
            risk,
            analytics: Arc::clone(&analytics),
            clock: Arc::clone(&clock),
        };

        let settings = config.engine.loop_settings(mode);
        loops.push(Arc::new(DecisionLoop::new(mode, context, settings)));
    }

    let engine = Engine::new(loops, analytics);
    info!(
        mode = config.engine.mode.as_str(),
        loops = engine.loops().len(),
        portfolios = engine.portfolio_count(),
        "Engine assembled"
    );
    Ok(engine)
}

fn build_risk_manager(config: &Config, clock: &Arc<dyn Clock>) -> Arc<RiskManager> {
    Arc::new(RiskManager::new(config.risk.clone().into(), Arc::clone(clock)))
}

/// Offset a configured seed per loop so loops draw distinct streams.
fn loop_seed(seed: Option<u64>, index: usize) -> Option<u64> {
    seed.map(|s| s.wrapping_add(index as u64))
}

fn build_market_feed(config: &Config, index: usize, clock: &Arc<dyn Clock>) -> Arc<dyn MarketFeed> {
    let feed = &config.feed;
    let assets = feed
        .assets
        .iter()
        .map(|a| (AssetId::from(a.symbol.as_str()), PriceRange::new(a.min, a.max)))
        .collect();
    Arc::new(SimulatedMarketFeed::new(
        PriceRange::new(feed.odds_min, feed.odds_max),
        assets,
        seeded_rng(loop_seed(feed.seed, index)),
        Arc::clone(clock),
    ))
}

fn build_liquidity_feed(
    config: &Config,
    index: usize,
    clock: &Arc<dyn Clock>,
) -> Arc<dyn LiquidityFeed> {
    let feed = &config.feed;
    // Distinct from the market feed stream under the same seed.
    let seed = loop_seed(feed.seed, index).map(|s| s.rotate_left(32));
    Arc::new(SimulatedOrderBook::new(
        feed.market.clone(),
        PriceRange::new(feed.book_min, feed.book_max),
        seeded_rng(seed),
        Arc::clone(clock),
    ))
}

fn build_signal_model(config: &Config) -> Arc<dyn SignalModel> {
    Arc::new(MomentumModel::new(
        config.signal.momentum_window,
        config.signal.momentum_sensitivity,
    ))
}

fn build_executor(config: &Config, mode: TradingMode, index: usize) -> Result<Arc<dyn TradeExecutor>> {
    match mode {
        TradingMode::Paper => Ok(Arc::new(SimulatedExecutor::new(seeded_rng(loop_seed(
            config.execution.seed,
            index,
        ))))),
        TradingMode::Live => build_live_executor(config),
    }
}

#[cfg(feature = "live")]
fn build_live_executor(config: &Config) -> Result<Arc<dyn TradeExecutor>> {
    use std::time::Duration;

    use crate::adapter::outbound::live::executor::LiveExecutor;

    let live = &config.execution.live;
    let executor = LiveExecutor::new(
        live.endpoint.clone(),
        live.api_key.clone(),
        Duration::from_millis(live.timeout_ms),
    )?;
    info!(endpoint = executor.endpoint(), "Live executor configured");
    Ok(Arc::new(executor))
}

#[cfg(not(feature = "live"))]
fn build_live_executor(_config: &Config) -> Result<Arc<dyn TradeExecutor>> {
    Err(crate::error::ConfigError::InvalidValue {
        field: "mode",
        reason: "live mode requires the `live` feature".to_string(),
    }
    .into())
}
