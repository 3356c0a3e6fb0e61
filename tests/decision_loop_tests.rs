//! Decision loop integration tests over scripted collaborators.

mod support;

use std::sync::Arc;
use std::time::Duration;

use chrono::Duration as ChronoDuration;
use polypulse::application::analytics::recorder::ODDS_SERIES;
use polypulse::application::engine::decision_loop::{CycleOutcome, LoopSettings};
use polypulse::application::engine::service::Engine;
use polypulse::application::risk::manager::RiskLimits;
use polypulse::application::signal::generator::SignalSettings;
use polypulse::domain::portfolio::RiskState;
use polypulse::domain::signal::Signal;
use polypulse::error::{Error, ExecutionError};
use polypulse::port::inbound::engine::{EngineControl, TradingMode};
use polypulse::testkit::domain::book;
use polypulse::testkit::engine::LoopHarness;
use polypulse::testkit::executor::ScriptedExecutor;
use polypulse::testkit::feed::ScriptedLiquidityFeed;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn losing_executor(losses: usize) -> ScriptedExecutor {
    ScriptedExecutor::new().with_results(vec![Ok(dec!(-0.001)); losses])
}

// ---------------------------------------------------------------------------
// Single cycles
// ---------------------------------------------------------------------------

#[tokio::test]
async fn confident_signal_trades_and_records() {
    let harness = LoopHarness::builder(Signal::Up, 0.9)
        .executor(ScriptedExecutor::new().with_results(vec![Ok(dec!(0.004))]))
        .build();

    let outcome = harness.decision_loop.run_cycle().await.unwrap();

    let CycleOutcome::Traded(result) = outcome else {
        panic!("expected a trade, got {outcome:?}");
    };
    assert_eq!(result.signal, Signal::Up);
    assert_eq!(result.stake, dec!(0.0855));
    assert_eq!(result.take_profit, dec!(0.00513));
    assert_eq!(result.stop_loss, dec!(0.002052));
    assert_eq!(result.profit_loss, dec!(0.004));

    assert_eq!(harness.risk.get_status().balance, dec!(1.004));
    assert_eq!(harness.analytics.last_trade(), Some(result));
    assert_eq!(harness.analytics.series(ODDS_SERIES).len(), 1);
    assert_eq!(harness.analytics.series("BTC"), vec![27_000.0]);
}

#[tokio::test]
async fn hold_signal_skips_execution() {
    let harness = LoopHarness::new(Signal::Hold, 0.9);

    let outcome = harness.decision_loop.run_cycle().await.unwrap();

    assert_eq!(outcome, CycleOutcome::Held);
    assert_eq!(harness.model.calls(), 1);
    assert_eq!(harness.executor.execution_count(), 0);
    assert_eq!(harness.analytics.trade_count(), 0);
}

#[tokio::test]
async fn low_confidence_is_forced_to_hold() {
    let harness = LoopHarness::new(Signal::Up, 0.6);
    let outcome = harness.decision_loop.run_cycle().await.unwrap();
    assert_eq!(outcome, CycleOutcome::Held);
}

#[tokio::test]
async fn wide_spread_downgrades_to_hold() {
    let harness = LoopHarness::builder(Signal::Down, 0.9)
        .liquidity_feed(ScriptedLiquidityFeed::repeating(book(0.40, 0.60)))
        .build();

    let outcome = harness.decision_loop.run_cycle().await.unwrap();

    assert_eq!(outcome, CycleOutcome::Held);
    assert_eq!(harness.executor.execution_count(), 0);
}

#[tokio::test]
async fn cold_start_trades_the_default_signal() {
    let harness = LoopHarness::builder(Signal::Down, 0.95)
        .signal_settings(SignalSettings::default())
        .build();

    let outcome = harness.decision_loop.run_cycle().await.unwrap();

    let CycleOutcome::Traded(result) = outcome else {
        panic!("expected a cold-start trade, got {outcome:?}");
    };
    assert_eq!(result.signal, Signal::Up);
    assert!((result.confidence - 0.7).abs() < 1e-12);
    assert_eq!(harness.model.calls(), 0);
}

#[tokio::test]
async fn tiny_portfolio_sizes_to_no_stake() {
    let harness = LoopHarness::builder(Signal::Up, 0.9)
        .limits(RiskLimits {
            starting_balance: dec!(0.01),
            stake_precision: 2,
            ..RiskLimits::default()
        })
        .build();

    let outcome = harness.decision_loop.run_cycle().await.unwrap();

    assert_eq!(outcome, CycleOutcome::NoStake);
    assert_eq!(harness.executor.execution_count(), 0);
}

#[tokio::test]
async fn execution_failure_leaves_portfolio_untouched() {
    let harness = LoopHarness::builder(Signal::Up, 0.9)
        .executor(
            ScriptedExecutor::new()
                .with_results(vec![Err(ExecutionError::Transport("venue down".into()))]),
        )
        .build();

    let outcome = harness.decision_loop.run_cycle().await.unwrap();

    assert!(matches!(
        outcome,
        CycleOutcome::ExecutionFailed(ExecutionError::Transport(_))
    ));
    let status = harness.risk.get_status();
    assert_eq!(status.balance, dec!(1.0));
    assert_eq!(status.consecutive_losses, 0);
    assert!(status.last_trade_time.is_none());
    assert_eq!(harness.analytics.trade_count(), 0);
}

#[tokio::test]
async fn feed_failure_is_a_transient_cycle_error() {
    let harness = LoopHarness::new(Signal::Up, 0.9);
    harness.market_feed.push_failure("socket closed");

    let err = harness.decision_loop.run_cycle().await.unwrap_err();
    assert!(matches!(err, Error::Data(_)));

    let outcome = harness.decision_loop.run_cycle().await.unwrap();
    assert!(matches!(outcome, CycleOutcome::Traded(_)));
    assert_eq!(harness.market_feed.fetch_count(), 2);
}

// ---------------------------------------------------------------------------
// Risk gating across cycles
// ---------------------------------------------------------------------------

#[tokio::test]
async fn loss_streak_cools_down_then_resumes() {
    let harness = LoopHarness::builder(Signal::Up, 0.9)
        .executor(losing_executor(3))
        .build();

    harness.run_cycles(3).await;
    assert_eq!(harness.risk.risk_state(), RiskState::Cooldown);

    let outcome = harness.decision_loop.run_cycle().await.unwrap();
    assert_eq!(outcome, CycleOutcome::Gated);
    assert_eq!(harness.executor.execution_count(), 3);

    harness.clock.advance(ChronoDuration::seconds(300));
    let outcome = harness.decision_loop.run_cycle().await.unwrap();
    assert!(matches!(outcome, CycleOutcome::Traded(_)));
    assert_eq!(harness.risk.get_status().consecutive_losses, 0);
}

#[tokio::test]
async fn operator_resume_clears_cooldown() {
    let harness = LoopHarness::builder(Signal::Up, 0.9)
        .executor(losing_executor(3))
        .build();
    harness.run_cycles(3).await;

    let engine = Engine::new(
        vec![Arc::clone(&harness.decision_loop)],
        Arc::clone(&harness.analytics),
    );
    engine.resume_trading();

    assert_eq!(harness.risk.risk_state(), RiskState::Active);
    let outcome = harness.decision_loop.run_cycle().await.unwrap();
    assert!(matches!(outcome, CycleOutcome::Traded(_)));
}

#[tokio::test]
async fn daily_loss_halts_until_rollover() {
    let harness = LoopHarness::builder(Signal::Up, 0.9)
        .executor(ScriptedExecutor::new().with_results(vec![Ok(dec!(-0.2))]))
        .build();

    harness.run_cycles(1).await;
    assert_eq!(harness.risk.risk_state(), RiskState::DailyHalted);
    assert_eq!(
        harness.decision_loop.run_cycle().await.unwrap(),
        CycleOutcome::Gated
    );

    harness.clock.advance(ChronoDuration::days(1));
    let outcome = harness.decision_loop.run_cycle().await.unwrap();
    assert!(matches!(outcome, CycleOutcome::Traded(_)));
    assert_eq!(harness.risk.get_status().daily_start_balance, dec!(0.8));
}

#[tokio::test]
async fn shared_portfolio_sees_both_loops() {
    let paper = LoopHarness::builder(Signal::Up, 0.9)
        .executor(ScriptedExecutor::new().with_fallback(dec!(0.001)))
        .build();
    let live = LoopHarness::builder(Signal::Down, 0.9)
        .mode(TradingMode::Live)
        .executor(ScriptedExecutor::new().with_fallback(dec!(-0.002)))
        .shared_risk(Arc::clone(&paper.risk))
        .shared_analytics(Arc::clone(&paper.analytics))
        .build();

    paper.run_cycles(2).await;
    live.run_cycles(1).await;

    assert!(Arc::ptr_eq(&paper.risk, &live.risk));
    assert_eq!(paper.risk.get_status().balance, dec!(1.0));
    assert_eq!(paper.analytics.trade_count(), 3);
    assert_eq!(paper.risk.get_status().consecutive_losses, 1);

    let engine = Engine::new(
        vec![Arc::clone(&paper.decision_loop), Arc::clone(&live.decision_loop)],
        Arc::clone(&paper.analytics),
    );
    assert_eq!(engine.portfolio_count(), 1);
    let status = engine.status();
    assert_eq!(status.len(), 2);
    assert_eq!(status[0].portfolio, status[1].portfolio);
}

#[tokio::test]
async fn independent_portfolios_do_not_interfere() {
    let paper = LoopHarness::builder(Signal::Up, 0.9)
        .executor(ScriptedExecutor::new().with_results(vec![Ok(dec!(-0.2))]))
        .build();
    let live = LoopHarness::builder(Signal::Up, 0.9)
        .mode(TradingMode::Live)
        .shared_analytics(Arc::clone(&paper.analytics))
        .build();

    paper.run_cycles(1).await;

    assert_eq!(paper.risk.risk_state(), RiskState::DailyHalted);
    assert_eq!(live.risk.risk_state(), RiskState::Active);
    assert!(matches!(
        live.decision_loop.run_cycle().await.unwrap(),
        CycleOutcome::Traded(_)
    ));

    let engine = Engine::new(
        vec![Arc::clone(&paper.decision_loop), Arc::clone(&live.decision_loop)],
        Arc::clone(&paper.analytics),
    );
    assert_eq!(engine.portfolio_count(), 2);
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn start_is_idempotent_and_stop_halts_the_task() {
    let harness = LoopHarness::builder(Signal::Up, 0.9)
        .executor(ScriptedExecutor::new().with_fallback(Decimal::ZERO))
        .build();
    let decision_loop = &harness.decision_loop;

    assert!(decision_loop.start());
    assert!(!decision_loop.start());
    assert!(decision_loop.is_running());

    let traded = support::wait::until(Duration::from_secs(5), || {
        harness.executor.execution_count() >= 3
    })
    .await;
    assert!(traded, "loop should trade while running");

    decision_loop.stop();
    decision_loop.join().await;
    assert!(!decision_loop.is_running());

    let settled = harness.executor.execution_count();
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(harness.executor.execution_count(), settled);
}

#[tokio::test]
async fn loop_survives_feed_failures() {
    let harness = LoopHarness::new(Signal::Up, 0.9);
    harness.market_feed.push_failure("first");
    harness.market_feed.push_failure("second");

    let engine = Engine::new(
        vec![Arc::clone(&harness.decision_loop)],
        Arc::clone(&harness.analytics),
    );
    assert_eq!(engine.start(), 1);
    assert_eq!(engine.start(), 0);

    let recovered = support::wait::until(Duration::from_secs(5), || {
        harness.analytics.trade_count() >= 1
    })
    .await;
    engine.stop();
    engine.join().await;

    assert!(recovered, "loop should keep cycling after feed errors");
    assert!(harness.market_feed.fetch_count() >= 3);
    assert!(engine.status().iter().all(|s| !s.running));
}

#[tokio::test]
async fn stopped_loop_can_restart() {
    let harness = LoopHarness::new(Signal::Up, 0.9);
    let decision_loop = &harness.decision_loop;

    assert!(decision_loop.start());
    decision_loop.stop();
    decision_loop.join().await;

    assert!(decision_loop.start());
    let traded = support::wait::until(Duration::from_secs(5), || {
        harness.executor.execution_count() >= 1
    })
    .await;
    decision_loop.stop();
    decision_loop.join().await;

    assert!(traded);
    assert!(!decision_loop.is_running());
}

#[tokio::test]
async fn restart_without_join_keeps_a_live_task() {
    let harness = LoopHarness::new(Signal::Up, 0.9);
    let decision_loop = &harness.decision_loop;

    assert!(decision_loop.start());
    let traded = support::wait::until(Duration::from_secs(5), || {
        harness.executor.execution_count() >= 1
    })
    .await;
    assert!(traded);

    decision_loop.stop();
    assert!(decision_loop.start());
    assert!(decision_loop.is_running());

    let before = harness.executor.execution_count();
    let kept_trading = support::wait::until(Duration::from_secs(5), || {
        harness.executor.execution_count() >= before + 3
    })
    .await;
    assert!(kept_trading, "restarted loop should keep cycling");

    decision_loop.stop();
    decision_loop.join().await;
    let settled = harness.executor.execution_count();
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(harness.executor.execution_count(), settled);
}

// ---------------------------------------------------------------------------
// Cadence (paused clock)
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn restart_after_mid_cycle_stop_keeps_the_interval() {
    let harness = LoopHarness::builder(Signal::Up, 0.9)
        .executor(ScriptedExecutor::new().with_delay(Duration::from_millis(100)))
        .loop_settings(LoopSettings {
            interval: Duration::from_secs(10),
            error_backoff: Duration::from_secs(10),
        })
        .build();
    let decision_loop = &harness.decision_loop;

    assert!(decision_loop.start());
    let executing = support::wait::until(Duration::from_secs(1), || {
        harness.executor.execution_count() == 1
    })
    .await;
    assert!(executing);

    // Stop while the execution is still in flight.
    decision_loop.stop();
    decision_loop.join().await;
    assert_eq!(harness.analytics.trade_count(), 1);
    assert_eq!(harness.market_feed.fetch_count(), 1);

    assert!(decision_loop.start());
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(harness.market_feed.fetch_count(), 2, "one cycle per interval after restart");

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(harness.market_feed.fetch_count(), 3);

    decision_loop.stop();
    decision_loop.join().await;
}

#[tokio::test(start_paused = true)]
async fn failed_cycle_waits_for_the_backoff_not_the_interval() {
    let harness = LoopHarness::builder(Signal::Up, 0.9)
        .loop_settings(LoopSettings {
            interval: Duration::from_millis(10),
            error_backoff: Duration::from_secs(1),
        })
        .build();
    harness.market_feed.push_failure("feed down");
    let decision_loop = &harness.decision_loop;

    assert!(decision_loop.start());
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(harness.market_feed.fetch_count(), 1);

    tokio::time::sleep(Duration::from_millis(495)).await;
    assert_eq!(harness.market_feed.fetch_count(), 1, "retry must wait for the backoff");

    // 1005 ms: the retry at 1000 ms succeeded.
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(harness.market_feed.fetch_count(), 2);
    assert_eq!(harness.analytics.trade_count(), 1);

    // 1015 ms: a successful cycle only waits for the interval.
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(harness.market_feed.fetch_count(), 3);

    decision_loop.stop();
    decision_loop.join().await;
}
