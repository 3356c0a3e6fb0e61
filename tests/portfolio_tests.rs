//! Shared portfolio and analytics under concurrent writers.

use std::sync::Arc;
use std::thread;

use polypulse::application::analytics::recorder::{AnalyticsRecorder, AnalyticsSettings};
use polypulse::application::risk::manager::{RiskLimits, RiskManager};
use polypulse::domain::portfolio::RiskState;
use polypulse::domain::signal::Signal;
use polypulse::testkit::clock::ManualClock;
use polypulse::testkit::domain::trade;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const WRITERS: usize = 8;
const TRADES_PER_WRITER: usize = 250;

#[test]
fn concurrent_results_are_never_lost() {
    let limits = RiskLimits {
        starting_balance: dec!(100),
        max_consecutive_losses: u32::MAX,
        ..RiskLimits::default()
    };
    let risk = Arc::new(RiskManager::new(limits, Arc::new(ManualClock::default())));

    let handles: Vec<_> = (0..WRITERS)
        .map(|i| {
            let risk = Arc::clone(&risk);
            thread::spawn(move || {
                let pnl = if i % 2 == 0 { dec!(0.003) } else { dec!(-0.001) };
                for _ in 0..TRADES_PER_WRITER {
                    risk.apply_trade_result(pnl);
                    let _ = risk.can_trade();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let per_pair = dec!(0.002) * Decimal::from(TRADES_PER_WRITER);
    let expected = dec!(100) + per_pair * Decimal::from(WRITERS / 2);
    let status = risk.get_status();
    assert_eq!(status.balance, expected);
    assert!(status.last_trade_time.is_some());
    assert_eq!(risk.risk_state(), RiskState::Active);
}

#[test]
fn concurrent_loss_streak_triggers_one_cooldown() {
    let risk = Arc::new(RiskManager::new(
        RiskLimits::default(),
        Arc::new(ManualClock::default()),
    ));

    let handles: Vec<_> = (0..WRITERS)
        .map(|_| {
            let risk = Arc::clone(&risk);
            thread::spawn(move || risk.apply_trade_result(dec!(-0.0001)))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let status = risk.get_status();
    assert_eq!(status.consecutive_losses, WRITERS as u32);
    assert!(status.trading_paused);
    assert_eq!(risk.risk_state(), RiskState::Cooldown);
    assert!(!risk.can_trade());

    assert!(risk.resume_trading());
    assert!(!risk.resume_trading());
    assert!(risk.can_trade());
}

#[test]
fn concurrent_recording_respects_capacity() {
    let settings = AnalyticsSettings {
        trade_capacity: 100,
        ..AnalyticsSettings::default()
    };
    let recorder = Arc::new(AnalyticsRecorder::new(settings).unwrap());

    let handles: Vec<_> = (0..WRITERS)
        .map(|_| {
            let recorder = Arc::clone(&recorder);
            thread::spawn(move || {
                for _ in 0..TRADES_PER_WRITER {
                    recorder.record(trade(Signal::Up, dec!(0.001), 0.7));
                    recorder.record_market(&polypulse::testkit::domain::snapshot(0.5));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(recorder.trade_count(), 100);
    assert_eq!(recorder.series("ODDS").len(), 200);
    let metrics = recorder.performance();
    assert_eq!(metrics.trade_count, 100);
    assert!((metrics.win_rate - 100.0).abs() < 1e-9);
    assert_eq!(metrics.avg_profit, dec!(0.001));
}
