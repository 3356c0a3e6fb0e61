//! Engine runtime lifecycle.
//!
//! Starts every loop, logs a periodic report and stops the engine when the
//! shutdown signal flips.

use std::time::Duration;

use tokio::sync::watch;
use tracing::info;

use crate::application::engine::service::Engine;
use crate::port::inbound::engine::EngineControl;

/// Run the engine until `shutdown` carries `true` or its sender is dropped.
///
/// Loops are stopped and joined before returning; an in-flight cycle is
/// allowed to finish.
pub async fn run_with_shutdown(
    engine: &Engine,
    report_interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let started = engine.start();
    info!(loops = started, "Engine started");

    let mut report = tokio::time::interval(report_interval);
    report.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    // The first tick completes immediately.
    report.tick().await;

    if !*shutdown.borrow() {
        loop {
            tokio::select! {
                result = shutdown.changed() => {
                    match result {
                        Ok(()) => {
                            if *shutdown.borrow() {
                                info!("Shutdown signal received");
                                break;
                            }
                        }
                        Err(_) => {
                            info!("Shutdown channel closed");
                            break;
                        }
                    }
                }
                _ = report.tick() => log_report(engine),
            }
        }
    }

    engine.stop();
    engine.join().await;
    info!("Engine stopped");
}

fn log_report(engine: &Engine) {
    let performance = engine.performance();
    info!(
        trades = performance.trade_count,
        win_rate = performance.win_rate,
        avg_profit = %performance.avg_profit,
        max_drawdown = %performance.max_drawdown,
        "Performance"
    );
    for status in engine.status() {
        info!(
            mode = %status.mode,
            running = status.running,
            risk_state = %status.risk_state,
            balance = %status.portfolio.balance,
            pnl = %status.portfolio.pnl(),
            consecutive_losses = status.portfolio.consecutive_losses,
            "Portfolio"
        );
    }
}
