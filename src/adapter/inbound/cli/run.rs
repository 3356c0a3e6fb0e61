//! Handler for the `run` command.

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::{operator, output};
use crate::error::Result;
use crate::port::inbound::engine::LoopStatus;
use crate::port::inbound::operator::runtime::{RunReport, RunRequest};

/// Execute the run command and print the final engine state.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let (config_toml, source) = operator::read_config_toml(args.config.as_deref())?;
    let service = operator::operator()?;

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Config", &source);
    if let Some(ref mode) = args.mode {
        output::field("Mode", mode);
    }
    match args.duration {
        Some(secs) => output::field("Duration", format!("{secs}s")),
        None => output::field("Duration", "until Ctrl-C"),
    }

    let report = service.execute_run(build_run_request(args, config_toml)).await?;
    print_report(&report);
    Ok(())
}

fn build_run_request(args: &RunArgs, config_toml: String) -> RunRequest {
    RunRequest {
        config_toml,
        mode: args.mode.clone(),
        duration_secs: args.duration,
        log_level: args.log_level.clone(),
        json_logs: args.json_logs,
    }
}

fn print_report(report: &RunReport) {
    output::block("dashboard", &report.dashboard);
    output::block("correlation_map", &report.correlation_map);

    output::section("Performance");
    output::field("Trades", report.performance.trade_count);
    output::field("Win rate", format!("{:.1}%", report.performance.win_rate));
    output::field("Avg profit", format!("{:.6}", report.performance.avg_profit));
    output::field("Max drawdown", format!("{:.6}", report.performance.max_drawdown));

    for status in &report.status {
        print_status(status);
    }
}

fn print_status(status: &LoopStatus) {
    output::section(&format!("Status ({})", status.mode));
    output::field("Risk state", status.risk_state);
    output::field("Balance", format!("{:.6}", status.portfolio.balance));
    output::field("P/L", format!("{:.6}", status.portfolio.pnl()));
    output::field("Loss streak", status.portfolio.consecutive_losses);
    if status.portfolio.trading_paused {
        output::warning("Trading paused");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn request_carries_overrides() {
        let args = RunArgs {
            config: Some(PathBuf::from("x.toml")),
            mode: Some("live".into()),
            duration: Some(3),
            log_level: Some("warn".into()),
            json_logs: true,
        };
        let request = build_run_request(&args, "[engine]".into());
        assert_eq!(request.config_toml, "[engine]");
        assert_eq!(request.mode.as_deref(), Some("live"));
        assert_eq!(request.duration_secs, Some(3));
        assert_eq!(request.log_level.as_deref(), Some("warn"));
        assert!(request.json_logs);
    }
}
