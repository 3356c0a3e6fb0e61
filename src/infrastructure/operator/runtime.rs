//! Runtime operator implementation.

use std::time::Duration;

use async_trait::async_trait;
use tokio::signal;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::{ConfigError, Result};
use crate::infrastructure::bootstrap::build_engine;
use crate::infrastructure::config::engine::EngineMode;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::runtime::run_with_shutdown;
use crate::port::inbound::engine::EngineControl;
use crate::port::inbound::operator::runtime::{RunReport, RunRequest, RuntimeOperator};

use super::entry::Operator;

#[async_trait]
impl RuntimeOperator for Operator {
    async fn execute_run(&self, request: RunRequest) -> Result<RunReport> {
        let config = Self::load_run_config(&request)?;
        config.init_logging();

        info!(
            mode = config.engine.mode.as_str(),
            shared_portfolio = config.engine.shared_portfolio,
            duration_secs = ?request.duration_secs,
            "polypulse starting"
        );

        let engine = build_engine(&config)?;
        let report_interval = Duration::from_secs(config.engine.report_interval_secs);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let run = run_with_shutdown(&engine, report_interval, shutdown_rx);
        tokio::pin!(run);

        tokio::select! {
            () = &mut run => {}
            () = shutdown_trigger(request.duration_secs) => {
                let _ = shutdown_tx.send(true);
                run.await;
            }
        }

        info!("polypulse stopped");
        Ok(RunReport {
            dashboard: engine.dashboard(),
            correlation_map: engine.correlation_map(),
            performance: engine.performance(),
            status: engine.status(),
        })
    }
}

impl Operator {
    fn load_run_config(request: &RunRequest) -> Result<Config> {
        let mut config = Config::parse_toml(&request.config_toml)?;
        Self::apply_run_overrides(&mut config, request)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_run_overrides(config: &mut Config, request: &RunRequest) -> Result<()> {
        if let Some(ref mode) = request.mode {
            config.engine.mode = mode
                .parse::<EngineMode>()
                .map_err(|reason| ConfigError::InvalidValue {
                    field: "mode",
                    reason,
                })?;
        }

        if let Some(ref log_level) = request.log_level {
            config.logging.level = log_level.clone();
        }

        if request.json_logs {
            config.logging.format = "json".to_string();
        }

        Ok(())
    }
}

/// Resolves when the run should end: Ctrl-C, or the requested duration.
async fn shutdown_trigger(duration_secs: Option<u64>) {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received (Ctrl+C)"),
            Err(e) => {
                warn!(error = %e, "Unable to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        }
    };

    match duration_secs {
        Some(secs) => {
            tokio::select! {
                () = tokio::time::sleep(Duration::from_secs(secs)) => {
                    info!(secs, "Run duration elapsed");
                }
                () = ctrl_c => {}
            }
        }
        None => ctrl_c.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn request(toml: &str) -> RunRequest {
        RunRequest {
            config_toml: toml.to_string(),
            ..RunRequest::default()
        }
    }

    #[test]
    fn overrides_take_precedence() {
        let mut req = request("[engine]\nmode = \"paper\"\n");
        req.mode = Some("both".into());
        req.log_level = Some("debug".into());
        req.json_logs = true;

        let config = Operator::load_run_config(&req).unwrap();
        assert_eq!(config.engine.mode, EngineMode::Both);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn unknown_mode_override_is_rejected() {
        let mut req = request("");
        req.mode = Some("margin".into());
        let err = Operator::load_run_config(&req).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { field: "mode", .. })
        ));
    }

    #[tokio::test]
    async fn timed_run_reports_final_state() {
        let mut req = request(crate::testkit::config::SEEDED_TOML);
        req.duration_secs = Some(1);

        let report = Operator.execute_run(req).await.unwrap();
        assert_eq!(report.status.len(), 1);
        assert!(!report.status[0].running);
        assert!(report.dashboard.contains("PolyPulse Dashboard"));
        assert!(report.correlation_map.contains("Correlation Map"));
    }
}
