//! Diagnostic operator implementation.

use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::operator::diagnostic::{ConfigCheckReport, DiagnosticOperator};

use super::entry::Operator;

impl DiagnosticOperator for Operator {
    fn check_config(&self, config_toml: &str) -> Result<ConfigCheckReport> {
        let config = Config::parse_toml(config_toml)?;

        Ok(ConfigCheckReport {
            mode: config.engine.mode.as_str().to_string(),
            shared_portfolio: config.engine.shared_portfolio,
            starting_balance: config.risk.starting_balance.to_string(),
            assets: config.feed.assets.iter().map(|a| a.symbol.clone()).collect(),
            live_enabled: config.engine.mode.includes_live(),
            live_endpoint_configured: config.execution.live.endpoint.is_some(),
            api_key_present: config.execution.live.api_key.is_some(),
            seed: config.feed.seed.or(config.execution.seed),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_defaults_for_empty_config() {
        let report = Operator.check_config("").unwrap();
        assert_eq!(report.mode, "paper");
        assert!(report.shared_portfolio);
        assert_eq!(report.assets, vec!["BTC", "ETH", "LINK"]);
        assert!(!report.live_enabled);
        assert!(report.live_ready());
    }

    #[test]
    fn live_mode_without_endpoint_is_not_ready() {
        let report = Operator.check_config("[engine]\nmode = \"both\"\n").unwrap();
        assert!(report.live_enabled);
        assert!(!report.live_endpoint_configured);
        assert!(!report.live_ready());
    }

    #[test]
    fn invalid_config_is_an_error() {
        assert!(Operator.check_config("[risk]\ninsurance_fraction = 2.0\n").is_err());
    }
}
