//! Handler for `check config`.

use std::path::Path;

use crate::adapter::inbound::cli::{operator, output};
use crate::error::Result;

/// Validate configuration without starting any loop.
pub fn execute_config(config_path: Option<&Path>) -> Result<()> {
    let (config_toml, source) = operator::read_config_toml(config_path)?;
    let report = operator::operator()?.check_config(&config_toml)?;

    output::section("Configuration Check");
    output::field("Config", &source);
    output::success("Configuration is valid");

    output::section("Summary");
    output::field("Mode", &report.mode);
    output::field("Shared portfolio", report.shared_portfolio);
    output::field("Starting balance", &report.starting_balance);
    output::field("Assets", report.assets.join(", "));
    match report.seed {
        Some(seed) => output::field("Seed", seed),
        None => output::field("Seed", "entropy"),
    }

    if report.live_enabled {
        if report.live_ready() {
            output::success("Live execution configured");
        } else {
            output::warning("Live mode enabled but execution is not fully configured");
            if !report.live_endpoint_configured {
                output::field("Missing", "execution.live.endpoint");
            }
            if !report.api_key_present {
                output::field("Missing", "POLYPULSE_API_KEY");
            }
        }
    } else {
        output::field("Live", "disabled");
    }

    output::success("Configuration check complete");
    Ok(())
}
