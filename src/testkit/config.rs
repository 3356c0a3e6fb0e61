//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use crate::infrastructure::config::engine::EngineMode;
use crate::infrastructure::config::settings::Config;

/// Seed used by every seeded test config.
pub const TEST_SEED: u64 = 7;

/// Paper-only config with seeded simulators and a 1 ms cycle interval.
pub fn fast_paper() -> Config {
    let mut config = Config::default();
    config.engine.paper_interval_ms = 1;
    config.engine.live_interval_ms = 1;
    config.engine.error_backoff_ms = 1;
    config.feed.seed = Some(TEST_SEED);
    config.execution.seed = Some(TEST_SEED);
    config
}

/// Config running both loops against a live endpoint with a test API key.
pub fn both_modes(endpoint: &str, shared_portfolio: bool) -> Config {
    let mut config = fast_paper();
    config.engine.mode = EngineMode::Both;
    config.engine.shared_portfolio = shared_portfolio;
    config.execution.live.endpoint = Some(endpoint.to_string());
    config.execution.live.api_key = Some("test-key".to_string());
    config
}

/// Minimal TOML with seeded simulators, for operator and CLI tests.
pub const SEEDED_TOML: &str = r#"
[engine]
mode = "paper"
paper_interval_ms = 5

[feed]
seed = 7

[execution]
seed = 7
"#;
