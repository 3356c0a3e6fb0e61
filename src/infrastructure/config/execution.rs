//! Trade execution configuration.
//!
//! The live API key is never read from the config file; it comes from the
//! `POLYPULSE_API_KEY` environment variable.

use serde::Deserialize;

/// Environment variable holding the live execution API key.
pub const API_KEY_ENV: &str = "POLYPULSE_API_KEY";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExecutionConfig {
    /// Seed for the simulated executor; unseeded runs draw from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub live: LiveExecutionConfig,
}

/// Live execution venue settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LiveExecutionConfig {
    /// Endpoint that accepts trade intents as JSON.
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Loaded from [`API_KEY_ENV`], never from TOML.
    #[serde(skip)]
    pub api_key: Option<String>,
}

const fn default_timeout_ms() -> u64 {
    5000
}

impl Default for LiveExecutionConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_ms: default_timeout_ms(),
            api_key: None,
        }
    }
}
