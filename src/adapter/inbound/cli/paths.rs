//! Config file discovery.
//!
//! Without `--config`, the first existing file of `./config.toml` and
//! `~/.polypulse/config.toml` is used. When neither exists the built-in
//! defaults apply.

use std::path::PathBuf;

/// Config file name looked up in each candidate directory.
const CONFIG_FILE: &str = "config.toml";

/// Returns the polypulse home directory (`~/.polypulse/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".polypulse")
}

/// Candidate config paths in lookup order.
pub fn config_candidates() -> Vec<PathBuf> {
    vec![PathBuf::from(CONFIG_FILE), home_dir().join(CONFIG_FILE)]
}

/// The first candidate that exists on disk.
pub fn discover_config() -> Option<PathBuf> {
    config_candidates().into_iter().find(|path| path.is_file())
}
