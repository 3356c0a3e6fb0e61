//! Inbound operator accessor for CLI handlers.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::error::{ConfigError, Error, Result};
use crate::port::inbound::operator::port::OperatorPort;

use super::paths;

static OPERATOR: OnceLock<Box<dyn OperatorPort>> = OnceLock::new();

/// Installs the operator implementation used by CLI handlers.
pub fn install(operator: Box<dyn OperatorPort>) -> std::result::Result<(), Box<dyn OperatorPort>> {
    OPERATOR.set(operator)
}

/// Returns the configured operator capability surface for CLI handlers.
///
/// # Errors
///
/// Returns an error if [`install`] was never called.
pub fn operator() -> Result<&'static dyn OperatorPort> {
    OPERATOR
        .get()
        .map(AsRef::as_ref)
        .ok_or_else(|| Error::Invariant("CLI operator not installed".into()))
}

/// Where configuration was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Defaults => f.write_str("built-in defaults"),
        }
    }
}

/// Load config TOML from an explicit path, or from the discovered default.
///
/// An explicit path must exist; a missing default yields empty TOML.
///
/// # Errors
///
/// Returns [`ConfigError::ReadFile`] if the file cannot be read.
pub fn read_config_toml(explicit: Option<&Path>) -> Result<(String, ConfigSource)> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match paths::discover_config() {
            Some(path) => path,
            None => return Ok((String::new(), ConfigSource::Defaults)),
        },
    };
    let content = std::fs::read_to_string(&path).map_err(ConfigError::ReadFile)?;
    Ok((content, ConfigSource::File(path)))
}
