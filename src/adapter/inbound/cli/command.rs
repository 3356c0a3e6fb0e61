//! Command-line interface definitions.
//!
//! `run` drives the decision loops until Ctrl-C or a fixed duration;
//! `check config` validates a configuration file without trading.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::output::ColorChoice;

/// Risk-gated micro-decision trading loop
#[derive(Parser, Debug)]
#[command(name = "polypulse")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the decision loops (foreground)
    Run(RunArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `polypulse check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file syntax and semantics.
    Config(ConfigPathArg),
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file (defaults to ./config.toml, then
    /// ~/.polypulse/config.toml).
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the configuration file (defaults to ./config.toml, then
    /// ~/.polypulse/config.toml).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the engine mode (paper, live, both).
    #[arg(long)]
    pub mode: Option<String>,

    /// Stop after this many seconds instead of waiting for Ctrl-C.
    #[arg(long)]
    pub duration: Option<u64>,

    /// Override log level (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty-printed logs.
    #[arg(long)]
    pub json_logs: bool,
}
