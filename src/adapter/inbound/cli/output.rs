//! CLI output formatting.
//!
//! Every printer has two renderings: a colored human line, or a single
//! `{"type", "payload"}` JSON object per line when `--json` is set. `--quiet`
//! drops human output except warnings and errors.

use std::fmt::Display;

use owo_colors::{OwoColorize, Stream};
use parking_lot::RwLock;
use serde_json::{json, Value};

/// Output flags shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }
}

/// Color output mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorChoice {
    /// Color when the stream is a terminal
    #[default]
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

static CONFIG: RwLock<OutputConfig> = RwLock::new(OutputConfig::new(false, false));

/// How much of a line survives quiet mode.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Priority {
    Regular,
    Always,
}

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig, color: ColorChoice) {
    *CONFIG.write() = config;
    match color {
        ColorChoice::Auto => owo_colors::unset_override(),
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
    }
}

/// Route one line to JSON or to the human renderer.
fn emit(kind: &str, payload: Value, priority: Priority, human: impl FnOnce()) {
    let config = *CONFIG.read();
    if config.json {
        println!("{}", json!({ "type": kind, "payload": payload }));
    } else if !config.quiet || priority == Priority::Always {
        human();
    }
}

/// Print the application header with name and version.
pub fn header(version: &str) {
    emit(
        "header",
        json!({ "app": "polypulse", "version": version }),
        Priority::Regular,
        || {
            println!(
                "{} {}",
                "polypulse".if_supports_color(Stream::Stdout, |t| t.bold()),
                version.if_supports_color(Stream::Stdout, |t| t.dimmed())
            );
        },
    );
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    emit(
        "field",
        json!({ "label": label, "value": value }),
        Priority::Regular,
        || {
            println!(
                "  {:<18} {value}",
                label.if_supports_color(Stream::Stdout, |t| t.dimmed())
            );
        },
    );
}

pub fn success(message: &str) {
    emit("success", json!({ "message": message }), Priority::Regular, || {
        println!("  {} {message}", "✓".if_supports_color(Stream::Stdout, |t| t.green()));
    });
}

/// Print a warning line. Shown even in quiet mode.
pub fn warning(message: &str) {
    emit("warning", json!({ "message": message }), Priority::Always, || {
        println!("  {} {message}", "⚠".if_supports_color(Stream::Stdout, |t| t.yellow()));
    });
}

/// Print an error line to stderr, in either mode.
pub fn error(message: &str) {
    if CONFIG.read().json {
        eprintln!("{}", json!({ "type": "error", "payload": { "message": message } }));
    } else {
        eprintln!("  {} {message}", "×".if_supports_color(Stream::Stderr, |t| t.red()));
    }
}

pub fn section(title: &str) {
    emit("section", json!({ "title": title }), Priority::Regular, || {
        println!("\n{}", title.if_supports_color(Stream::Stdout, |t| t.bold()));
    });
}

/// Print a multi-line text block such as the dashboard.
pub fn block(kind: &str, text: &str) {
    emit(kind, json!({ "text": text }), Priority::Regular, || {
        println!("\n{text}");
    });
}
