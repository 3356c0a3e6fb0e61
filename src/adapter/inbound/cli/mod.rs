//! Command-line adapter: argument parsing, handlers and terminal output.

pub mod check;
pub mod command;
pub mod dispatch;
pub mod operator;
pub mod output;
pub mod paths;
pub mod run;
