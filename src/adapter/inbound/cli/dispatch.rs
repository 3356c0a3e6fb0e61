//! Routes parsed commands to their handlers.

use crate::error::Result;

use super::command::{CheckCommand, Cli, Commands};
use super::{check, output, run};

/// Configure output and run the selected command.
pub async fn execute(cli: Cli) -> Result<()> {
    output::configure(output::OutputConfig::new(cli.json, cli.quiet), cli.color);

    match cli.command {
        Commands::Run(args) => run::execute(&args).await,
        Commands::Check(CheckCommand::Config(arg)) => {
            check::config::execute_config(arg.config.as_deref())
        }
    }
}
