mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use wfor::process::exec_with_env;
use wfor::{logging, Aggregator};

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.debug)?;

    // Configuration errors are fatal before anything is polled
    let config = cli.run_config()?;
    let conditions = cli.conditions()?;
    debug!(
        conditions = conditions.len(),
        policy = %config.policy,
        interval = %humantime::format_duration(config.interval),
        timeout = %humantime::format_duration(config.timeout),
        "Starting"
    );

    Aggregator::run(conditions, &config).into_result(config.policy)?;

    if cli.command.is_empty() {
        return Ok(());
    }

    match exec_with_env(&cli.command).context("Failed to launch command")? {}
}
