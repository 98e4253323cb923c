//! dsaa - language detection, linting and remote debugging from the terminal

mod cli;
mod commands;
mod config;
mod logging;

use anyhow::Result;
use clap::Parser;
use cli::CliArgs;
use config::DsaaConfig;

fn main() -> Result<()> {
    logging::init();

    let args = CliArgs::parse();
    let config = DsaaConfig::load(args.config.as_deref())?.with_endpoint(args.endpoint);
    tracing::debug!(endpoint = %config.client.endpoint, "resolved configuration");

    commands::run(args.command, &config)
}
