//! `ragdesk`: command-line front end for ingesting sources and asking
//! questions about them.
mod cli;
mod commands;
mod config;
mod logging;
mod render;
mod session;

use clap::Parser;
use log::LevelFilter;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let file = config::load(cli.config.as_deref())?;
    let settings = config::resolve(&file, &cli);

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logging::initialize(settings.log, level);

    let command = cli.command.clone().unwrap_or(Command::Session {
        check_health: false,
    });
    commands::run(command, settings).await
}
