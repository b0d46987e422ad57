use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::LogDestination;

/// Ingest web sources into a knowledge service and ask questions about them.
#[derive(Debug, Parser)]
#[command(name = "ragdesk", version, about)]
pub struct Cli {
    /// Base URL of the knowledge service (requests go to <URL>/api/...).
    #[arg(long, env = "RAGDESK_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Config file (defaults to ./ragdesk.ron when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Timeout in seconds for each ingest or query request.
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// Where log output goes.
    #[arg(long, value_enum, global = true)]
    pub log: Option<LogDestination>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Interactive session: add sources, then ask questions (default).
    Session {
        /// Query the service health endpoint before reading any input.
        #[arg(long)]
        check_health: bool,
    },
    /// Ingest the given sources once.
    Ingest {
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Ingest sources, then ask a single question.
    Ask {
        /// Source to ingest before asking; repeat for several.
        #[arg(short, long = "source", required = true)]
        sources: Vec<String>,
        question: String,
    },
    /// Check that the knowledge service is up.
    Health,
    /// Write a config file with the default settings.
    InitConfig {
        #[arg(default_value = crate::config::CONFIG_FILENAME)]
        path: PathBuf,
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}
