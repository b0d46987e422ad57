//! Logging initialization for the ragdesk binary.
//!
//! Terminal output goes to stderr so answers on stdout stay clean; file
//! output goes to `./ragdesk.log` in the current working directory.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const LOG_FILENAME: &str = "./ragdesk.log";

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum LogDestination {
    /// Write to stderr.
    #[default]
    Terminal,
    /// Write to ./ragdesk.log in current directory.
    File,
    /// Write to both file and stderr.
    Both,
    /// Do not install a logger.
    Off,
}

/// Initialize the logger with the specified destination.
pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let config = build_config();

    let loggers: Vec<Box<dyn SharedLogger>> = match destination {
        LogDestination::Off => return,
        LogDestination::File => match create_file_logger(Path::new(LOG_FILENAME), level, config) {
            Some(file_logger) => vec![file_logger],
            None => return,
        },
        LogDestination::Terminal => vec![terminal_logger(level, config)],
        LogDestination::Both => {
            let mut loggers = vec![terminal_logger(level, config.clone())];
            if let Some(file_logger) = create_file_logger(Path::new(LOG_FILENAME), level, config) {
                loggers.push(file_logger);
            }
            loggers
        }
    };

    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn terminal_logger(level: LevelFilter, config: Config) -> Box<dyn SharedLogger> {
    TermLogger::new(level, config, TerminalMode::Stderr, ColorChoice::Auto)
}

/// Opens the log file, or falls back to no file logging when it cannot be
/// created. No logger is installed yet, so the failure goes straight to stderr.
fn create_file_logger(
    path: &Path,
    level: LevelFilter,
    config: Config,
) -> Option<Box<dyn SharedLogger>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file) as Box<dyn SharedLogger>),
        Err(err) => {
            eprintln!("ragdesk: not logging to {}: {err}", path.display());
            None
        }
    }
}
