//! Optional RON configuration file, layered under CLI flags.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use ragdesk_engine::{ApiSettings, CoordinatorSettings, DEFAULT_BASE_URL};
use ragdesk_logging::{desk_debug, desk_info};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "ragdesk.ron";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub operation_timeout_secs: Option<u64>,
    pub log: Option<LogDestination>,
}

impl FileConfig {
    /// The settings written by `ragdesk init-config`.
    pub fn template() -> Self {
        let api = ApiSettings::default();
        Self {
            api_url: Some(DEFAULT_BASE_URL.to_string()),
            connect_timeout_secs: Some(api.connect_timeout.as_secs()),
            request_timeout_secs: Some(api.request_timeout.as_secs()),
            operation_timeout_secs: Some(CoordinatorSettings::default().operation_timeout.as_secs()),
            log: Some(LogDestination::Terminal),
        }
    }
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub coordinator: CoordinatorSettings,
    pub log: LogDestination,
}

/// Reads the config file.
///
/// An explicit path must exist. Without one, `./ragdesk.ron` is used when
/// present and defaults apply otherwise.
pub fn load(explicit: Option<&Path>) -> Result<FileConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(CONFIG_FILENAME),
    };

    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound && explicit.is_none() => {
            return Ok(FileConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("reading config file {}", path.display()))
        }
    };

    ron::from_str(&content).with_context(|| format!("parsing config file {}", path.display()))
}

/// Writes the template config to `path`, refusing to clobber unless `force`.
pub fn write_template(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let pretty = ron::ser::PrettyConfig::new();
    let content = ron::ser::to_string_pretty(&FileConfig::template(), pretty)
        .context("serializing config template")?;
    fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
    desk_info!("Wrote config template to {:?}", path);
    Ok(())
}

/// CLI flags override the file, which overrides built-in defaults.
pub fn resolve(file: &FileConfig, cli: &Cli) -> Settings {
    let mut api = ApiSettings::default();
    let mut coordinator = CoordinatorSettings::default();

    if let Some(url) = cli.api_url.as_ref().or(file.api_url.as_ref()) {
        api.base_url = url.clone();
    }
    if let Some(secs) = file.connect_timeout_secs {
        api.connect_timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = file.request_timeout_secs {
        api.request_timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = file.operation_timeout_secs {
        coordinator.operation_timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = cli.timeout {
        api.request_timeout = Duration::from_secs(secs);
        coordinator.operation_timeout = Duration::from_secs(secs);
    }

    let log = cli.log.or(file.log).unwrap_or_default();
    desk_debug!(
        "Resolved api base {:?}, operation timeout {:?}",
        api.base_url,
        coordinator.operation_timeout
    );
    Settings {
        api,
        coordinator,
        log,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_explicit_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("absent.ron");
        assert!(load(Some(&missing)).is_err());
    }

    #[test]
    fn partial_file_parses_with_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, r#"(api_url: Some("http://rag.internal:9000"), log: Some(Off))"#)
            .unwrap();

        let config = load(Some(&path)).unwrap();
        assert_eq!(config.api_url.as_deref(), Some("http://rag.internal:9000"));
        assert_eq!(config.log, Some(LogDestination::Off));
        assert_eq!(config.request_timeout_secs, None);
    }

    #[test]
    fn invalid_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(api_url: 42)").unwrap();

        let err = load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("parsing config file"));
    }

    #[test]
    fn template_round_trips_and_is_not_clobbered() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);

        write_template(&path, false).unwrap();
        assert_eq!(load(Some(&path)).unwrap(), FileConfig::template());
        assert!(write_template(&path, false).is_err());
        write_template(&path, true).unwrap();
    }

    #[test]
    fn cli_flags_override_file_values() {
        let file = FileConfig {
            api_url: Some("http://from-file:8000".into()),
            request_timeout_secs: Some(30),
            operation_timeout_secs: Some(40),
            log: Some(LogDestination::File),
            ..FileConfig::default()
        };
        let cli = Cli::parse_from([
            "ragdesk",
            "--api-url",
            "http://from-cli:8000",
            "--timeout",
            "5",
            "health",
        ]);

        let settings = resolve(&file, &cli);
        assert_eq!(settings.api.base_url, "http://from-cli:8000");
        assert_eq!(settings.api.request_timeout, Duration::from_secs(5));
        assert_eq!(settings.coordinator.operation_timeout, Duration::from_secs(5));
        assert_eq!(settings.log, LogDestination::File);
    }

    #[test]
    fn file_values_apply_without_flags() {
        let file = FileConfig {
            api_url: Some("http://from-file:8000".into()),
            operation_timeout_secs: Some(40),
            ..FileConfig::default()
        };
        let cli = Cli::parse_from(["ragdesk", "health"]);

        let settings = resolve(&file, &cli);
        assert_eq!(settings.coordinator.operation_timeout, Duration::from_secs(40));
        assert_eq!(settings.log, LogDestination::Terminal);
        // The env var may be set on the machine running the tests.
        if std::env::var_os("RAGDESK_API_URL").is_none() {
            assert_eq!(settings.api.base_url, "http://from-file:8000");
        }
    }
}
