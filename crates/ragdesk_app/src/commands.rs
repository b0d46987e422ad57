use anyhow::{bail, Context, Result};
use ragdesk_core::report;
use ragdesk_engine::{ApiTransport, Coordinator};
use ragdesk_logging::desk_info;

use crate::cli::Command;
use crate::config::{self, Settings};
use crate::session::run_session;

pub async fn run(command: Command, settings: Settings) -> Result<()> {
    match command {
        Command::Session { check_health } => session(&settings, check_health).await,
        Command::Ingest { urls } => ingest(&settings, urls).await,
        Command::Ask { sources, question } => ask(&settings, sources, question).await,
        Command::Health => health(&settings).await,
        Command::InitConfig { path, force } => {
            config::write_template(&path, force)?;
            println!("wrote {}", path.display());
            Ok(())
        }
    }
}

fn connect(settings: &Settings) -> Result<Coordinator> {
    Coordinator::connect(&settings.api, settings.coordinator.clone())
        .context("setting up the knowledge service client")
}

async fn session(settings: &Settings, check_health: bool) -> Result<()> {
    if check_health {
        println!("{}", service_health(settings).await?);
    }
    let coordinator = connect(settings)?;
    desk_info!("Starting session against {}", settings.api.base_url);
    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();
    run_session(&coordinator, input, &mut out).await
}

async fn ingest(settings: &Settings, urls: Vec<String>) -> Result<()> {
    let coordinator = connect(settings)?;
    if let Err(err) = coordinator.submit_sources(urls).await {
        bail!("{}", report(&err));
    }
    println!(
        "ingested {} source(s)",
        coordinator.view().ingested_sources
    );
    Ok(())
}

async fn ask(settings: &Settings, sources: Vec<String>, question: String) -> Result<()> {
    let coordinator = connect(settings)?;
    if let Err(err) = coordinator.submit_sources(sources).await {
        bail!("{}", report(&err));
    }
    match coordinator.submit_question(question).await {
        Ok(answer) => {
            println!("{answer}");
            Ok(())
        }
        Err(err) => bail!("{}", report(&err)),
    }
}

async fn health(settings: &Settings) -> Result<()> {
    println!("{}", service_health(settings).await?);
    Ok(())
}

/// One-line health summary, or an error when the service is unreachable or
/// unhealthy.
async fn service_health(settings: &Settings) -> Result<String> {
    let transport = ApiTransport::new(&settings.api)?;
    let status = transport
        .health()
        .await
        .with_context(|| format!("checking {}", transport.endpoints().health))?;
    desk_info!("Service health: {:?}", status.status);
    if status.message.is_empty() {
        Ok(status.status)
    } else {
        Ok(format!("{}: {}", status.status, status.message))
    }
}
