//! Interactive ingest-then-ask loop over line-based input.

use std::io::Write;

use anyhow::Result;
use ragdesk_core::AppViewModel;
use ragdesk_engine::Coordinator;
use ragdesk_logging::desk_debug;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::render::render;

const HELP: &str = "\
commands:
  sources URL [URL...]   ingest the given sources (replaces the previous batch)
  sources                then one URL per line, finish with an empty line
  ask QUESTION           ask about the ingested sources
  status                 show the current state
  help                   show this text
  quit                   leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Sources(Vec<String>),
    SourcesBlock,
    Ask(String),
    Status,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub fn parse_command(line: &str) -> SessionCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return SessionCommand::Empty;
    }
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (trimmed, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "sources" | "scrape" if rest.is_empty() => SessionCommand::SourcesBlock,
        "sources" | "scrape" => {
            SessionCommand::Sources(rest.split_whitespace().map(ToOwned::to_owned).collect())
        }
        "ask" => SessionCommand::Ask(rest.to_string()),
        "status" => SessionCommand::Status,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        _ => SessionCommand::Unknown(word.to_string()),
    }
}

/// Runs the session until `quit` or end of input.
pub async fn run_session<R, W>(coordinator: &Coordinator, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    writeln!(out, "{HELP}")?;
    print_view(out, &coordinator.view())?;

    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_command(&line) {
            SessionCommand::Empty => continue,
            SessionCommand::Quit => break,
            SessionCommand::Help => writeln!(out, "{HELP}")?,
            SessionCommand::Status => print_view(out, &coordinator.view())?,
            SessionCommand::Unknown(word) => {
                writeln!(out, "unknown command {word:?}; type `help` for the list")?
            }
            SessionCommand::Sources(urls) => {
                ingest(coordinator, urls, out).await?;
            }
            SessionCommand::SourcesBlock => {
                writeln!(out, "one URL per line, empty line to finish:")?;
                let mut urls = Vec::new();
                while let Some(entry) = lines.next_line().await? {
                    if entry.trim().is_empty() {
                        break;
                    }
                    urls.push(entry);
                }
                ingest(coordinator, urls, out).await?;
            }
            SessionCommand::Ask(question) => {
                writeln!(out, "thinking...")?;
                out.flush()?;
                if let Err(err) = coordinator.submit_question(question).await {
                    desk_debug!("Question not answered: {}", err);
                }
                print_changes(coordinator, out)?;
            }
        }
    }

    Ok(())
}

async fn ingest<W: Write>(coordinator: &Coordinator, urls: Vec<String>, out: &mut W) -> Result<()> {
    writeln!(out, "ingesting...")?;
    out.flush()?;
    if let Err(err) = coordinator.submit_sources(urls).await {
        desk_debug!("Sources not ingested: {}", err);
    }
    print_changes(coordinator, out)
}

fn print_changes<W: Write>(coordinator: &Coordinator, out: &mut W) -> Result<()> {
    if let Some(view) = coordinator.take_view_if_changed() {
        print_view(out, &view)?;
    }
    Ok(())
}

fn print_view<W: Write>(out: &mut W, view: &AppViewModel) -> Result<()> {
    for line in render(view) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
