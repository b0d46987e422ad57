use ragdesk_core::{AppViewModel, Phase};

/// Renders the session view as plain text lines.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    let status = match view.phase {
        Phase::Ready | Phase::QueryFailed | Phase::Querying => format!(
            "[{}] {} source(s) ingested",
            view.phase_label, view.ingested_sources
        ),
        _ => format!("[{}]", view.phase_label),
    };
    lines.push(status);

    if let Some(error) = &view.error {
        lines.push(format!("error: {error}"));
    }
    if let Some(answer) = &view.answer {
        lines.push("answer:".to_string());
        lines.extend(answer.lines().map(|line| format!("  {line}")));
    }
    if !view.busy && !view.can_ask {
        lines.push("(add sources before asking questions)".to_string());
    }

    lines
}
