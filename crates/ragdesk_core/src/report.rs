use crate::{Operation, RemoteError, RemoteErrorKind, WorkflowError};

/// User-facing description of the most recent failure.
pub type ErrorMessage = String;

/// Maps any workflow failure to the single message shown to the user.
///
/// A non-blank `detail` from the service always wins. Otherwise the message
/// falls back to a fixed text per operation, suffixed with the cause for
/// transport and malformed-response failures.
pub fn report(error: &WorkflowError) -> ErrorMessage {
    match error {
        WorkflowError::Validation(err) => err.to_string(),
        WorkflowError::Precondition(_) => "Please scrape URLs first".to_string(),
        WorkflowError::Busy => "Another request is still being processed".to_string(),
        WorkflowError::Remote(err) => report_remote(err),
    }
}

fn report_remote(err: &RemoteError) -> ErrorMessage {
    if let Some(detail) = err.detail.as_deref().map(str::trim) {
        if !detail.is_empty() {
            return detail.to_string();
        }
    }

    let fallback = match err.operation {
        Operation::Ingest => "Scraping failed",
        Operation::Query => "Failed to get answer",
    };
    match err.kind {
        RemoteErrorKind::Rejected { .. } => fallback.to_string(),
        RemoteErrorKind::Transport => format!("{fallback}: {}", err.message),
        RemoteErrorKind::Malformed => format!("{fallback}: unreadable response from server"),
    }
}
