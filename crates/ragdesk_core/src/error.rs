use std::fmt;

/// Which coordinator operation a remote failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Ingest,
    Query,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Ingest => write!(f, "ingest"),
            Operation::Query => write!(f, "query"),
        }
    }
}

/// Local input was empty or unusable; never reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter at least one URL")]
    EmptySources,
    #[error("Please enter a question")]
    EmptyQuestion,
}

/// A question was submitted before any ingestion succeeded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no ingested content to query")]
pub struct PreconditionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    /// No response: connection failure, timeout or cancellation.
    Transport,
    /// The service answered with a non-success status.
    Rejected { status: u16 },
    /// A success status whose body could not be interpreted.
    Malformed,
}

impl fmt::Display for RemoteErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteErrorKind::Transport => write!(f, "transport"),
            RemoteErrorKind::Rejected { status } => write!(f, "rejected ({status})"),
            RemoteErrorKind::Malformed => write!(f, "malformed response"),
        }
    }
}

/// Failure talking to, or interpreting, the external service.
///
/// `detail` carries the server-supplied message when the service sent one;
/// `message` is the technical description used for logs and fallbacks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{operation} request failed ({kind}): {message}")]
pub struct RemoteError {
    pub operation: Operation,
    pub kind: RemoteErrorKind,
    pub detail: Option<String>,
    pub message: String,
}

impl RemoteError {
    pub fn transport(operation: Operation, message: impl Into<String>) -> Self {
        Self {
            operation,
            kind: RemoteErrorKind::Transport,
            detail: None,
            message: message.into(),
        }
    }

    pub fn timed_out(operation: Operation) -> Self {
        Self::transport(operation, "request timed out")
    }

    pub fn cancelled(operation: Operation) -> Self {
        Self::transport(operation, "request cancelled")
    }

    pub fn rejected(operation: Operation, status: u16, detail: Option<String>) -> Self {
        Self {
            operation,
            kind: RemoteErrorKind::Rejected { status },
            detail,
            message: format!("http status {status}"),
        }
    }

    pub fn malformed(operation: Operation, message: impl Into<String>) -> Self {
        Self {
            operation,
            kind: RemoteErrorKind::Malformed,
            detail: None,
            message: message.into(),
        }
    }
}

/// Everything a coordinator submission can fail with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Precondition(#[from] PreconditionError),
    /// Another ingestion or query is still in flight.
    #[error("another operation is already in progress")]
    Busy,
    #[error(transparent)]
    Remote(#[from] RemoteError),
}
