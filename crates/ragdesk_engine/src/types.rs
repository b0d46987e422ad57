/// Acknowledgement of an accepted ingestion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack {
    pub status: u16,
}

/// Failures setting up the transport or probing the service, outside any
/// coordinator operation.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid api base url {url:?}: {message}")]
    InvalidBaseUrl { url: String, message: String },
    #[error("failed to build http client: {0}")]
    Client(String),
    #[error("service unreachable: {0}")]
    Unreachable(String),
    #[error("service unhealthy (http status {status})")]
    Unhealthy { status: u16 },
    #[error("unreadable health response: {0}")]
    MalformedHealth(String),
}
