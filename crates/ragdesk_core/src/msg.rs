use crate::{Answer, RemoteError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User submitted source identifiers for ingestion (one entry per line).
    SourcesSubmitted(Vec<String>),
    /// User submitted a question against the ingested content.
    QuestionSubmitted(String),
    /// Ingestion request resolved.
    IngestFinished(Result<(), RemoteError>),
    /// Query request resolved.
    QueryFinished(Result<Answer, RemoteError>),
    /// Fallback for placeholder wiring.
    NoOp,
}
