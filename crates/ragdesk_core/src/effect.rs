use crate::{Question, SourceBatch, WorkflowError};

/// Work the runtime must carry out after an `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the batch to the ingestion endpoint and feed back `Msg::IngestFinished`.
    Ingest { batch: SourceBatch },
    /// Send the question to the query endpoint and feed back `Msg::QueryFinished`.
    Query { question: Question },
    /// The submission was refused before any request was issued.
    Reject(WorkflowError),
}
