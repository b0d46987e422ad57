use ragdesk_core::{Answer, Operation, Question, RemoteError};
use ragdesk_logging::{clip_for_log, desk_info};

use crate::wire::{AnswerResponse, QuestionRequest};
use crate::{ApiSettings, ApiTransport, EngineError};

/// Asks the knowledge service a question.
///
/// Implementations are plain request/response adapters; whether anything
/// has been ingested is the coordinator's concern.
#[async_trait::async_trait]
pub trait QueryClient: Send + Sync {
    async fn query(&self, question: &Question) -> Result<Answer, RemoteError>;
}

/// `POST /api/question` over reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestQueryClient {
    transport: ApiTransport,
}

impl ReqwestQueryClient {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    pub fn from_settings(settings: &ApiSettings) -> Result<Self, EngineError> {
        ApiTransport::new(settings).map(Self::new)
    }
}

#[async_trait::async_trait]
impl QueryClient for ReqwestQueryClient {
    async fn query(&self, question: &Question) -> Result<Answer, RemoteError> {
        let request = QuestionRequest {
            question: question.as_str(),
        };
        let url = &self.transport.endpoints().question;
        let response = self
            .transport
            .post_json(Operation::Query, url, &request)
            .await?;

        let parsed: AnswerResponse = serde_json::from_str(&response.body)
            .map_err(|err| RemoteError::malformed(Operation::Query, err.to_string()))?;
        desk_info!(
            "Answered {:?} ({} chars)",
            clip_for_log(question.as_str(), 60),
            parsed.answer.chars().count()
        );
        Ok(parsed.answer)
    }
}
