use ragdesk_core::{Operation, RemoteError, SourceBatch};
use ragdesk_logging::desk_info;

use crate::wire::ScrapeRequest;
use crate::{Ack, ApiSettings, ApiTransport, EngineError};

/// Sends a batch of sources to the ingestion endpoint.
#[async_trait::async_trait]
pub trait IngestionClient: Send + Sync {
    async fn ingest(&self, batch: &SourceBatch) -> Result<Ack, RemoteError>;
}

/// `POST /api/scrape` over reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestIngestionClient {
    transport: ApiTransport,
}

impl ReqwestIngestionClient {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    pub fn from_settings(settings: &ApiSettings) -> Result<Self, EngineError> {
        ApiTransport::new(settings).map(Self::new)
    }
}

#[async_trait::async_trait]
impl IngestionClient for ReqwestIngestionClient {
    async fn ingest(&self, batch: &SourceBatch) -> Result<Ack, RemoteError> {
        let request = ScrapeRequest { urls: batch.urls() };
        let url = &self.transport.endpoints().scrape;
        // The success body carries nothing beyond the status.
        let response = self
            .transport
            .post_json(Operation::Ingest, url, &request)
            .await?;
        desk_info!(
            "Ingested {} source(s), status {}",
            batch.len(),
            response.status
        );
        Ok(Ack {
            status: response.status,
        })
    }
}
