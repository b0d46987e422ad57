//! Ragdesk engine: HTTP clients for the knowledge service and the async
//! coordinator that executes core effects.
mod coordinator;
mod ingest;
mod query;
mod settings;
mod transport;
mod types;
mod wire;

pub use coordinator::Coordinator;
pub use ingest::{IngestionClient, ReqwestIngestionClient};
pub use query::{QueryClient, ReqwestQueryClient};
pub use settings::{ApiSettings, CoordinatorSettings, Endpoints, DEFAULT_BASE_URL};
pub use transport::ApiTransport;
pub use types::{Ack, EngineError};
pub use wire::HealthStatus;
