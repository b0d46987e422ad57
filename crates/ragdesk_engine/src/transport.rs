use ragdesk_core::{Operation, RemoteError};
use ragdesk_logging::{desk_debug, desk_warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use url::Url;

use crate::wire::{error_detail, HealthStatus};
use crate::{ApiSettings, EngineError, Endpoints};

/// Shared HTTP plumbing for the knowledge service endpoints.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiTransport {
    client: reqwest::Client,
    endpoints: Endpoints,
}

/// Status and raw body of a successful (2xx) response.
#[derive(Debug)]
pub(crate) struct SuccessBody {
    pub status: u16,
    pub body: String,
}

impl ApiTransport {
    pub fn new(settings: &ApiSettings) -> Result<Self, EngineError> {
        let endpoints = settings.endpoints()?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| EngineError::Client(err.to_string()))?;
        Ok(Self { client, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// POSTs `payload` as JSON and normalizes every failure into a
    /// [`RemoteError`] for `operation`.
    pub(crate) async fn post_json<T: Serialize + ?Sized>(
        &self,
        operation: Operation,
        url: &Url,
        payload: &T,
    ) -> Result<SuccessBody, RemoteError> {
        let bytes = serde_json::to_vec(payload)
            .map_err(|err| RemoteError::transport(operation, err.to_string()))?;

        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(bytes)
            .send()
            .await
            .map_err(|err| map_reqwest_error(operation, err))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| map_reqwest_error(operation, err))?;
        desk_debug!(
            "{} {} -> {} ({} bytes)",
            operation,
            url,
            status.as_u16(),
            body.len()
        );

        if !status.is_success() {
            let detail = error_detail(&body);
            desk_warn!(
                "{} rejected with status {}: {}",
                operation,
                status.as_u16(),
                detail.as_deref().unwrap_or("<no detail>")
            );
            return Err(RemoteError::rejected(operation, status.as_u16(), detail));
        }

        Ok(SuccessBody {
            status: status.as_u16(),
            body,
        })
    }

    /// Probes `GET /api/health`.
    pub async fn health(&self) -> Result<HealthStatus, EngineError> {
        let response = self
            .client
            .get(self.endpoints.health.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| EngineError::Unreachable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::Unhealthy {
                status: status.as_u16(),
            });
        }
        let body = response
            .text()
            .await
            .map_err(|err| EngineError::Unreachable(err.to_string()))?;
        serde_json::from_str(&body).map_err(|err| EngineError::MalformedHealth(err.to_string()))
    }
}

fn map_reqwest_error(operation: Operation, err: reqwest::Error) -> RemoteError {
    if err.is_timeout() {
        return RemoteError::timed_out(operation);
    }
    if err.is_connect() {
        return RemoteError::transport(operation, format!("could not connect: {err}"));
    }
    RemoteError::transport(operation, err.to_string())
}
