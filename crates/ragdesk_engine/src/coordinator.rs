use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use ragdesk_core::{
    update, Answer, AppState, AppViewModel, Effect, Msg, Operation, Phase, Question,
    RemoteError, SourceBatch, WorkflowError,
};
use ragdesk_logging::{clip_for_log, desk_error, desk_info, desk_warn};

use crate::{
    Ack, ApiSettings, ApiTransport, CoordinatorSettings, EngineError, IngestionClient,
    QueryClient, ReqwestIngestionClient, ReqwestQueryClient,
};

/// Drives the core state machine for one session and runs the requests it
/// asks for.
///
/// The state lock is only held while `update` runs, never across a request.
/// While an ingestion or query is outstanding the phase itself acts as the
/// in-flight flag, so a second submission is refused before any request is
/// issued.
pub struct Coordinator {
    state: Mutex<AppState>,
    ingestion: Arc<dyn IngestionClient>,
    query: Arc<dyn QueryClient>,
    settings: CoordinatorSettings,
}

impl Coordinator {
    pub fn new(
        ingestion: Arc<dyn IngestionClient>,
        query: Arc<dyn QueryClient>,
        settings: CoordinatorSettings,
    ) -> Self {
        Self {
            state: Mutex::new(AppState::new()),
            ingestion,
            query,
            settings,
        }
    }

    /// Builds a coordinator talking to the service described by `api`.
    pub fn connect(api: &ApiSettings, settings: CoordinatorSettings) -> Result<Self, EngineError> {
        let transport = ApiTransport::new(api)?;
        Ok(Self::new(
            Arc::new(ReqwestIngestionClient::new(transport.clone())),
            Arc::new(ReqwestQueryClient::new(transport)),
            settings,
        ))
    }

    pub fn phase(&self) -> Phase {
        self.lock().phase()
    }

    pub fn view(&self) -> AppViewModel {
        self.lock().view()
    }

    /// Returns a fresh view only if the state changed since the last call.
    pub fn take_view_if_changed(&self) -> Option<AppViewModel> {
        let mut state = self.lock();
        let view = state.view();
        state.consume_dirty().then_some(view)
    }

    /// Ingests the given source identifiers, replacing the previous batch.
    pub async fn submit_sources<I, S>(&self, entries: I) -> Result<Ack, WorkflowError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = entries.into_iter().map(Into::into).collect();
        match self.dispatch(Msg::SourcesSubmitted(entries)).into_iter().next() {
            Some(Effect::Ingest { batch }) => self.run_ingest(batch).await,
            Some(Effect::Reject(err)) => Err(err),
            other => Err(unexpected_effect(Operation::Ingest, other)),
        }
    }

    /// Ingests sources given as free text, one identifier per line.
    pub async fn submit_source_text(&self, raw: &str) -> Result<Ack, WorkflowError> {
        self.submit_sources(raw.lines()).await
    }

    /// Asks a question against the last successfully ingested batch.
    pub async fn submit_question(&self, text: impl Into<String>) -> Result<Answer, WorkflowError> {
        match self
            .dispatch(Msg::QuestionSubmitted(text.into()))
            .into_iter()
            .next()
        {
            Some(Effect::Query { question }) => self.run_query(question).await,
            Some(Effect::Reject(err)) => Err(err),
            other => Err(unexpected_effect(Operation::Query, other)),
        }
    }

    async fn run_ingest(&self, batch: SourceBatch) -> Result<Ack, WorkflowError> {
        let guard = InFlightGuard::new(self, Operation::Ingest);
        desk_info!("Submitting {} source(s) for ingestion", batch.len());

        let result = self
            .bounded(Operation::Ingest, self.ingestion.ingest(&batch))
            .await;
        guard.finish(Msg::IngestFinished(
            result.as_ref().map(|_| ()).map_err(Clone::clone),
        ));
        result.map_err(WorkflowError::from)
    }

    async fn run_query(&self, question: Question) -> Result<Answer, WorkflowError> {
        let guard = InFlightGuard::new(self, Operation::Query);
        desk_info!("Asking {:?}", clip_for_log(question.as_str(), 60));

        let result = self
            .bounded(Operation::Query, self.query.query(&question))
            .await;
        guard.finish(Msg::QueryFinished(result.clone()));
        result.map_err(WorkflowError::from)
    }

    async fn bounded<T>(
        &self,
        operation: Operation,
        request: impl Future<Output = Result<T, RemoteError>>,
    ) -> Result<T, RemoteError> {
        match tokio::time::timeout(self.settings.operation_timeout, request).await {
            Ok(result) => result,
            Err(_) => {
                desk_warn!(
                    "{} did not finish within {:?}",
                    operation,
                    self.settings.operation_timeout
                );
                Err(RemoteError::timed_out(operation))
            }
        }
    }

    fn dispatch(&self, msg: Msg) -> Vec<Effect> {
        let mut guard = self.lock();
        let state = std::mem::take(&mut *guard);
        let (state, effects) = update(state, msg);
        *guard = state;
        effects
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A submission must yield exactly one request or one rejection. Anything else
/// is reported as a failure with no request issued.
fn unexpected_effect(operation: Operation, effect: Option<Effect>) -> WorkflowError {
    desk_error!("{} submission produced {:?}", operation, effect);
    WorkflowError::Remote(RemoteError::transport(operation, "no request was issued"))
}

/// Guarantees the in-flight phase is left even when the request future is
/// dropped before completing.
struct InFlightGuard<'a> {
    coordinator: &'a Coordinator,
    operation: Operation,
    armed: bool,
}

impl<'a> InFlightGuard<'a> {
    fn new(coordinator: &'a Coordinator, operation: Operation) -> Self {
        Self {
            coordinator,
            operation,
            armed: true,
        }
    }

    fn finish(mut self, msg: Msg) {
        self.armed = false;
        self.coordinator.dispatch(msg);
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        desk_warn!("{} request dropped before completion", self.operation);
        let failure = RemoteError::cancelled(self.operation);
        let msg = match self.operation {
            Operation::Ingest => Msg::IngestFinished(Err(failure)),
            Operation::Query => Msg::QueryFinished(Err(failure)),
        };
        self.coordinator.dispatch(msg);
    }
}
