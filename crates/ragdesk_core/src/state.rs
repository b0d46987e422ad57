use crate::view_model::AppViewModel;
use crate::{Answer, ErrorMessage};

/// Where the session stands in the ingest/query workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Ingesting,
    Ready,
    IngestFailed,
    Querying,
    QueryFailed,
}

impl Phase {
    /// An ingestion or query request is outstanding.
    pub fn is_in_flight(self) -> bool {
        matches!(self, Phase::Ingesting | Phase::Querying)
    }

    /// The last ingestion succeeded and nothing is in flight.
    pub fn accepts_questions(self) -> bool {
        matches!(self, Phase::Ready | Phase::QueryFailed)
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Idle => "Idle",
            Phase::Ingesting => "Ingesting",
            Phase::Ready => "Ready",
            Phase::IngestFailed => "Ingest failed",
            Phase::Querying => "Querying",
            Phase::QueryFailed => "Query failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    phase: Phase,
    answer: Option<Answer>,
    error: Option<ErrorMessage>,
    ingested_sources: usize,
    pending_sources: usize,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Latest answer, only while it reflects the current knowledge store.
    pub fn answer(&self) -> Option<&str> {
        match self.phase {
            Phase::Ready => self.answer.as_deref(),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            phase: self.phase,
            phase_label: self.phase.label(),
            answer: self.answer().map(ToOwned::to_owned),
            error: self.error.clone(),
            ingested_sources: self.ingested_sources,
            can_submit_sources: !self.phase.is_in_flight(),
            can_ask: self.phase.accepts_questions(),
            busy: self.phase.is_in_flight(),
            dirty: self.dirty,
        }
    }

    /// Returns whether the state changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn begin_ingest(&mut self, source_count: usize) {
        self.phase = Phase::Ingesting;
        self.answer = None;
        self.error = None;
        self.pending_sources = source_count;
        self.dirty = true;
    }

    pub(crate) fn finish_ingest_ok(&mut self) {
        self.phase = Phase::Ready;
        self.ingested_sources = std::mem::take(&mut self.pending_sources);
        // Rejections recorded while the batch was in flight no longer apply.
        self.error = None;
        self.dirty = true;
    }

    pub(crate) fn finish_ingest_err(&mut self, message: ErrorMessage) {
        self.phase = Phase::IngestFailed;
        self.ingested_sources = 0;
        self.pending_sources = 0;
        self.error = Some(message);
        self.dirty = true;
    }

    pub(crate) fn begin_query(&mut self) {
        self.phase = Phase::Querying;
        self.error = None;
        self.dirty = true;
    }

    pub(crate) fn finish_query_ok(&mut self, answer: Answer) {
        self.phase = Phase::Ready;
        self.answer = Some(answer);
        self.dirty = true;
    }

    pub(crate) fn finish_query_err(&mut self, message: ErrorMessage) {
        self.phase = Phase::QueryFailed;
        self.answer = None;
        self.error = Some(message);
        self.dirty = true;
    }

    /// Records a refused submission without touching the phase.
    pub(crate) fn set_error(&mut self, message: ErrorMessage) {
        self.error = Some(message);
        self.dirty = true;
    }
}
