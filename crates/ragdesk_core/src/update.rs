use ragdesk_logging::{desk_debug, desk_warn};

use crate::{
    report, AppState, Effect, Msg, Phase, PreconditionError, Question, SourceBatch,
    WorkflowError,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SourcesSubmitted(entries) => {
            if state.phase().is_in_flight() {
                return reject_busy(state, "sources");
            }
            match SourceBatch::new(entries) {
                Ok(batch) => {
                    state.begin_ingest(batch.len());
                    vec![Effect::Ingest { batch }]
                }
                Err(err) => reject(&mut state, err.into()),
            }
        }
        Msg::QuestionSubmitted(text) => match state.phase() {
            Phase::Querying => return reject_busy(state, "question"),
            phase if !phase.accepts_questions() => reject(&mut state, PreconditionError.into()),
            _ => match Question::new(text) {
                Ok(question) => {
                    state.begin_query();
                    vec![Effect::Query { question }]
                }
                Err(err) => reject(&mut state, err.into()),
            },
        },
        Msg::IngestFinished(result) => {
            if state.phase() != Phase::Ingesting {
                desk_warn!(
                    "Ignoring ingest completion while phase is {:?}",
                    state.phase()
                );
                return (state, Vec::new());
            }
            match result {
                Ok(()) => state.finish_ingest_ok(),
                Err(err) => state.finish_ingest_err(report(&WorkflowError::Remote(err))),
            }
            Vec::new()
        }
        Msg::QueryFinished(result) => {
            if state.phase() != Phase::Querying {
                desk_warn!(
                    "Ignoring query completion while phase is {:?}",
                    state.phase()
                );
                return (state, Vec::new());
            }
            match result {
                Ok(answer) => state.finish_query_ok(answer),
                Err(err) => state.finish_query_err(report(&WorkflowError::Remote(err))),
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn reject(state: &mut AppState, error: WorkflowError) -> Vec<Effect> {
    desk_debug!("Rejected submission in phase {:?}: {}", state.phase(), error);
    state.set_error(report(&error));
    vec![Effect::Reject(error)]
}

// In-flight rejections leave the state untouched, error line included.
fn reject_busy(state: AppState, what: &str) -> (AppState, Vec<Effect>) {
    desk_debug!("Dropped {} submission: {:?} in flight", what, state.phase());
    (state, vec![Effect::Reject(WorkflowError::Busy)])
}
