//! Ragdesk core: pure ingest/query state machine and view-model helpers.
mod effect;
mod error;
mod msg;
mod report;
mod source;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use error::{
    Operation, PreconditionError, RemoteError, RemoteErrorKind, ValidationError, WorkflowError,
};
pub use msg::Msg;
pub use report::{report, ErrorMessage};
pub use source::{normalize_url_for_dedupe, Answer, Question, SourceBatch};
pub use state::{AppState, Phase};
pub use update::update;
pub use view_model::AppViewModel;
