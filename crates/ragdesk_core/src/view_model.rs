use crate::Phase;

/// Snapshot of everything the presentation layer needs to draw the session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: Phase,
    pub phase_label: &'static str,
    /// Present only while the phase is `Ready`.
    pub answer: Option<String>,
    pub error: Option<String>,
    /// Sources in the last successfully ingested batch.
    pub ingested_sources: usize,
    pub can_submit_sources: bool,
    pub can_ask: bool,
    pub busy: bool,
    pub dirty: bool,
}
