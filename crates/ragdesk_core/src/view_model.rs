use crate::{DebugPanel, HealthState, IngestStatus, Subsystem, Tab, TranscriptEntry};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub active_tab: Tab,
    pub sidebar_open: bool,
    pub transcript: Vec<TranscriptEntry>,
    pub debug: DebugPanel,
    pub indicators: Vec<IndicatorView>,
    pub ingest: IngestFormView,
    pub dirty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorView {
    pub subsystem: Subsystem,
    pub state: HealthState,
}

/// The staged ingest form and the outcome of the last submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IngestFormView {
    pub text: String,
    pub source: String,
    pub file_name: Option<String>,
    pub status: Option<IngestStatus>,
}
