#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a tab by id (`chat`, `ingest`, `debug`).
    TabSelected(String),
    /// User toggled the sidebar.
    SidebarToggled,
    /// User edited the chat input box.
    ChatInputChanged(String),
    /// User pressed send (or Enter) in the chat input.
    ChatSubmitted,
    /// Backend answered (or failed to answer) a question.
    ChatCompleted {
        request_id: crate::RequestId,
        outcome: crate::ChatOutcome,
    },
    /// Result of one health check.
    HealthChecked { online: bool },
    /// User edited the ingestion text box.
    IngestTextChanged(String),
    /// User edited the ingestion source label.
    IngestSourceChanged(String),
    /// User selected a file, or cleared the selection with `None`.
    IngestFileSelected(Option<crate::SelectedFile>),
    /// User pressed the ingest button.
    IngestSubmitted,
    /// Engine finished an ingestion submission.
    IngestCompleted {
        request_id: crate::RequestId,
        result: crate::IngestResult,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
