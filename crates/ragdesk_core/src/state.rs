use crate::debug_panel::{render_debug, DebugPanel};
use crate::view_model::{AppViewModel, IndicatorView, IngestFormView};

pub type RequestId = u64;

/// Source label used when the user leaves the source field blank.
pub const DEFAULT_SOURCE: &str = "User Manual";

/// Transcript text appended when a question could not be answered.
pub const CHAT_ERROR_MESSAGE: &str = "Error connecting to the server.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Chat,
    Ingest,
    Debug,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Chat, Tab::Ingest, Tab::Debug];

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.id().eq_ignore_ascii_case(id.trim()))
    }

    pub fn id(self) -> &'static str {
        match self {
            Tab::Chat => "chat",
            Tab::Ingest => "ingest",
            Tab::Debug => "debug",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    System,
}

impl Sender {
    pub fn icon(self) -> &'static str {
        match self {
            Sender::User => "person",
            Sender::System => "pulse",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub sender: Sender,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HealthState {
    /// No health check has completed yet.
    #[default]
    Unknown,
    Online,
    Offline,
}

/// Backend subsystems shown as status indicators. All of them are derived
/// from the single health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subsystem {
    Api,
    Llm,
    Database,
}

impl Subsystem {
    pub const ALL: [Subsystem; 3] = [Subsystem::Api, Subsystem::Llm, Subsystem::Database];

    pub fn label(self) -> &'static str {
        match self {
            Subsystem::Api => "API",
            Subsystem::Llm => "LLM",
            Subsystem::Database => "Vector DB",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestSubmission {
    pub text: Option<String>,
    pub file: Option<SelectedFile>,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub answer: String,
    pub retrieved_docs: Vec<String>,
    pub built_prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    Answered(ChatReply),
    Failed,
}

/// Final result of an ingestion submission as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestResult {
    /// At least one sub-request succeeded and the file (if any) was accepted.
    Succeeded,
    /// The file sub-request returned an error status with a server detail.
    FileRejected { detail: String },
    /// No sub-request succeeded.
    Failed,
    /// Transport-level failure somewhere in the sequence.
    ConnectionFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestStatus {
    Processing,
    Succeeded,
    FileRejected { detail: String },
    Failed,
    ConnectionFailed,
}

impl IngestStatus {
    pub fn message(&self) -> String {
        match self {
            IngestStatus::Processing => "Processing...".to_string(),
            IngestStatus::Succeeded => "Success! Knowledge added.".to_string(),
            IngestStatus::FileRejected { detail } => format!("File error: {detail}"),
            IngestStatus::Failed => "Error while processing.".to_string(),
            IngestStatus::ConnectionFailed => "Connection error.".to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            IngestStatus::FileRejected { .. }
                | IngestStatus::Failed
                | IngestStatus::ConnectionFailed
        )
    }
}

impl From<IngestResult> for IngestStatus {
    fn from(result: IngestResult) -> Self {
        match result {
            IngestResult::Succeeded => IngestStatus::Succeeded,
            IngestResult::FileRejected { detail } => IngestStatus::FileRejected { detail },
            IngestResult::Failed => IngestStatus::Failed,
            IngestResult::ConnectionFailed => IngestStatus::ConnectionFailed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    active_tab: Tab,
    sidebar_open: bool,
    chat_input: String,
    transcript: Vec<TranscriptEntry>,
    debug: DebugPanel,
    health: HealthState,
    ingest_text: String,
    ingest_source: String,
    ingest_file: Option<SelectedFile>,
    ingest_status: Option<IngestStatus>,
    last_request_id: RequestId,
    pending_chat: Option<RequestId>,
    pending_ingest: Option<RequestId>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            active_tab: self.active_tab,
            sidebar_open: self.sidebar_open,
            transcript: self.transcript.clone(),
            debug: self.debug.clone(),
            indicators: Subsystem::ALL
                .into_iter()
                .map(|subsystem| IndicatorView {
                    subsystem,
                    state: self.health,
                })
                .collect(),
            ingest: IngestFormView {
                text: self.ingest_text.clone(),
                source: self.ingest_source.clone(),
                file_name: self.ingest_file.as_ref().map(|file| file.name.clone()),
                status: self.ingest_status.clone(),
            },
            dirty: self.dirty,
        }
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn pending_chat(&self) -> Option<RequestId> {
        self.pending_chat
    }

    pub fn pending_ingest(&self) -> Option<RequestId> {
        self.pending_ingest
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn next_request_id(&mut self) -> RequestId {
        self.last_request_id += 1;
        self.last_request_id
    }

    pub(crate) fn switch_tab(&mut self, tab: Tab) {
        if self.active_tab != tab {
            self.active_tab = tab;
            self.mark_dirty();
        }
    }

    pub(crate) fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
        self.mark_dirty();
    }

    pub(crate) fn set_chat_input(&mut self, text: String) {
        self.chat_input = text;
    }

    /// Echoes the trimmed input into the transcript, clears the input and
    /// puts the debug panel into its loading state. Returns `None` for blank
    /// input.
    pub(crate) fn begin_chat(&mut self) -> Option<(RequestId, String)> {
        let question = self.chat_input.trim().to_string();
        if question.is_empty() {
            return None;
        }
        self.push_entry(Sender::User, question.clone());
        self.chat_input.clear();
        self.debug = DebugPanel::loading();
        let request_id = self.next_request_id();
        self.pending_chat = Some(request_id);
        Some((request_id, question))
    }

    pub(crate) fn complete_chat(&mut self, request_id: RequestId, outcome: ChatOutcome) -> bool {
        if self.pending_chat != Some(request_id) {
            return false;
        }
        self.pending_chat = None;
        match outcome {
            ChatOutcome::Answered(reply) => {
                self.push_entry(Sender::System, reply.answer.clone());
                self.debug = render_debug(&reply);
            }
            ChatOutcome::Failed => {
                // Debug panel keeps its loading placeholders.
                self.push_entry(Sender::System, CHAT_ERROR_MESSAGE.to_string());
            }
        }
        true
    }

    pub(crate) fn set_health(&mut self, online: bool) {
        let next = if online {
            HealthState::Online
        } else {
            HealthState::Offline
        };
        if self.health != next {
            self.health = next;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_ingest_text(&mut self, text: String) {
        if self.ingest_text != text {
            self.ingest_text = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_ingest_source(&mut self, source: String) {
        if self.ingest_source != source {
            self.ingest_source = source;
            self.mark_dirty();
        }
    }

    pub(crate) fn select_file(&mut self, file: Option<SelectedFile>) {
        self.ingest_file = file;
        self.mark_dirty();
    }

    /// Builds a submission from the form. Returns `None` when there is
    /// neither text nor a file to send.
    pub(crate) fn begin_ingest(&mut self) -> Option<(RequestId, IngestSubmission)> {
        let text = (!self.ingest_text.is_empty()).then(|| self.ingest_text.clone());
        let file = self.ingest_file.clone();
        if text.is_none() && file.is_none() {
            return None;
        }
        let source = if self.ingest_source.is_empty() {
            DEFAULT_SOURCE.to_string()
        } else {
            self.ingest_source.clone()
        };
        self.ingest_status = Some(IngestStatus::Processing);
        self.mark_dirty();
        let request_id = self.next_request_id();
        self.pending_ingest = Some(request_id);
        Some((request_id, IngestSubmission { text, file, source }))
    }

    pub(crate) fn complete_ingest(&mut self, request_id: RequestId, result: IngestResult) -> bool {
        if self.pending_ingest != Some(request_id) {
            return false;
        }
        self.pending_ingest = None;
        if result == IngestResult::Succeeded {
            self.ingest_text.clear();
            self.ingest_file = None;
        }
        self.ingest_status = Some(result.into());
        self.mark_dirty();
        true
    }

    fn push_entry(&mut self, sender: Sender, text: String) {
        self.transcript.push(TranscriptEntry { sender, text });
        self.mark_dirty();
    }
}
