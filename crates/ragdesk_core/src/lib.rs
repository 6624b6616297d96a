//! RagDesk core: pure state machine, view model and rendering projections.
mod debug_panel;
mod effect;
mod msg;
mod state;
mod update;
mod view_binding;
mod view_model;

pub use debug_panel::{
    escape_prompt, render_debug, DebugPanel, DebugRegion, DocEntry, RetrievedDocs, LOADING_ANSWER,
    LOADING_DOCS, LOADING_PROMPT, NO_RELEVANT_DOCUMENTS,
};
pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AppState, ChatOutcome, ChatReply, HealthState, IngestResult, IngestStatus, IngestSubmission,
    RequestId, SelectedFile, Sender, Subsystem, Tab, TranscriptEntry, CHAT_ERROR_MESSAGE,
    DEFAULT_SOURCE,
};
pub use update::update;
pub use view_binding::{present, ViewBinding};
pub use view_model::{AppViewModel, IndicatorView, IngestFormView};
