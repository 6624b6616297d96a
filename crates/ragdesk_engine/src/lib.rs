//! RagDesk engine: backend API client and effect execution.
mod api;
mod engine;
mod ingest;
mod poller;
mod settings;
mod sink;
mod types;

pub use api::{RagApi, ReqwestRagApi};
pub use engine::EngineHandle;
pub use ingest::run_ingest;
pub use poller::{check_health, PollerHandle, StatusPoller};
pub use settings::{ClientSettings, DEFAULT_BASE_URL, DEFAULT_POLL_INTERVAL};
pub use sink::{ChannelEventSink, EventSink};
pub use types::{
    ApiError, AskAnswer, EngineError, EngineEvent, FailureKind, FileUpload, IngestOutcome,
    IngestRequest, RequestId,
};
