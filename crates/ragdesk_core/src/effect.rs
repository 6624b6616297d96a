use crate::{IngestSubmission, RequestId};

/// Side effects requested by `update`; executed by the front-end's runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send a question to the backend.
    Ask {
        request_id: RequestId,
        question: String,
    },
    /// Submit text and/or a file for ingestion.
    Ingest {
        request_id: RequestId,
        submission: IngestSubmission,
    },
}
