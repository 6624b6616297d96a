use std::fmt;

use serde::Deserialize;
use thiserror::Error;

pub type RequestId = u64;

/// Body of a successful `/ask` response. Extra fields (such as the structured
/// `context`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AskAnswer {
    pub answer: String,
    pub retrieved_docs: Vec<String>,
    pub built_prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestRequest {
    pub text: Option<String>,
    pub file: Option<FileUpload>,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    Succeeded,
    FileRejected { detail: String },
    Failed,
    /// Transport or body failure; carries the diagnostic message.
    ConnectionError(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    HealthChecked {
        online: bool,
    },
    AskCompleted {
        request_id: RequestId,
        result: Result<AskAnswer, ApiError>,
    },
    IngestCompleted {
        request_id: RequestId,
        outcome: IngestOutcome,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// True for failures where a response with an error status arrived.
    pub fn is_http_status(&self) -> bool {
        matches!(
            self.kind,
            FailureKind::HttpStatus(_) | FailureKind::Rejected { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Network,
    Timeout,
    HttpStatus(u16),
    MalformedBody,
    /// Error status carrying a server-provided `detail`.
    Rejected { status: u16, detail: String },
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::MalformedBody => write!(f, "malformed response body"),
            FailureKind::Rejected { status, detail } => {
                write!(f, "rejected with status {status}: {detail}")
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("api client setup failed: {0}")]
    Api(#[from] ApiError),
    #[error("failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
