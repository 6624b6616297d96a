use std::sync::{mpsc, Arc};

use ragdesk_core::{ChatOutcome, ChatReply, Effect, IngestResult, Msg, SelectedFile};
use ragdesk_engine::{
    ApiError, AskAnswer, ClientSettings, EngineError, EngineEvent, EngineHandle, EventSink,
    FileUpload, IngestOutcome, IngestRequest,
};
use ragdesk_logging::{rag_error, rag_info, rag_warn};

use super::app::LoopEvent;

/// Executes core effects on the engine and feeds engine events back as
/// messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: &ClientSettings, tx: mpsc::Sender<LoopEvent>) -> Result<Self, EngineError> {
        let sink = Arc::new(MsgSink { tx });
        let engine = EngineHandle::new(settings, sink)?;
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Ask {
                    request_id,
                    question,
                } => {
                    rag_info!("Ask request_id={} question_len={}", request_id, question.len());
                    self.engine.ask(request_id, question);
                }
                Effect::Ingest {
                    request_id,
                    submission,
                } => {
                    rag_info!(
                        "Ingest request_id={} text={} file={:?} source={}",
                        request_id,
                        submission.text.is_some(),
                        submission.file.as_ref().map(|file| file.name.as_str()),
                        submission.source
                    );
                    self.engine.ingest(
                        request_id,
                        IngestRequest {
                            text: submission.text,
                            file: submission.file.map(to_upload),
                            source: submission.source,
                        },
                    );
                }
            }
        }
    }

    pub fn shutdown(self) {
        self.engine.shutdown();
    }
}

struct MsgSink {
    tx: mpsc::Sender<LoopEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(LoopEvent::Msg(map_event(event)));
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::HealthChecked { online } => Msg::HealthChecked { online },
        EngineEvent::AskCompleted { request_id, result } => Msg::ChatCompleted {
            request_id,
            outcome: map_ask_result(request_id, result),
        },
        EngineEvent::IngestCompleted {
            request_id,
            outcome,
        } => Msg::IngestCompleted {
            request_id,
            result: map_ingest_outcome(request_id, outcome),
        },
    }
}

fn map_ask_result(request_id: u64, result: Result<AskAnswer, ApiError>) -> ChatOutcome {
    match result {
        Ok(answer) => ChatOutcome::Answered(ChatReply {
            answer: answer.answer,
            retrieved_docs: answer.retrieved_docs,
            built_prompt: answer.built_prompt,
        }),
        Err(err) => {
            rag_error!("Ask request_id={} failed: {}", request_id, err);
            ChatOutcome::Failed
        }
    }
}

fn map_ingest_outcome(request_id: u64, outcome: IngestOutcome) -> IngestResult {
    match outcome {
        IngestOutcome::Succeeded => IngestResult::Succeeded,
        IngestOutcome::FileRejected { detail } => IngestResult::FileRejected { detail },
        IngestOutcome::Failed => {
            rag_warn!("Ingest request_id={} was refused by the backend", request_id);
            IngestResult::Failed
        }
        IngestOutcome::ConnectionError(message) => {
            rag_error!("Ingest request_id={} failed: {}", request_id, message);
            IngestResult::ConnectionFailed
        }
    }
}

fn to_upload(file: SelectedFile) -> FileUpload {
    FileUpload {
        file_name: file.name,
        content: file.bytes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ragdesk_engine::FailureKind;

    #[test]
    fn ask_failures_collapse_to_failed() {
        let err = ApiError {
            kind: FailureKind::HttpStatus(500),
            message: "500 Internal Server Error".to_string(),
        };
        assert_eq!(map_ask_result(1, Err(err)), ChatOutcome::Failed);
    }

    #[test]
    fn answers_keep_debug_artifacts() {
        let msg = map_event(EngineEvent::AskCompleted {
            request_id: 4,
            result: Ok(AskAnswer {
                answer: "42".to_string(),
                retrieved_docs: vec!["A".to_string()],
                built_prompt: "<x>".to_string(),
            }),
        });
        assert_eq!(
            msg,
            Msg::ChatCompleted {
                request_id: 4,
                outcome: ChatOutcome::Answered(ChatReply {
                    answer: "42".to_string(),
                    retrieved_docs: vec!["A".to_string()],
                    built_prompt: "<x>".to_string(),
                }),
            }
        );
    }

    #[test]
    fn ingest_outcomes_map_one_to_one() {
        let cases = [
            (IngestOutcome::Succeeded, IngestResult::Succeeded),
            (
                IngestOutcome::FileRejected {
                    detail: "bad format".to_string(),
                },
                IngestResult::FileRejected {
                    detail: "bad format".to_string(),
                },
            ),
            (IngestOutcome::Failed, IngestResult::Failed),
            (
                IngestOutcome::ConnectionError("refused".to_string()),
                IngestResult::ConnectionFailed,
            ),
        ];
        for (outcome, expected) in cases {
            assert_eq!(map_ingest_outcome(9, outcome), expected);
        }
    }

    #[test]
    fn health_events_pass_through() {
        assert_eq!(
            map_event(EngineEvent::HealthChecked { online: false }),
            Msg::HealthChecked { online: false }
        );
    }
}
