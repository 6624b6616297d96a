use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use ragdesk_logging::{rag_debug, rag_info, rag_warn};

use crate::api::{RagApi, ReqwestRagApi};
use crate::ingest::run_ingest;
use crate::poller::StatusPoller;
use crate::{ClientSettings, EngineError, EngineEvent, EventSink, IngestRequest, RequestId};

enum EngineCommand {
    Ask {
        request_id: RequestId,
        question: String,
    },
    Ingest {
        request_id: RequestId,
        request: IngestRequest,
    },
    Shutdown,
}

/// Owns a background tokio runtime that polls health and executes requests.
/// Results are delivered to the `EventSink`.
pub struct EngineHandle {
    cmd_tx: mpsc::UnboundedSender<EngineCommand>,
    worker: Option<thread::JoinHandle<()>>,
}

impl EngineHandle {
    pub fn new(settings: &ClientSettings, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let api: Arc<dyn RagApi> = Arc::new(ReqwestRagApi::new(settings)?);
        Self::with_api(api, settings.poll_interval, sink)
    }

    pub fn with_api(
        api: Arc<dyn RagApi>,
        poll_interval: Duration,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("ragdesk-io")
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();

        let worker = thread::Builder::new()
            .name("ragdesk-engine".to_string())
            .spawn(move || {
                runtime.block_on(run_engine(api, poll_interval, sink, cmd_rx));
            })?;

        Ok(Self {
            cmd_tx,
            worker: Some(worker),
        })
    }

    /// Sends a question. A still-running previous question is aborted.
    pub fn ask(&self, request_id: RequestId, question: impl Into<String>) {
        self.send(EngineCommand::Ask {
            request_id,
            question: question.into(),
        });
    }

    pub fn ingest(&self, request_id: RequestId, request: IngestRequest) {
        self.send(EngineCommand::Ingest {
            request_id,
            request,
        });
    }

    /// Stops the poller, aborts an in-flight question and waits for the
    /// engine thread to exit.
    pub fn shutdown(mut self) {
        self.send(EngineCommand::Shutdown);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                rag_warn!("engine thread panicked during shutdown");
            }
        }
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            rag_warn!("engine is no longer running; command dropped");
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
    }
}

async fn run_engine(
    api: Arc<dyn RagApi>,
    poll_interval: Duration,
    sink: Arc<dyn EventSink>,
    mut cmd_rx: mpsc::UnboundedReceiver<EngineCommand>,
) {
    let poller = StatusPoller::spawn(api.clone(), poll_interval, sink.clone());
    let mut in_flight_ask: Option<JoinHandle<()>> = None;

    while let Some(command) = cmd_rx.recv().await {
        match command {
            EngineCommand::Ask {
                request_id,
                question,
            } => {
                if let Some(previous) = in_flight_ask.take() {
                    if !previous.is_finished() {
                        rag_debug!("aborting superseded question before request {}", request_id);
                        previous.abort();
                    }
                }
                let api = api.clone();
                let sink = sink.clone();
                in_flight_ask = Some(tokio::spawn(async move {
                    let result = api.ask(&question).await;
                    sink.emit(EngineEvent::AskCompleted { request_id, result });
                }));
            }
            EngineCommand::Ingest {
                request_id,
                request,
            } => {
                // Ingestion writes to the store, so it is never aborted.
                let api = api.clone();
                let sink = sink.clone();
                tokio::spawn(async move {
                    let outcome = run_ingest(api.as_ref(), &request).await;
                    sink.emit(EngineEvent::IngestCompleted {
                        request_id,
                        outcome,
                    });
                });
            }
            EngineCommand::Shutdown => break,
        }
    }

    if let Some(task) = in_flight_ask.take() {
        task.abort();
    }
    poller.shutdown().await;
    rag_info!("engine stopped");
}
