#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ragdesk_engine::{ApiError, AskAnswer, EngineEvent, EventSink, FailureKind, FileUpload, RagApi};

#[derive(Default)]
pub struct TestSink {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl TestSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Scripted backend. Health results are consumed in order, the last one
/// repeats. Questions starting with `slow` take `slow_delay` to answer.
pub struct ScriptedApi {
    health: Mutex<VecDeque<bool>>,
    pub health_calls: AtomicUsize,
    pub ask_calls: AtomicUsize,
    slow_delay: Duration,
}

impl ScriptedApi {
    pub fn new(health: &[bool]) -> Self {
        Self {
            health: Mutex::new(health.iter().copied().collect()),
            health_calls: AtomicUsize::new(0),
            ask_calls: AtomicUsize::new(0),
            slow_delay: Duration::from_millis(400),
        }
    }
}

#[async_trait::async_trait]
impl RagApi for ScriptedApi {
    async fn health(&self) -> Result<(), ApiError> {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        let up = {
            let mut script = self.health.lock().unwrap();
            if script.len() > 1 {
                script.pop_front().unwrap_or(true)
            } else {
                script.front().copied().unwrap_or(true)
            }
        };
        if up {
            Ok(())
        } else {
            Err(ApiError {
                kind: FailureKind::Network,
                message: "connection refused".to_string(),
            })
        }
    }

    async fn ask(&self, question: &str) -> Result<AskAnswer, ApiError> {
        self.ask_calls.fetch_add(1, Ordering::SeqCst);
        if question.starts_with("slow") {
            tokio::time::sleep(self.slow_delay).await;
        }
        Ok(AskAnswer {
            answer: format!("answer to {question}"),
            retrieved_docs: Vec::new(),
            built_prompt: format!("USER: {question}"),
        })
    }

    async fn ingest_texts(&self, _texts: &[String], _source: &str) -> Result<(), ApiError> {
        Ok(())
    }

    async fn ingest_file(&self, _file: &FileUpload) -> Result<(), ApiError> {
        Ok(())
    }
}
