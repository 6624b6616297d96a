use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use ragdesk_logging::{rag_debug, rag_info};

use crate::{EngineEvent, EventSink, RagApi, DEFAULT_POLL_INTERVAL};

/// Runs one health check. Every failure, whatever its kind, reads as offline.
pub async fn check_health(api: &dyn RagApi) -> bool {
    match api.health().await {
        Ok(()) => true,
        Err(err) => {
            rag_debug!("health check failed: {}", err);
            false
        }
    }
}

/// Periodic health checking.
///
/// The first check runs immediately, later ones every `interval`. Each check
/// is bounded by one interval: a check still pending when the next one is
/// due is abandoned and reported as offline, so a hung backend cannot stall
/// the indicators.
pub struct StatusPoller;

impl StatusPoller {
    /// Spawns the polling task on the current tokio runtime.
    pub fn spawn(
        api: Arc<dyn RagApi>,
        interval: Duration,
        sink: Arc<dyn EventSink>,
    ) -> PollerHandle {
        let period = if interval.is_zero() {
            DEFAULT_POLL_INTERVAL
        } else {
            interval
        };
        let token = CancellationToken::new();
        let cancelled = token.clone();

        let task = tokio::spawn(async move {
            rag_info!("status poller started, interval {:?}", period);
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => {}
                }
                let online = tokio::select! {
                    _ = cancelled.cancelled() => break,
                    checked = tokio::time::timeout(period, check_health(api.as_ref())) => {
                        checked.unwrap_or_else(|_| {
                            rag_debug!("health check still pending after {:?}", period);
                            false
                        })
                    }
                };
                sink.emit(EngineEvent::HealthChecked { online });
            }
            rag_info!("status poller stopped");
        });

        PollerHandle {
            token,
            task: Some(task),
        }
    }
}

/// Teardown handle for a running poller. Dropping it stops the poller too.
pub struct PollerHandle {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    pub fn stop(&self) {
        self.token.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Stops the poller and waits for its task to exit.
    pub async fn shutdown(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
