use std::time::Duration;

use translator_logging::{app_debug, app_warn};

use crate::{EngineEvent, JobId, PageProgress, ServiceError, TranslationService};

/// Receives engine events as they happen.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Retries for transport failures while polling. Service-reported errors are never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(8),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (0-based), doubling up to `max_backoff`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.initial_backoff
            .checked_mul(factor)
            .unwrap_or(self.max_backoff)
            .min(self.max_backoff)
    }
}

/// Polls the progress endpoint every `interval` until the job completes or fails.
///
/// Each poll waits for the previous response, so requests never overlap. Every
/// outcome is emitted to `sink`; the loop ends after a complete snapshot or an error.
pub async fn poll_until_done(
    service: &dyn TranslationService,
    job_id: JobId,
    document_id: &str,
    interval: Duration,
    retry: &RetryPolicy,
    sink: &dyn EventSink,
) {
    loop {
        tokio::time::sleep(interval).await;
        match poll_once(service, job_id, document_id, retry).await {
            Ok(progress) => {
                app_debug!(
                    "Job {} progress {}/{}",
                    job_id,
                    progress.current_page,
                    progress.total_pages
                );
                let done = progress.is_complete();
                sink.emit(EngineEvent::Progress {
                    job_id,
                    result: Ok(progress),
                });
                if done {
                    return;
                }
            }
            Err(err) => {
                sink.emit(EngineEvent::Progress {
                    job_id,
                    result: Err(err),
                });
                return;
            }
        }
    }
}

async fn poll_once(
    service: &dyn TranslationService,
    job_id: JobId,
    document_id: &str,
    retry: &RetryPolicy,
) -> Result<PageProgress, ServiceError> {
    let mut attempt = 0;
    loop {
        match service.progress(document_id).await {
            Ok(progress) => return Ok(progress),
            Err(err) if err.is_transient() && attempt < retry.max_retries => {
                let delay = retry.backoff(attempt);
                app_warn!(
                    "Job {} poll failed ({}), retry {} of {} in {:?}",
                    job_id,
                    err,
                    attempt + 1,
                    retry.max_retries,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
