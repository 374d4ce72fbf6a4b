use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use tokio::task::JoinHandle;
use translator_logging::{app_debug, app_error, app_info};

use crate::persist::AtomicFileWriter;
use crate::poll::{poll_until_done, ChannelEventSink, EventSink, RetryPolicy};
use crate::service::{ReqwestTranslationService, ServiceSettings, TranslationService};
use crate::{EngineEvent, FailureKind, JobId, ServiceError, UploadRequest};

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub service: ServiceSettings,
    pub output_dir: PathBuf,
    pub retry: RetryPolicy,
}

impl EngineSettings {
    pub fn default_with_output(output_dir: PathBuf) -> Self {
        Self {
            service: ServiceSettings::default(),
            output_dir,
            retry: RetryPolicy::default(),
        }
    }
}

enum EngineCommand {
    Submit {
        job_id: JobId,
        request: UploadRequest,
    },
    StartPolling {
        job_id: JobId,
        document_id: String,
        interval: Duration,
    },
    StopPolling {
        job_id: JobId,
    },
    Download {
        job_id: JobId,
        url: String,
        file_name: String,
    },
}

/// The single running poll loop, if any.
struct ActivePoll {
    job_id: JobId,
    task: JoinHandle<()>,
}

pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: EngineSettings) -> Result<Self, ServiceError> {
        let service = Arc::new(ReqwestTranslationService::new(settings.service.clone())?);
        Self::with_service(service, settings)
    }

    pub fn with_service(
        service: Arc<dyn TranslationService>,
        settings: EngineSettings,
    ) -> Result<Self, ServiceError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|err| ServiceError::new(FailureKind::Io, err.to_string()))?;

        thread::spawn(move || {
            let mut active: Option<ActivePoll> = None;
            while let Ok(command) = cmd_rx.recv() {
                handle_command(
                    &runtime,
                    &service,
                    &settings,
                    &mut active,
                    command,
                    &event_tx,
                );
            }
            if let Some(poll) = active.take() {
                poll.task.abort();
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn submit(&self, job_id: JobId, request: UploadRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Submit { job_id, request });
    }

    /// Starts polling for `job_id`, aborting any poll loop that is still running.
    pub fn start_polling(&self, job_id: JobId, document_id: impl Into<String>, interval: Duration) {
        let _ = self.cmd_tx.send(EngineCommand::StartPolling {
            job_id,
            document_id: document_id.into(),
            interval,
        });
    }

    /// Stops the poll loop for `job_id`. Does nothing if it is not running.
    pub fn stop_polling(&self, job_id: JobId) {
        let _ = self.cmd_tx.send(EngineCommand::StopPolling { job_id });
    }

    pub fn download(&self, job_id: JobId, url: impl Into<String>, file_name: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Download {
            job_id,
            url: url.into(),
            file_name: file_name.into(),
        });
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn handle_command(
    runtime: &tokio::runtime::Runtime,
    service: &Arc<dyn TranslationService>,
    settings: &EngineSettings,
    active: &mut Option<ActivePoll>,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Submit { job_id, request } => {
            let service = service.clone();
            let sink = ChannelEventSink::new(event_tx.clone());
            runtime.spawn(async move {
                let result = service.submit(&request).await;
                sink.emit(EngineEvent::UploadFinished { job_id, result });
            });
        }
        EngineCommand::StartPolling {
            job_id,
            document_id,
            interval,
        } => {
            if let Some(previous) = active.take() {
                app_debug!("Replacing poll loop of job {}", previous.job_id);
                previous.task.abort();
            }
            app_info!("Polling document {} every {:?}", document_id, interval);
            let service = service.clone();
            let retry = settings.retry;
            let sink = ChannelEventSink::new(event_tx.clone());
            let task = runtime.spawn(async move {
                poll_until_done(
                    service.as_ref(),
                    job_id,
                    &document_id,
                    interval,
                    &retry,
                    &sink,
                )
                .await;
            });
            *active = Some(ActivePoll { job_id, task });
        }
        EngineCommand::StopPolling { job_id } => match active.take() {
            Some(poll) if poll.job_id == job_id => {
                app_debug!("Stopping poll loop of job {}", job_id);
                poll.task.abort();
            }
            other => *active = other,
        },
        EngineCommand::Download {
            job_id,
            url,
            file_name,
        } => {
            let service = service.clone();
            let writer = AtomicFileWriter::new(settings.output_dir.clone());
            let sink = ChannelEventSink::new(event_tx.clone());
            runtime.spawn(async move {
                let result = match service.download(&url).await {
                    Ok(bytes) => writer
                        .write(&file_name, &bytes)
                        .map_err(|err| ServiceError::new(FailureKind::Io, err.to_string())),
                    Err(err) => Err(err),
                };
                if let Err(err) = &result {
                    app_error!("Download of {} failed: {}", url, err);
                }
                sink.emit(EngineEvent::DownloadFinished { job_id, result });
            });
        }
    }
}
