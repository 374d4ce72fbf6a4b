use std::time::Duration;

use translator_core::{DocumentId, Effect, Msg, ProgressSnapshot};
use translator_engine::{EngineEvent, EngineHandle, UploadRequest};
use translator_logging::{app_info, app_warn};

/// Executes core effects on the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitUpload {
                    job_id,
                    file,
                    language,
                } => {
                    app_info!(
                        "SubmitUpload job_id={} file={} language={}",
                        job_id,
                        file.path.display(),
                        language
                    );
                    self.engine.submit(
                        job_id,
                        UploadRequest {
                            path: file.path,
                            file_name: file.name,
                            language,
                        },
                    );
                }
                Effect::StartPolling {
                    job_id,
                    document_id,
                    interval,
                } => {
                    self.engine
                        .start_polling(job_id, document_id.as_str(), interval);
                }
                Effect::StopPolling { job_id } => {
                    self.engine.stop_polling(job_id);
                }
                Effect::DownloadResult {
                    job_id,
                    url,
                    file_name,
                } => {
                    app_info!("DownloadResult job_id={} url={}", job_id, url);
                    self.engine.download(job_id, url, file_name);
                }
            }
        }
    }

    pub fn next_msg(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(map_event)
    }
}

pub fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::UploadFinished { job_id, result } => match result {
            Ok(receipt) => Msg::UploadAccepted {
                job_id,
                document_id: DocumentId::new(receipt.document_id),
                total_pages: receipt.total_pages,
            },
            Err(err) => {
                app_warn!("Upload of job {} failed: {}", job_id, err);
                Msg::UploadRejected {
                    job_id,
                    message: err.user_message(),
                }
            }
        },
        EngineEvent::Progress { job_id, result } => match result {
            Ok(progress) => Msg::ProgressReported {
                job_id,
                snapshot: ProgressSnapshot::new(progress.current_page, progress.total_pages),
            },
            Err(err) => Msg::ProgressFailed {
                job_id,
                message: err.user_message(),
            },
        },
        EngineEvent::DownloadFinished { job_id, result } => Msg::DownloadFinished {
            job_id,
            result: result.map_err(|err| err.user_message()),
        },
    }
}
