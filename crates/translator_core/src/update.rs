use translator_logging::{app_debug, app_info, app_warn};

use crate::{find_language, AppState, Effect, Msg, UiState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileChosen(file) => {
            match state.stage() {
                UiState::AwaitingUpload | UiState::FileSelected => {}
                UiState::Translating | UiState::Complete => {
                    return (state, Vec::new());
                }
            }
            if let Err(err) = state.select_file(file) {
                app_info!("File rejected: {}", err);
            }
            Vec::new()
        }
        Msg::LanguageChosen(code) => {
            if state.stage() != UiState::Translating {
                state.set_language(code.trim().to_ascii_uppercase());
            }
            Vec::new()
        }
        Msg::StartClicked => start_translation(&mut state),
        Msg::UploadAccepted {
            job_id,
            document_id,
            total_pages,
        } => {
            let interval = state.config().poll_interval();
            if !document_id.is_usable() {
                if !matches!(state.job_mut(job_id), Some(job) if job.document_id.is_none()) {
                    return (state, Vec::new());
                }
                app_warn!(
                    "Job {} accepted with unusable document id {:?}",
                    job_id,
                    document_id.as_str()
                );
                state.abandon_job(Some(
                    "The service returned an invalid document id.".to_string(),
                ));
                return (state, Vec::new());
            }
            match state.job_mut(job_id) {
                Some(job) if job.document_id.is_none() => {
                    app_info!("Job {} accepted as document {}", job_id, document_id);
                    job.document_id = Some(document_id.clone());
                    job.total_pages = total_pages;
                    job.polling = true;
                    state.mark_dirty();
                    vec![Effect::StartPolling {
                        job_id,
                        document_id,
                        interval,
                    }]
                }
                _ => Vec::new(),
            }
        }
        Msg::UploadRejected { job_id, message } => {
            if state.job_mut(job_id).is_none() {
                return (state, Vec::new());
            }
            app_warn!("Upload for job {} failed: {}", job_id, message);
            // Polling never started for a rejected upload.
            state.abandon_job(Some(message));
            Vec::new()
        }
        Msg::ProgressReported { job_id, snapshot } => {
            let Some(job) = state.job_mut(job_id) else {
                return (state, Vec::new());
            };
            if job.document_id.is_none() {
                return (state, Vec::new());
            }
            let snapshot = match job.snapshot {
                Some(previous)
                    if previous.total_pages == snapshot.total_pages
                        && previous.current_page > snapshot.current_page =>
                {
                    app_warn!(
                        "Job {} progress went back from page {} to {}; keeping {}",
                        job_id,
                        previous.current_page,
                        snapshot.current_page,
                        previous.current_page
                    );
                    previous
                }
                _ => snapshot,
            };
            job.snapshot = Some(snapshot);
            job.total_pages = Some(snapshot.total_pages);
            state.mark_dirty();

            if !snapshot.is_complete() {
                return (state, Vec::new());
            }
            match state.complete_job() {
                Some(done) => {
                    app_info!(
                        "Job {} complete, result at {}",
                        job_id,
                        done.download_url
                    );
                    vec![
                        Effect::StopPolling { job_id },
                        Effect::DownloadResult {
                            job_id,
                            url: done.download_url,
                            file_name: done.file_name,
                        },
                    ]
                }
                None => Vec::new(),
            }
        }
        Msg::ProgressFailed { job_id, message } => {
            if state.job_mut(job_id).is_none() {
                return (state, Vec::new());
            }
            app_warn!("Progress check for job {} failed: {}", job_id, message);
            stop_effects(state.abandon_job(Some(message)))
        }
        Msg::CancelClicked => {
            if state.stage() != UiState::Translating {
                return (state, Vec::new());
            }
            app_info!("Translation cancelled by user");
            let effects = stop_effects(state.abandon_job(None));
            state.clear_form();
            effects
        }
        Msg::ResetClicked => {
            if state.is_pristine() {
                return (state, Vec::new());
            }
            let effects = if state.stage() == UiState::Translating {
                stop_effects(state.abandon_job(None))
            } else {
                Vec::new()
            };
            state.clear_form();
            effects
        }
        Msg::DownloadClicked => match state.completed() {
            Some(done) if state.stage() == UiState::Complete => vec![Effect::DownloadResult {
                job_id: done.job_id,
                url: done.download_url.clone(),
                file_name: done.file_name.clone(),
            }],
            _ => Vec::new(),
        },
        Msg::DownloadFinished { job_id, result } => {
            state.record_download(job_id, result);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn start_translation(state: &mut AppState) -> Vec<Effect> {
    if state.stage() != UiState::FileSelected {
        return Vec::new();
    }
    let Some(file) = state.selected_file().cloned() else {
        return Vec::new();
    };
    let Some(code) = state.language().map(ToOwned::to_owned) else {
        state.show_error("Please choose a target language.");
        return Vec::new();
    };
    if find_language(&code).is_none() {
        state.show_error(format!("Unsupported target language: {code}."));
        return Vec::new();
    }

    let job_id = state.begin_job(&file);
    app_info!(
        "Submitting job {} file={} bytes={} language={}",
        job_id,
        file.name,
        file.size_bytes,
        code
    );
    vec![Effect::SubmitUpload {
        job_id,
        file,
        language: code,
    }]
}

fn stop_effects(job: Option<crate::state::JobContext>) -> Vec<Effect> {
    match job {
        Some(job) if job.polling => vec![Effect::StopPolling { job_id: job.job_id }],
        Some(job) => {
            app_debug!("Job {} discarded before polling started", job.job_id);
            Vec::new()
        }
        None => Vec::new(),
    }
}
