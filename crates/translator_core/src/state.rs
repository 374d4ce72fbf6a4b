use std::fmt;
use std::path::PathBuf;

use translator_logging::app_debug;

use crate::view_model::AppViewModel;
use crate::{truncate_display_name, validate_file, ClientConfig, SelectedFile, ValidationError};

/// Local identifier of one submission attempt.
pub type JobId = u64;

/// Server-side identifier of an accepted job. Opaque to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id percent-encoded as one URL path segment.
    pub fn path_segment(&self) -> String {
        urlencoding::encode(&self.0).into_owned()
    }

    /// Empty and dot-only ids cannot name a path segment, even encoded.
    pub fn is_usable(&self) -> bool {
        !self.0.is_empty() && self.0 != "." && self.0 != ".."
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    AwaitingUpload,
    FileSelected,
    Translating,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub current_page: u32,
    pub total_pages: u32,
}

impl ProgressSnapshot {
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        Self {
            current_page,
            total_pages,
        }
    }

    /// A total of zero means the service has not counted the pages yet.
    ///
    /// The engine's `PageProgress::is_complete` applies the same rule to the
    /// wire payload; the two must agree.
    pub fn is_complete(&self) -> bool {
        self.total_pages > 0 && self.current_page >= self.total_pages
    }
}

/// The one active job. Dropping it is how cancel, reset and errors discard the handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct JobContext {
    pub(crate) job_id: JobId,
    pub(crate) file_name: String,
    pub(crate) extension: String,
    pub(crate) document_id: Option<DocumentId>,
    pub(crate) total_pages: Option<u32>,
    pub(crate) snapshot: Option<ProgressSnapshot>,
    pub(crate) polling: bool,
}

/// What is left of a job once it completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedJob {
    pub job_id: JobId,
    pub document_id: DocumentId,
    pub download_url: String,
    pub file_name: String,
    pub total_pages: u32,
    pub saved_to: Option<PathBuf>,
    pub download_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    config: ClientConfig,
    stage: UiState,
    selected: Option<SelectedFile>,
    language: Option<String>,
    job: Option<JobContext>,
    completed: Option<CompletedJob>,
    error: Option<String>,
    last_job_id: JobId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn stage(&self) -> UiState {
        self.stage
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn completed(&self) -> Option<&CompletedJob> {
        self.completed.as_ref()
    }

    pub fn active_job_id(&self) -> Option<JobId> {
        self.job.as_ref().map(|job| job.job_id)
    }

    pub fn is_polling(&self) -> bool {
        self.job.as_ref().is_some_and(|job| job.polling)
    }

    pub fn view(&self) -> AppViewModel {
        let display = self.config.display;
        let file_name = self
            .selected
            .as_ref()
            .map(|file| file.name.as_str())
            .or_else(|| self.job.as_ref().map(|job| job.file_name.as_str()))
            .map(|name| truncate_display_name(name, display.max_len, display.tail_len));

        let (progress_percent, current_page, total_pages, document_id) = match &self.job {
            Some(job) if job.document_id.is_some() => (
                self.config.progress.percent(job.snapshot),
                job.snapshot.map(|s| s.current_page),
                job.snapshot.map(|s| s.total_pages).or(job.total_pages),
                job.document_id.clone(),
            ),
            Some(_) => (0.0, None, None, None),
            None => match &self.completed {
                Some(done) if self.stage == UiState::Complete => (
                    self.config.progress.floor_percent + self.config.progress.scale_percent,
                    Some(done.total_pages),
                    Some(done.total_pages),
                    Some(done.document_id.clone()),
                ),
                _ => (0.0, None, None, None),
            },
        };

        let completed = self
            .completed
            .as_ref()
            .filter(|_| self.stage == UiState::Complete);

        AppViewModel {
            stage: self.stage,
            file_name,
            language: self.language.clone(),
            progress_percent,
            current_page,
            total_pages,
            document_id,
            error: self.error.clone(),
            download_url: completed.map(|done| done.download_url.clone()),
            saved_to: completed.and_then(|done| done.saved_to.clone()),
            download_error: completed.and_then(|done| done.download_error.clone()),
            dirty: self.dirty,
        }
    }

    /// Returns the dirty flag and clears it.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// True when there is nothing for a reset to clear.
    pub(crate) fn is_pristine(&self) -> bool {
        self.stage == UiState::AwaitingUpload
            && self.selected.is_none()
            && self.language.is_none()
            && self.job.is_none()
            && self.completed.is_none()
            && self.error.is_none()
    }

    pub(crate) fn select_file(&mut self, file: SelectedFile) -> Result<(), ValidationError> {
        match validate_file(&file, &self.config.limits) {
            Ok(()) => {
                self.selected = Some(file);
                self.error = None;
                self.stage = UiState::FileSelected;
                self.mark_dirty();
                Ok(())
            }
            Err(err) => {
                self.selected = None;
                self.error = Some(err.to_string());
                self.stage = UiState::AwaitingUpload;
                self.mark_dirty();
                Err(err)
            }
        }
    }

    pub(crate) fn set_language(&mut self, code: String) {
        self.language = Some(code);
        self.mark_dirty();
    }

    pub(crate) fn show_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.mark_dirty();
    }

    /// Opens a new job for the selected file. The caller has checked the guards.
    pub(crate) fn begin_job(&mut self, file: &SelectedFile) -> JobId {
        self.last_job_id += 1;
        let job_id = self.last_job_id;
        self.job = Some(JobContext {
            job_id,
            file_name: file.name.clone(),
            extension: file.extension().unwrap_or_default(),
            document_id: None,
            total_pages: None,
            snapshot: None,
            polling: false,
        });
        self.completed = None;
        self.error = None;
        self.stage = UiState::Translating;
        self.mark_dirty();
        job_id
    }

    /// The active job, if `job_id` still names it.
    pub(crate) fn job_mut(&mut self, job_id: JobId) -> Option<&mut JobContext> {
        match self.job.as_mut() {
            Some(job) if job.job_id == job_id => Some(job),
            Some(job) => {
                app_debug!(
                    "Ignoring message for stale job {} (active job {})",
                    job_id,
                    job.job_id
                );
                None
            }
            None => {
                app_debug!("Ignoring message for discarded job {}", job_id);
                None
            }
        }
    }

    /// Discards the active job and returns to `AwaitingUpload`.
    ///
    /// Returns the job so the caller can decide whether a poll loop must be stopped.
    pub(crate) fn abandon_job(&mut self, error: Option<String>) -> Option<JobContext> {
        let job = self.job.take();
        self.selected = None;
        self.error = error;
        self.stage = UiState::AwaitingUpload;
        self.mark_dirty();
        job
    }

    /// Moves the active job to `Complete` and remembers where its result lives.
    pub(crate) fn complete_job(&mut self) -> Option<CompletedJob> {
        let job = self.job.take()?;
        let document_id = job.document_id?;
        let download_url = self.config.result_path.render(&document_id, &job.extension);
        let segment = document_id.path_segment();
        let file_name = match job.extension.trim_start_matches('.') {
            "" => format!("translated_{segment}"),
            ext => format!("translated_{segment}.{ext}"),
        };
        let completed = CompletedJob {
            job_id: job.job_id,
            document_id,
            download_url,
            file_name,
            total_pages: job.snapshot.map(|s| s.total_pages).unwrap_or_default(),
            saved_to: None,
            download_error: None,
        };
        self.completed = Some(completed.clone());
        self.selected = None;
        self.stage = UiState::Complete;
        self.mark_dirty();
        Some(completed)
    }

    pub(crate) fn record_download(&mut self, job_id: JobId, result: Result<PathBuf, String>) {
        let Some(done) = self.completed.as_mut().filter(|done| done.job_id == job_id) else {
            app_debug!("Ignoring download result for job {}", job_id);
            return;
        };
        match result {
            Ok(path) => {
                done.saved_to = Some(path);
                done.download_error = None;
            }
            Err(message) => {
                done.download_error = Some(message);
            }
        }
        self.mark_dirty();
    }

    pub(crate) fn clear_form(&mut self) {
        self.selected = None;
        self.language = None;
        self.error = None;
        self.completed = None;
        self.job = None;
        self.stage = UiState::AwaitingUpload;
        self.mark_dirty();
    }
}
