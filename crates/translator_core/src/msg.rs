use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked or dropped a file.
    FileChosen(crate::SelectedFile),
    /// User chose the target language code.
    LanguageChosen(String),
    /// User clicked "Translate".
    StartClicked,
    /// Upload endpoint accepted the job.
    UploadAccepted {
        job_id: crate::JobId,
        document_id: crate::DocumentId,
        total_pages: Option<u32>,
    },
    /// Upload endpoint refused the job, or the request itself failed.
    UploadRejected { job_id: crate::JobId, message: String },
    /// One poll of the progress endpoint succeeded.
    ProgressReported {
        job_id: crate::JobId,
        snapshot: crate::ProgressSnapshot,
    },
    /// A poll reported an error, or the request itself failed.
    ProgressFailed { job_id: crate::JobId, message: String },
    /// User abandoned the running translation.
    CancelClicked,
    /// User cleared the form.
    ResetClicked,
    /// User asked for the finished file again.
    DownloadClicked,
    /// Engine finished fetching the translated file.
    DownloadFinished {
        job_id: crate::JobId,
        result: Result<PathBuf, String>,
    },
    /// Render tick.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
