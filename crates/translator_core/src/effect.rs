use std::time::Duration;

use crate::{DocumentId, JobId, SelectedFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the file and language to the upload endpoint.
    SubmitUpload {
        job_id: JobId,
        file: SelectedFile,
        language: String,
    },
    /// Start the progress poll loop, replacing any running one.
    StartPolling {
        job_id: JobId,
        document_id: DocumentId,
        interval: Duration,
    },
    /// Stop the poll loop. No-op if it already stopped.
    StopPolling { job_id: JobId },
    /// Fetch the translated file published at `url`.
    DownloadResult {
        job_id: JobId,
        url: String,
        file_name: String,
    },
}
