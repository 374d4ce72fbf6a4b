use std::fmt;
use std::path::PathBuf;

pub type JobId = u64;

/// What the engine needs to submit one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub path: PathBuf,
    pub file_name: String,
    pub language: String,
}

/// The service accepted an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub document_id: String,
    pub total_pages: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageProgress {
    pub current_page: u32,
    pub total_pages: u32,
}

impl PageProgress {
    /// Same rule as `ProgressSnapshot::is_complete` in the core crate: a
    /// zero total is never complete.
    pub fn is_complete(&self) -> bool {
        self.total_pages > 0 && self.current_page >= self.total_pages
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    UploadFinished {
        job_id: JobId,
        result: Result<UploadReceipt, ServiceError>,
    },
    Progress {
        job_id: JobId,
        result: Result<PageProgress, ServiceError>,
    },
    DownloadFinished {
        job_id: JobId,
        result: Result<PathBuf, ServiceError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    pub kind: FailureKind,
    pub message: String,
}

impl ServiceError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Text suitable for the single user-visible message area.
    ///
    /// Errors reported by the service are shown verbatim.
    pub fn user_message(&self) -> String {
        match self.kind {
            FailureKind::Rejected => self.message.clone(),
            _ => format!("{}: {}", self.kind, self.message),
        }
    }

    /// Transport-level failures that a retry might cure.
    pub fn is_transient(&self) -> bool {
        match self.kind {
            FailureKind::Network | FailureKind::Timeout => true,
            FailureKind::HttpStatus(code) => code >= 500,
            _ => false,
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ServiceError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    /// Response body did not match the expected JSON shape.
    Decode,
    /// The service answered with an explicit error.
    Rejected,
    MissingToken,
    Io,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "unexpected response"),
            FailureKind::Rejected => write!(f, "rejected by service"),
            FailureKind::MissingToken => write!(f, "missing anti-forgery token"),
            FailureKind::Io => write!(f, "io error"),
        }
    }
}
