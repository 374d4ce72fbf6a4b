//! Translator engine: HTTP calls to the translation service and effect execution.
mod engine;
mod persist;
mod poll;
mod service;
mod types;
mod wire;

pub use engine::{EngineHandle, EngineSettings};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use poll::{poll_until_done, ChannelEventSink, EventSink, RetryPolicy};
pub use service::{ReqwestTranslationService, ServiceSettings, TranslationService};
pub use types::{
    EngineEvent, FailureKind, JobId, PageProgress, ServiceError, UploadReceipt, UploadRequest,
};
pub use wire::{ProgressResponse, UploadResponse};
