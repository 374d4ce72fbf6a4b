//! Translator core: pure upload/progress state machine and view-model helpers.
mod config;
mod effect;
mod file;
mod language;
mod msg;
mod state;
mod truncate;
mod update;
mod validate;
mod view_model;

pub use config::{ClientConfig, ProgressMapping, ResultPath, TruncationPolicy, UploadLimits};
pub use effect::Effect;
pub use file::SelectedFile;
pub use language::{find_language, Language, LANGUAGES};
pub use msg::Msg;
pub use state::{AppState, CompletedJob, DocumentId, JobId, ProgressSnapshot, UiState};
pub use truncate::truncate_display_name;
pub use update::update;
pub use validate::{validate_file, ValidationError};
pub use view_model::AppViewModel;
