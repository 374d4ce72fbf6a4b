use std::path::PathBuf;

use crate::{DocumentId, UiState};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub stage: UiState,
    /// Truncated for display; never used for submission.
    pub file_name: Option<String>,
    pub language: Option<String>,
    pub progress_percent: f32,
    pub current_page: Option<u32>,
    pub total_pages: Option<u32>,
    pub document_id: Option<DocumentId>,
    pub error: Option<String>,
    pub download_url: Option<String>,
    pub saved_to: Option<PathBuf>,
    pub download_error: Option<String>,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn status_line(&self) -> String {
        match self.stage {
            UiState::AwaitingUpload => "Choose a document to translate".to_string(),
            UiState::FileSelected => match &self.file_name {
                Some(name) => format!("Selected {name}"),
                None => "File selected".to_string(),
            },
            UiState::Translating => match (self.current_page, self.total_pages) {
                (Some(current), Some(total)) => format!("Translating page {current} of {total}"),
                (None, Some(total)) => format!("Translating {total} pages"),
                _ if self.document_id.is_some() => "Translating".to_string(),
                _ => "Uploading".to_string(),
            },
            UiState::Complete => "Translation complete".to_string(),
        }
    }
}
