//! JSON bodies returned by the translation service.

use serde::Deserialize;

use crate::types::{FailureKind, PageProgress, ServiceError, UploadReceipt};

/// The service may number documents or hand out opaque strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s,
        }
    }
}

/// `{success: true, document_id, total_pages?}` or `{success: false, error}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(default)]
    document_id: Option<RawId>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub error: Option<String>,
}

impl UploadResponse {
    pub fn into_receipt(self) -> Result<UploadReceipt, ServiceError> {
        if !self.success {
            let message = self
                .error
                .unwrap_or_else(|| "Upload failed.".to_string());
            return Err(ServiceError::new(FailureKind::Rejected, message));
        }
        let document_id = self
            .document_id
            .map(RawId::into_string)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ServiceError::new(FailureKind::Decode, "missing document_id"))?;
        Ok(UploadReceipt {
            document_id,
            total_pages: self.total_pages,
        })
    }
}

/// `{current_page, total_pages}` or `{error}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProgressResponse {
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ProgressResponse {
    pub fn into_progress(self) -> Result<PageProgress, ServiceError> {
        if let Some(error) = self.error {
            return Err(ServiceError::new(FailureKind::Rejected, error));
        }
        match (self.current_page, self.total_pages) {
            (Some(current_page), Some(total_pages)) => Ok(PageProgress {
                current_page,
                total_pages,
            }),
            _ => Err(ServiceError::new(
                FailureKind::Decode,
                "progress response without page counts",
            )),
        }
    }
}
