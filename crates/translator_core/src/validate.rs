use thiserror::Error;

use crate::{SelectedFile, UploadLimits};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("File size exceeds the maximum limit of {max_size_mb} MB.")]
    TooLarge { max_size_mb: u64, size_bytes: u64 },
    #[error("Unsupported file format. Supported formats: {supported}.")]
    UnsupportedFormat {
        extension: Option<String>,
        supported: String,
    },
}

/// Checks a chosen file against the configured limits. Size is checked first.
pub fn validate_file(file: &SelectedFile, limits: &UploadLimits) -> Result<(), ValidationError> {
    if file.size_bytes > limits.max_size_bytes() {
        return Err(ValidationError::TooLarge {
            max_size_mb: limits.max_size_mb,
            size_bytes: file.size_bytes,
        });
    }

    let extension = file.extension();
    match extension.as_deref() {
        Some(ext) if limits.supports(ext) => Ok(()),
        _ => Err(ValidationError::UnsupportedFormat {
            extension,
            supported: limits.formats_label(),
        }),
    }
}
