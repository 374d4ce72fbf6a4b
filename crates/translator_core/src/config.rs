use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::state::{DocumentId, ProgressSnapshot};

/// Client configuration supplied by whoever hosts the controller.
///
/// Every field has a default, so a partial config file only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub limits: UploadLimits,
    pub progress: ProgressMapping,
    pub display: TruncationPolicy,
    pub poll_interval_ms: u64,
    pub result_path: ResultPath,
}

impl ClientConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            limits: UploadLimits::default(),
            progress: ProgressMapping::default(),
            display: TruncationPolicy::default(),
            poll_interval_ms: 1000,
            result_path: ResultPath::default(),
        }
    }
}

/// Pre-submission limits. The server re-validates; these only save a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadLimits {
    pub max_size_mb: u64,
    /// Accepted extensions, each with its leading dot.
    pub supported_formats: Vec<String>,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_size_mb: 10,
            supported_formats: vec![".pdf".to_string(), ".docx".to_string()],
        }
    }
}

impl UploadLimits {
    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_mb.saturating_mul(1024 * 1024)
    }

    pub fn supports(&self, extension: &str) -> bool {
        self.supported_formats
            .iter()
            .any(|format| format.eq_ignore_ascii_case(extension))
    }

    pub fn formats_label(&self) -> String {
        self.supported_formats.join(", ")
    }
}

/// Maps a progress snapshot onto a display percentage: `floor + scale * current / total`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressMapping {
    pub floor_percent: f32,
    pub scale_percent: f32,
}

impl Default for ProgressMapping {
    fn default() -> Self {
        Self {
            floor_percent: 40.0,
            scale_percent: 60.0,
        }
    }
}

impl ProgressMapping {
    pub fn percent(&self, snapshot: Option<ProgressSnapshot>) -> f32 {
        let fraction = match snapshot {
            Some(snapshot) if snapshot.total_pages > 0 => {
                snapshot.current_page.min(snapshot.total_pages) as f32
                    / snapshot.total_pages as f32
            }
            _ => 0.0,
        };
        self.floor_percent + self.scale_percent * fraction
    }
}

/// Display-only shortening of long file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TruncationPolicy {
    pub max_len: usize,
    /// Must be long enough to keep the extension visible.
    pub tail_len: usize,
}

impl Default for TruncationPolicy {
    fn default() -> Self {
        Self {
            max_len: 15,
            tail_len: 7,
        }
    }
}

/// Path convention under which the service publishes a finished translation.
///
/// `{id}` is replaced by the percent-encoded document id and `{ext}` by the
/// uploaded file's extension (lowercase, without the dot).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultPath(pub String);

impl Default for ResultPath {
    fn default() -> Self {
        Self("/media/{id}/translations/translated_{id}.{ext}".to_string())
    }
}

impl ResultPath {
    pub fn render(&self, document_id: &DocumentId, extension: &str) -> String {
        self.0
            .replace("{id}", &document_id.path_segment())
            .replace("{ext}", extension.trim_start_matches('.'))
    }
}
