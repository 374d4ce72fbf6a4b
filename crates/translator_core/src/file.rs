use std::path::PathBuf;

/// A file the user picked for translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size_bytes: u64,
}

impl SelectedFile {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            size_bytes,
        }
    }

    /// Lowercased extension with its leading dot, taken after the last `.` of the name.
    pub fn extension(&self) -> Option<String> {
        let (_, ext) = self.name.rsplit_once('.')?;
        if ext.is_empty() {
            return None;
        }
        Some(format!(".{}", ext.to_ascii_lowercase()))
    }
}
