//! Client configuration loaded from a RON file.
//!
//! Missing files and missing fields fall back to defaults; command-line flags
//! are applied on top by the caller.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use translator_core::ClientConfig;
use translator_engine::{EngineSettings, RetryPolicy, ServiceSettings};
use translator_logging::app_info;

pub const DEFAULT_CONFIG_FILENAME: &str = "translator.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub client: ClientConfig,
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
    pub upload_path: String,
    pub progress_path: String,
    pub file_field: String,
    pub language_field: String,
    pub csrf_token: Option<String>,
    pub request_timeout_secs: u64,
    pub poll_retries: u32,
    pub retry_backoff_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let service = ServiceSettings::default();
        let retry = RetryPolicy::default();
        Self {
            base_url: service.base_url,
            upload_path: service.upload_path,
            progress_path: service.progress_path,
            file_field: service.file_field,
            language_field: service.language_field,
            csrf_token: None,
            request_timeout_secs: service.request_timeout.as_secs(),
            poll_retries: retry.max_retries,
            retry_backoff_ms: retry.initial_backoff.as_millis() as u64,
        }
    }
}

impl AppConfig {
    /// Reads `path`, or returns defaults when `path` is `None` and no default file exists.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILENAME), false),
        };
        if !required && !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))?;
        app_info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(ron::from_str(text)?)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("translations"))
    }

    pub fn engine_settings(&self) -> EngineSettings {
        let defaults = RetryPolicy::default();
        let mut settings = EngineSettings::default_with_output(self.output_dir());
        settings.service = ServiceSettings {
            base_url: self.server.base_url.clone(),
            upload_path: self.server.upload_path.clone(),
            progress_path: self.server.progress_path.clone(),
            file_field: self.server.file_field.clone(),
            language_field: self.server.language_field.clone(),
            csrf_token: self.server.csrf_token.clone(),
            request_timeout: Duration::from_secs(self.server.request_timeout_secs.max(1)),
            ..ServiceSettings::default()
        };
        settings.retry = RetryPolicy {
            max_retries: self.server.poll_retries,
            initial_backoff: Duration::from_millis(self.server.retry_backoff_ms),
            max_backoff: defaults.max_backoff,
        };
        settings
    }
}
