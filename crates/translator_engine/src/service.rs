use std::sync::Mutex;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use translator_logging::{app_debug, app_info, app_warn};
use url::Url;

use crate::wire::{ProgressResponse, UploadResponse};
use crate::{FailureKind, PageProgress, ServiceError, UploadReceipt, UploadRequest};

const CSRF_HEADER: &str = "X-CSRFToken";
const CSRF_FORM_FIELD: &str = "csrfmiddlewaretoken";

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub base_url: String,
    pub upload_path: String,
    /// `{id}` is replaced by the document id.
    pub progress_path: String,
    pub file_field: String,
    pub language_field: String,
    /// Anti-forgery token; fetched from the service root when absent.
    pub csrf_token: Option<String>,
    pub csrf_cookie: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/".to_string(),
            upload_path: "/upload/".to_string(),
            progress_path: "/progress/{id}/".to_string(),
            file_field: "file".to_string(),
            language_field: "translation_language".to_string(),
            csrf_token: None,
            csrf_cookie: "csrftoken".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
        }
    }
}

#[async_trait::async_trait]
pub trait TranslationService: Send + Sync {
    async fn submit(&self, request: &UploadRequest) -> Result<UploadReceipt, ServiceError>;

    async fn progress(&self, document_id: &str) -> Result<PageProgress, ServiceError>;

    /// Fetches the body published at `path`, relative to the service root.
    async fn download(&self, path: &str) -> Result<Vec<u8>, ServiceError>;
}

pub struct ReqwestTranslationService {
    settings: ServiceSettings,
    base: Url,
    client: reqwest::Client,
    token: Mutex<Option<String>>,
}

impl ReqwestTranslationService {
    pub fn new(settings: ServiceSettings) -> Result<Self, ServiceError> {
        let base = Url::parse(&settings.base_url)
            .map_err(|err| ServiceError::new(FailureKind::InvalidUrl, err.to_string()))?;
        // The anti-forgery cookie must travel back with the upload.
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .cookie_store(true)
            .build()
            .map_err(|err| ServiceError::new(FailureKind::Network, err.to_string()))?;
        let token = Mutex::new(settings.csrf_token.clone());
        Ok(Self {
            settings,
            base,
            client,
            token,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ServiceError> {
        self.base
            .join(path)
            .map_err(|err| ServiceError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    fn cached_token(&self) -> Option<String> {
        self.token.lock().ok().and_then(|guard| guard.clone())
    }

    async fn token(&self) -> Result<String, ServiceError> {
        if let Some(token) = self.cached_token() {
            return Ok(token);
        }

        let response = self
            .client
            .get(self.base.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let token = response
            .cookies()
            .find(|cookie| cookie.name() == self.settings.csrf_cookie)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| {
                ServiceError::new(
                    FailureKind::MissingToken,
                    format!("no {} cookie at {}", self.settings.csrf_cookie, self.base),
                )
            })?;
        app_debug!("Obtained anti-forgery token from {}", self.base);

        if let Ok(mut guard) = self.token.lock() {
            *guard = Some(token.clone());
        }
        Ok(token)
    }
}

#[async_trait::async_trait]
impl TranslationService for ReqwestTranslationService {
    async fn submit(&self, request: &UploadRequest) -> Result<UploadReceipt, ServiceError> {
        let url = self.endpoint(&self.settings.upload_path)?;
        let token = self.token().await?;
        let bytes = tokio::fs::read(&request.path)
            .await
            .map_err(|err| ServiceError::new(FailureKind::Io, err.to_string()))?;
        let byte_len = bytes.len();

        let part = Part::bytes(bytes).file_name(request.file_name.clone());
        let form = Form::new()
            .part(self.settings.file_field.clone(), part)
            .text(self.settings.language_field.clone(), request.language.clone())
            .text(CSRF_FORM_FIELD, token.clone());

        app_info!(
            "POST {} file={} bytes={} language={}",
            url,
            request.file_name,
            byte_len,
            request.language
        );
        let response = self
            .client
            .post(url)
            .header(CSRF_HEADER, token)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let body: UploadResponse = decode_json(response).await?;
        body.into_receipt()
    }

    async fn progress(&self, document_id: &str) -> Result<PageProgress, ServiceError> {
        if matches!(document_id, "" | "." | "..") {
            return Err(ServiceError::new(
                FailureKind::InvalidUrl,
                format!("document id {document_id:?} is not a path segment"),
            ));
        }
        let path = self
            .settings
            .progress_path
            .replace("{id}", &urlencoding::encode(document_id));
        let url = self.endpoint(&path)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let body: ProgressResponse = decode_json(response).await?;
        body.into_progress()
    }

    async fn download(&self, path: &str) -> Result<Vec<u8>, ServiceError> {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("{status} for {url}"),
            ));
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            bytes.extend_from_slice(&chunk);
        }
        app_info!("Downloaded {} bytes from {}", bytes.len(), url);
        Ok(bytes)
    }
}

/// Error bodies are JSON too, so the body is parsed before the status is judged.
async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ServiceError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_reqwest_error)?;
    match serde_json::from_slice(&body) {
        Ok(value) => Ok(value),
        Err(_) if !status.is_success() => Err(ServiceError::new(
            FailureKind::HttpStatus(status.as_u16()),
            status.to_string(),
        )),
        Err(err) => {
            app_warn!("Undecodable response body ({} bytes): {}", body.len(), err);
            Err(ServiceError::new(FailureKind::Decode, err.to_string()))
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        return ServiceError::new(FailureKind::Timeout, err.to_string());
    }
    ServiceError::new(FailureKind::Network, err.to_string())
}
