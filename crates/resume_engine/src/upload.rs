use std::time::Duration;

use engine_logging::{engine_debug, engine_info};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::{FailureKind, ServiceReply, UploadError, UploadRequest};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/parse-resume";

#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            // Parsing runs an LLM round trip server side.
            request_timeout: Duration::from_secs(120),
        }
    }
}

#[async_trait::async_trait]
pub trait Uploader: Send + Sync {
    /// Send one file. Resolves with `FailureKind::Cancelled` once `cancel` fires.
    async fn upload(
        &self,
        request: &UploadRequest,
        cancel: &CancellationToken,
    ) -> Result<ServiceReply, UploadError>;
}

/// Fields read from a reply body. Each field is read on its own, so a
/// mistyped `message` does not hide a valid `error` and vice versa.
#[derive(Debug, Default)]
struct ServiceBody {
    message: Option<String>,
    error: Option<String>,
}

impl ServiceBody {
    /// A body that is not a JSON object carries no fields.
    fn decode(body: &[u8]) -> Self {
        let Ok(value) = serde_json::from_slice::<Value>(body) else {
            return Self::default();
        };
        let field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_string);
        Self {
            message: field("message"),
            error: field("error"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReqwestUploader {
    settings: UploadSettings,
}

impl ReqwestUploader {
    pub fn new(settings: UploadSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, UploadError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| UploadError::new(FailureKind::Network, err.to_string()))
    }

    async fn send(&self, request: &UploadRequest) -> Result<ServiceReply, UploadError> {
        let endpoint = reqwest::Url::parse(&self.settings.endpoint)
            .map_err(|err| UploadError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        let client = self.build_client()?;
        let form = build_form(request).await?;

        let response = client
            .post(endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        let decoded = ServiceBody::decode(&body);
        engine_debug!(
            "Attempt {} reply: status={} body_len={}",
            request.attempt,
            status,
            body.len()
        );

        if status.is_success() {
            Ok(ServiceReply {
                message: decoded.message,
            })
        } else {
            Err(UploadError::new(
                FailureKind::Service {
                    status: status.as_u16(),
                    error: decoded.error,
                },
                status.to_string(),
            ))
        }
    }
}

#[async_trait::async_trait]
impl Uploader for ReqwestUploader {
    async fn upload(
        &self,
        request: &UploadRequest,
        cancel: &CancellationToken,
    ) -> Result<ServiceReply, UploadError> {
        engine_info!(
            "Uploading attempt {} file={} format={}",
            request.attempt,
            request.file_name,
            request.format
        );
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                Err(UploadError::new(FailureKind::Cancelled, "cancelled by user"))
            }
            result = self.send(request) => result,
        }
    }
}

async fn build_form(request: &UploadRequest) -> Result<Form, UploadError> {
    let bytes = tokio::fs::read(&request.path).await.map_err(|err| {
        UploadError::new(
            FailureKind::Io,
            format!("{}: {}", request.path.display(), err),
        )
    })?;
    let part = Part::bytes(bytes)
        .file_name(request.file_name.clone())
        .mime_str(&request.content_type)
        .map_err(|err| UploadError::new(FailureKind::Io, err.to_string()))?;

    Ok(Form::new()
        .part("file", part)
        .text("format", request.format.clone())
        .text("output_folder", request.output_folder.clone()))
}

fn map_reqwest_error(err: reqwest::Error) -> UploadError {
    if err.is_timeout() {
        return UploadError::new(FailureKind::Timeout, err.to_string());
    }
    UploadError::new(FailureKind::Network, err.to_string())
}

