//! HTTP client for the media cloud upload API

use crate::cloud::models::{FileSource, ResourceType, UploadParams, UploadResponse};
use crate::cloud::transform::{self, Transformation};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Error as ReqwestError, Response, StatusCode};
use std::error::Error;
use std::fmt;
use tokio::sync::mpsc;
use tracing::{debug, error, trace};
use uuid::Uuid;

const LOG_TARGET: &str = "mediacli::cloud";

/// Base URL uploads are posted to.
const UPLOAD_BASE_URL: &str = "https://api.cloudinary.com/v1_1";

/// Chunk size for the streamed multipart file body. Progress is published
/// once per chunk, so this also bounds progress granularity.
const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// Error types for media cloud API operations
#[derive(Debug)]
pub enum CloudError {
    Network(ReqwestError),
    ServerRejected { status: StatusCode, message: String },
    InvalidResponse(String),
    Configuration(String),
}

impl fmt::Display for CloudError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloudError::Network(e) => write!(f, "Network error: {}", e),
            CloudError::ServerRejected { status, message } => {
                write!(f, "Server rejected request ({}): {}", status, message)
            }
            CloudError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            CloudError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl Error for CloudError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CloudError::Network(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ReqwestError> for CloudError {
    fn from(err: ReqwestError) -> Self {
        CloudError::Network(err)
    }
}

/// Contract the uploader depends on: a progress-reporting upload primitive.
/// Lets tests substitute a mock transport for the real HTTP client.
#[async_trait]
pub trait MediaTransport: Send + Sync {
    /// Stream `file` to the remote endpoint, publishing integer percent
    /// progress (0-100) through `progress_tx` as bytes go out.
    async fn upload(
        &self,
        file: FileSource,
        params: UploadParams,
        progress_tx: mpsc::Sender<u8>,
    ) -> Result<UploadResponse, CloudError>;
}

/// Client for the media cloud HTTP API
#[derive(Clone)]
pub struct CloudClient {
    client: Client,
    cloud_name: String,
    api_key: Option<String>,
    upload_preset: String,
    upload_session_id: String,
}

impl CloudClient {
    /// Create a new client for the given cloud account
    pub fn new(cloud_name: &str, upload_preset: &str) -> Self {
        debug!(target: LOG_TARGET, "Creating new CloudClient for cloud: {}", cloud_name);

        let client = match Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
        {
            Ok(client) => {
                debug!(target: LOG_TARGET, "HTTP client created successfully with 30s timeout");
                client
            }
            Err(e) => {
                tracing::warn!(target: LOG_TARGET, "Error creating HTTP client with timeout: {:?}. Falling back to default.", e);
                Client::new()
            }
        };

        let upload_session_id = Uuid::new_v4().to_string();
        debug!(target: LOG_TARGET, "Generated upload session id: {}", upload_session_id);

        CloudClient {
            client,
            cloud_name: cloud_name.to_string(),
            api_key: None,
            upload_preset: upload_preset.to_string(),
            upload_session_id,
        }
    }

    /// Set API key for signed operations
    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    /// The session identifier attached to this client's upload logs.
    pub fn upload_session_id(&self) -> &str {
        &self.upload_session_id
    }

    pub fn cloud_name(&self) -> &str {
        &self.cloud_name
    }

    /// Full endpoint URL uploads for `resource_type` are posted to.
    pub fn upload_url(&self, resource_type: ResourceType) -> String {
        format!(
            "{}/{}/{}/upload",
            UPLOAD_BASE_URL,
            self.cloud_name,
            resource_type.as_str()
        )
    }

    /// Build a delivery URL for a stored asset with the given transformation.
    pub fn delivery_url(
        &self,
        public_id: &str,
        resource_type: ResourceType,
        transformation: &Transformation,
    ) -> Result<String, CloudError> {
        transform::delivery_url(&self.cloud_name, resource_type, transformation, public_id)
            .map_err(CloudError::Configuration)
    }

    /// Wrap the file bytes in a chunked stream that publishes percent
    /// progress as each chunk is handed to the transport.
    fn progress_body(data: Bytes, progress_tx: mpsc::Sender<u8>) -> reqwest::Body {
        let total = data.len() as u64;
        let chunk_count = data.len().div_ceil(UPLOAD_CHUNK_SIZE);

        let stream = futures_util::stream::iter((0..chunk_count).map(move |i| {
            let start = i * UPLOAD_CHUNK_SIZE;
            let end = usize::min(start + UPLOAD_CHUNK_SIZE, data.len());
            let chunk = data.slice(start..end);

            let percent = ((end as u64).saturating_mul(100) / total.max(1)) as u8;
            // Progress delivery is best-effort; a slow consumer must not
            // stall the transfer itself.
            let _ = progress_tx.try_send(percent);

            Ok::<Bytes, std::io::Error>(chunk)
        }));

        reqwest::Body::wrap_stream(stream)
    }

    /// Handles response status checking and JSON deserialization.
    async fn handle_response(response: Response) -> Result<UploadResponse, CloudError> {
        let status = response.status();
        trace!(target: LOG_TARGET, "Response status: {}", status);

        if status.is_success() {
            let response_text = response.text().await?;
            trace!(target: LOG_TARGET, "Response text length: {} bytes", response_text.len());
            if response_text.is_empty() {
                error!(target: LOG_TARGET, "Received empty response body with success status {}", status);
                return Err(CloudError::InvalidResponse(
                    "Empty response body received".to_string(),
                ));
            }

            serde_json::from_str::<UploadResponse>(&response_text).map_err(|e| {
                error!(target: LOG_TARGET, "JSON parsing error: {}. Full response text:\n{}", e, response_text);
                CloudError::InvalidResponse(format!("Failed to parse JSON response: {}", e))
            })
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            error!(target: LOG_TARGET, "Upload failed. Status: {}, Body: {}", status, error_text);
            Err(CloudError::ServerRejected {
                status,
                message: error_text,
            })
        }
    }
}

#[async_trait]
impl MediaTransport for CloudClient {
    async fn upload(
        &self,
        file: FileSource,
        params: UploadParams,
        progress_tx: mpsc::Sender<u8>,
    ) -> Result<UploadResponse, CloudError> {
        let url = self.upload_url(params.resource_type);
        debug!(
            target: LOG_TARGET,
            session_id = %self.upload_session_id,
            file_name = %file.file_name,
            size = file.size(),
            "Uploading to: {}", url
        );

        let file_size = file.size();
        let body = Self::progress_body(file.data, progress_tx);
        let part = Part::stream_with_length(body, file_size)
            .file_name(file.file_name)
            .mime_str(&file.mime_type)
            .map_err(|e| CloudError::Configuration(format!("Invalid mime type: {}", e)))?;

        let mut form = Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone());
        for (name, value) in params.text_fields() {
            form = form.text(name, value);
        }
        if let Some(api_key) = &self.api_key {
            form = form.text("api_key", api_key.clone());
        }

        let response = self.client.post(&url).multipart(form).send().await?;
        Self::handle_response(response).await
    }
}
