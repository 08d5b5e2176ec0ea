//! Shared helpers for integration tests

use async_trait::async_trait;
use mediacli::cloud::{CloudError, FileSource, MediaTransport, UploadParams, UploadResponse};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Scripted transport standing in for the real HTTP client: emits the given
/// progress sequence, then resolves with a canned response.
pub struct ScriptedTransport {
    pub progress: Vec<u8>,
    pub response: UploadResponse,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new(progress: Vec<u8>) -> Arc<Self> {
        Arc::new(ScriptedTransport {
            progress,
            response: sample_response(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaTransport for ScriptedTransport {
    async fn upload(
        &self,
        _file: FileSource,
        _params: UploadParams,
        progress_tx: mpsc::Sender<u8>,
    ) -> Result<UploadResponse, CloudError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        for percent in &self.progress {
            let _ = progress_tx.send(*percent).await;
            tokio::task::yield_now().await;
        }
        Ok(self.response.clone())
    }
}

pub fn sample_response() -> UploadResponse {
    UploadResponse {
        secure_url: "https://res.cloudinary.com/demo-cloud/video/upload/v1/clip.mp4".to_string(),
        public_id: "clip".to_string(),
        bytes: 2 * 1024 * 1024,
        resource_type: "video".to_string(),
        original_filename: Some("clip".to_string()),
        created_at: Some("2025-06-01T12:00:00Z".to_string()),
        format: Some("mp4".to_string()),
        width: Some(1920),
        height: Some(1080),
        duration: Some(12.5),
    }
}

pub fn video_file(size: usize) -> FileSource {
    FileSource::new(vec![0u8; size], "clip.mp4", "video/mp4")
}
