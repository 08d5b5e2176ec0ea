//! Upload state machine: gates a single file transfer through client-side
//! validation, executes it, and reports progress and outcome.

use crate::cloud::api::MediaTransport;
use crate::cloud::models::{FileSource, UploadParams};
use crate::config::Settings;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex as TokioMutex};
use tracing::{info, instrument, warn};

pub mod state;
mod task_manager;

pub use state::{
    SubmitRejection, UploadError, UploadErrorKind, UploadSnapshot, UploadStateUpdate, UploadStatus,
};
pub use task_manager::UploadTaskManager;

/// Snapshot shared between the uploader and its transfer task.
pub type SharedSnapshot = Arc<TokioMutex<UploadSnapshot>>;

pub(crate) const UPLOADER_LOG_TARGET: &str = "mediacli::uploader";

/// Client-side constraints checked before any transfer starts.
#[derive(Debug, Clone)]
pub struct UploadLimits {
    pub max_bytes: u64,
    /// Mime-type allow-list; `None` accepts any type
    pub accepted_types: Option<Vec<String>>,
}

impl UploadLimits {
    pub fn from_settings(settings: &Settings) -> Self {
        UploadLimits {
            max_bytes: settings.max_upload_bytes,
            accepted_types: settings.accepted_types.clone(),
        }
    }
}

/// Tracks exactly one upload task at a time. A new `submit` after a terminal
/// state replaces the previous task; concurrent submits are rejected.
pub struct Uploader {
    transport: Arc<dyn MediaTransport>,
    limits: UploadLimits,
    snapshot: SharedSnapshot,
    update_tx: broadcast::Sender<UploadStateUpdate>,
    task_manager: Option<UploadTaskManager>,
}

impl Uploader {
    /// Creates a new uploader over the given transport.
    pub fn new(transport: Arc<dyn MediaTransport>, limits: UploadLimits) -> Self {
        let (update_tx, _) = broadcast::channel(32);
        Uploader {
            transport,
            limits,
            snapshot: Arc::new(TokioMutex::new(UploadSnapshot::idle())),
            update_tx,
            task_manager: None,
        }
    }

    /// Subscribes to upload state updates.
    pub fn subscribe_updates(&self) -> broadcast::Receiver<UploadStateUpdate> {
        self.update_tx.subscribe()
    }

    /// A clone of the current observable state.
    pub async fn snapshot(&self) -> UploadSnapshot {
        self.snapshot.lock().await.clone()
    }

    /// Validates the file and, if accepted, starts the transfer.
    ///
    /// Returns immediately; the outcome arrives through the broadcast channel
    /// and the snapshot. Validation failures are synchronous, move the state
    /// to `Failed`, and never touch the network.
    #[instrument(skip(self, file, params), fields(file_name = %file.file_name, size = file.size()))]
    pub async fn submit(
        &mut self,
        file: FileSource,
        params: UploadParams,
    ) -> Result<(), SubmitRejection> {
        {
            let guard = self.snapshot.lock().await;
            if guard.status == UploadStatus::Uploading {
                warn!(target: UPLOADER_LOG_TARGET, "Submit rejected: a transfer is already in flight.");
                return Err(SubmitRejection::Busy);
            }
        }

        if file.size() > self.limits.max_bytes {
            let limit_mb = self.limits.max_bytes / (1024 * 1024);
            let error = UploadError::new(
                UploadErrorKind::SizeExceeded,
                format!("File size exceeds {}MB limit", limit_mb),
            );
            self.fail_preflight(error.clone()).await;
            return Err(SubmitRejection::Rejected(error));
        }

        if let Some(accepted) = &self.limits.accepted_types {
            if !accepted.iter().any(|t| t == &file.mime_type) {
                let error = UploadError::new(
                    UploadErrorKind::TypeRejected,
                    "File type not supported".to_string(),
                );
                self.fail_preflight(error.clone()).await;
                return Err(SubmitRejection::Rejected(error));
            }
        }

        info!(
            target: UPLOADER_LOG_TARGET,
            file_name = %file.file_name,
            size = file.size(),
            "Validation passed, starting transfer."
        );

        {
            let mut guard = self.snapshot.lock().await;
            *guard = UploadSnapshot {
                status: UploadStatus::Uploading,
                progress: 0,
                error: None,
                result: None,
            };
        }
        task_manager::broadcast_update(
            &self.update_tx,
            UploadStateUpdate::Started {
                file_name: file.file_name.clone(),
                size: file.size(),
            },
        );

        self.task_manager = Some(task_manager::spawn_upload_task(
            self.transport.clone(),
            file,
            params,
            self.snapshot.clone(),
            self.update_tx.clone(),
        ));
        Ok(())
    }

    /// Returns to the initial `Idle` snapshot from any state, aborting an
    /// in-flight transfer if one exists.
    #[instrument(skip(self))]
    pub async fn reset(&mut self) {
        if let Some(manager) = self.task_manager.take() {
            if !manager.is_finished() {
                info!(target: UPLOADER_LOG_TARGET, file_name = %manager.file_name(), "Reset with transfer in flight, aborting task.");
                manager.abort();
            }
        }
        *self.snapshot.lock().await = UploadSnapshot::idle();
        task_manager::broadcast_update(&self.update_tx, UploadStateUpdate::Reset);
    }

    /// Records a pre-flight validation failure.
    async fn fail_preflight(&mut self, error: UploadError) {
        warn!(target: UPLOADER_LOG_TARGET, "Pre-flight validation failed: {}", error);
        let mut guard = self.snapshot.lock().await;
        *guard = UploadSnapshot {
            status: UploadStatus::Failed,
            progress: 0,
            error: Some(error.clone()),
            result: None,
        };
        drop(guard);
        task_manager::broadcast_update(&self.update_tx, UploadStateUpdate::Failed { error });
    }
}
