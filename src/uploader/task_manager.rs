// src/uploader/task_manager.rs

use crate::cloud::api::{CloudError, MediaTransport};
use crate::cloud::models::{FileSource, UploadParams};
use crate::uploader::state::{
    UploadError, UploadErrorKind, UploadSnapshot, UploadStateUpdate, UploadStatus,
};
use crate::uploader::{SharedSnapshot, UPLOADER_LOG_TARGET};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace};

/// Manages a single in-flight transfer task.
#[derive(Debug)]
pub struct UploadTaskManager {
    task_handle: JoinHandle<()>,
    file_name: String,
}

impl UploadTaskManager {
    /// Abort the transfer task outright. Used by `reset()` so an abandoned
    /// upload does not keep streaming in the background.
    pub fn abort(self) {
        debug!(target: UPLOADER_LOG_TARGET, file_name = %self.file_name, "Aborting in-flight upload task.");
        self.task_handle.abort();
    }

    /// Returns true once the transfer task has finished or been aborted.
    pub fn is_finished(&self) -> bool {
        self.task_handle.is_finished()
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

/// Map a transport-level failure onto the state machine's taxonomy,
/// preserving the underlying message.
fn classify_transfer_error(err: CloudError) -> UploadError {
    let message = err.to_string();
    let kind = match err {
        CloudError::Network(_) | CloudError::Configuration(_) => UploadErrorKind::TransportFailure,
        CloudError::ServerRejected { .. } | CloudError::InvalidResponse(_) => {
            UploadErrorKind::ServerRejected
        }
    };
    UploadError::new(kind, message)
}

/// Spawns a new Tokio task to run the transfer and mirror its progress into
/// the shared snapshot.
pub fn spawn_upload_task(
    transport: Arc<dyn MediaTransport>,
    file: FileSource,
    params: UploadParams,
    snapshot: SharedSnapshot,
    update_tx: broadcast::Sender<UploadStateUpdate>,
) -> UploadTaskManager {
    let file_name = file.file_name.clone();
    let task_file_name = file_name.clone();

    info!(target: UPLOADER_LOG_TARGET, "Spawning async task for upload of {}", file_name);
    let task_handle = tokio::spawn(async move {
        debug!(target: UPLOADER_LOG_TARGET, file_name = %task_file_name, "[Upload Task] Started.");

        let (progress_tx, mut progress_rx) = mpsc::channel::<u8>(32);
        let mut transfer = Box::pin(transport.upload(file, params, progress_tx));

        loop {
            tokio::select! {
                Some(percent) = progress_rx.recv() => {
                    apply_progress(&snapshot, &update_tx, percent).await;
                }
                result = &mut transfer => {
                    // Drain any progress left in the channel before settling
                    while let Ok(percent) = progress_rx.try_recv() {
                        apply_progress(&snapshot, &update_tx, percent).await;
                    }
                    match result {
                        Ok(response) => {
                            info!(target: UPLOADER_LOG_TARGET, file_name = %task_file_name, locator = %response.secure_url, "[Upload Task] Upload succeeded.");
                            let mut guard = snapshot.lock().await;
                            guard.status = UploadStatus::Succeeded;
                            guard.progress = 100;
                            guard.result = Some(response.clone());
                            drop(guard);
                            broadcast_update(&update_tx, UploadStateUpdate::Succeeded { response });
                        }
                        Err(e) => {
                            error!(target: UPLOADER_LOG_TARGET, file_name = %task_file_name, "[Upload Task] Upload failed: {}", e);
                            let upload_error = classify_transfer_error(e);
                            let mut guard = snapshot.lock().await;
                            guard.status = UploadStatus::Failed;
                            guard.error = Some(upload_error.clone());
                            drop(guard);
                            broadcast_update(&update_tx, UploadStateUpdate::Failed { error: upload_error });
                        }
                    }
                    break;
                }
            }
        }
        debug!(target: UPLOADER_LOG_TARGET, file_name = %task_file_name, "[Upload Task] Finished.");
    });

    UploadTaskManager {
        task_handle,
        file_name,
    }
}

/// Applies a progress callback to the snapshot, keeping the sequence
/// monotonically non-decreasing.
async fn apply_progress(
    snapshot: &SharedSnapshot,
    update_tx: &broadcast::Sender<UploadStateUpdate>,
    percent: u8,
) {
    let percent = percent.min(100);
    let mut guard = snapshot.lock().await;
    if guard.status != UploadStatus::Uploading {
        trace!(target: UPLOADER_LOG_TARGET, "Dropping progress {} received outside Uploading state.", percent);
        return;
    }
    if percent <= guard.progress {
        trace!(target: UPLOADER_LOG_TARGET, "Dropping stale progress {} (current {}).", percent, guard.progress);
        return;
    }
    guard.progress = percent;
    drop(guard);
    broadcast_update(update_tx, UploadStateUpdate::Progress { percent });
}

/// Sends a state update via the broadcast channel, logging errors.
pub(super) fn broadcast_update(
    update_tx: &broadcast::Sender<UploadStateUpdate>,
    update: UploadStateUpdate,
) {
    trace!(target: UPLOADER_LOG_TARGET, "Broadcasting state update: {:?}", update);
    if update_tx.send(update.clone()).is_err() {
        // Normal if nothing is listening yet (e.g. no progress bar attached)
        debug!(target: UPLOADER_LOG_TARGET, "No active listeners for state update: {:?}", update);
    }
}
