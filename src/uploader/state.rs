//! Upload state machine types

use crate::cloud::models::UploadResponse;

/// Lifecycle states of a single upload task.
/// `Idle -> Uploading -> {Succeeded | Failed}`, back to `Idle` on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Idle,
    Uploading,
    Succeeded,
    Failed,
}

/// Failure taxonomy. Size and type failures happen pre-flight and never
/// reach the network; the other two surface the remote outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadErrorKind {
    SizeExceeded,
    TypeRejected,
    TransportFailure,
    ServerRejected,
}

/// An upload failure: taxonomy kind plus the underlying message, unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadError {
    pub kind: UploadErrorKind,
    pub message: String,
}

impl UploadError {
    pub fn new(kind: UploadErrorKind, message: impl Into<String>) -> Self {
        UploadError {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            UploadErrorKind::SizeExceeded => write!(f, "Size exceeded: {}", self.message),
            UploadErrorKind::TypeRejected => write!(f, "Type rejected: {}", self.message),
            UploadErrorKind::TransportFailure => write!(f, "Transport failure: {}", self.message),
            UploadErrorKind::ServerRejected => write!(f, "Server rejected: {}", self.message),
        }
    }
}

impl std::error::Error for UploadError {}

/// Why a `submit` call was refused without starting a transfer.
#[derive(Debug)]
pub enum SubmitRejection {
    /// A transfer is already in flight; state was left untouched.
    Busy,
    /// Pre-flight validation failed; state moved to `Failed`.
    Rejected(UploadError),
}

impl std::fmt::Display for SubmitRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitRejection::Busy => write!(f, "An upload is already in progress"),
            SubmitRejection::Rejected(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SubmitRejection {}

/// Observable snapshot of the upload task.
#[derive(Debug, Clone)]
pub struct UploadSnapshot {
    pub status: UploadStatus,
    /// 0-100, monotonically non-decreasing while `Uploading`
    pub progress: u8,
    pub error: Option<UploadError>,
    pub result: Option<UploadResponse>,
}

impl UploadSnapshot {
    pub fn idle() -> Self {
        UploadSnapshot {
            status: UploadStatus::Idle,
            progress: 0,
            error: None,
            result: None,
        }
    }

    /// The locator returned by the remote service, if the upload succeeded.
    pub fn result_locator(&self) -> Option<&str> {
        self.result.as_ref().map(|r| r.secure_url.as_str())
    }
}

/// Updates broadcast by the uploader about its state changes.
#[derive(Debug, Clone)]
pub enum UploadStateUpdate {
    Started { file_name: String, size: u64 },
    Progress { percent: u8 },
    Succeeded { response: UploadResponse },
    Failed { error: UploadError },
    Reset,
}
