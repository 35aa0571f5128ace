use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub type AttemptId = u64;

/// Everything needed to send one file to the parsing service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub attempt: AttemptId,
    pub path: PathBuf,
    pub file_name: String,
    pub content_type: String,
    pub format: String,
    pub output_folder: String,
}

/// Decoded 2xx reply.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServiceReply {
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    UploadCompleted {
        attempt: AttemptId,
        result: Result<ServiceReply, UploadError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct UploadError {
    pub kind: FailureKind,
    pub message: String,
}

impl UploadError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The service answered with a non-success status.
    Service { status: u16, error: Option<String> },
    InvalidEndpoint,
    Io,
    Timeout,
    Network,
    Cancelled,
}

impl FailureKind {
    /// True when a reply was received from the service.
    pub fn has_response(&self) -> bool {
        matches!(self, FailureKind::Service { .. })
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Service { status, error } => match error {
                Some(error) => write!(f, "service status {status} ({error})"),
                None => write!(f, "service status {status}"),
            },
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::Io => write!(f, "file read error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Cancelled => write!(f, "cancelled"),
        }
    }
}
