//! Resume parser engine: multipart upload transport and effect execution.
mod engine;
mod types;
mod upload;

pub use engine::EngineHandle;
pub use types::{
    AttemptId, EngineEvent, FailureKind, ServiceReply, UploadError, UploadRequest,
};
pub use upload::{ReqwestUploader, UploadSettings, Uploader, DEFAULT_ENDPOINT};
