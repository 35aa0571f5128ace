use std::time::Duration;

use engine_logging::{engine_info, engine_warn};
use resume_core::{Effect, Msg, UploadJob, UploadOutcome};
use resume_engine::{EngineEvent, EngineHandle, FailureKind, UploadError, UploadRequest};

/// Executes core effects on the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartUpload(job) => {
                    engine_info!(
                        "StartUpload attempt={} file={} bytes={} format={}",
                        job.attempt,
                        job.file.name(),
                        job.file.size_bytes(),
                        job.format
                    );
                    self.engine.submit(to_request(job));
                }
                Effect::CancelUpload { attempt } => {
                    engine_info!("CancelUpload attempt={}", attempt);
                    self.engine.cancel(attempt);
                }
            }
        }
    }

    pub fn poll(&self) -> Option<Msg> {
        self.engine.try_recv().map(to_msg)
    }

    pub fn wait(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(to_msg)
    }
}

fn to_request(job: UploadJob) -> UploadRequest {
    UploadRequest {
        attempt: job.attempt,
        path: job.file.path().to_path_buf(),
        file_name: job.file.name().to_string(),
        content_type: job.file.content_type().to_string(),
        format: job.format.as_str().to_string(),
        output_folder: job.output_folder,
    }
}

fn to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::UploadCompleted { attempt, result } => Msg::UploadFinished {
            attempt,
            outcome: match result {
                Ok(reply) => UploadOutcome::Completed {
                    message: reply.message,
                },
                Err(err) => outcome_for_error(err),
            },
        },
    }
}

fn outcome_for_error(err: UploadError) -> UploadOutcome {
    match &err.kind {
        FailureKind::Service { error, .. } => UploadOutcome::ServiceFailed {
            error: error.clone(),
        },
        FailureKind::Cancelled => UploadOutcome::Aborted,
        FailureKind::InvalidEndpoint
        | FailureKind::Io
        | FailureKind::Timeout
        | FailureKind::Network => {
            engine_warn!("Upload failed without a response: {}", err);
            UploadOutcome::TransportFailed {
                detail: err.to_string(),
            }
        }
    }
}
