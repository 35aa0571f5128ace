//! Resume parser core: pure submission state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod validate;
mod view_model;

pub use effect::{Effect, UploadJob};
pub use msg::{Msg, UploadOutcome};
pub use state::{AppState, AttemptId, CancelHandle, OutputFormat, SubmissionState};
pub use update::{update, FALLBACK_ERROR_MESSAGE, NOT_SELECTED_MESSAGE};
pub use validate::{
    validate, FileCandidate, RejectReason, Rejection, SelectedFile, Verdict,
    ACCEPTED_EXTENSIONS, MAX_UPLOAD_BYTES,
};
pub use view_model::{AlertSeverity, AlertView, AppViewModel, StatusKind};
