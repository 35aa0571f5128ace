use crate::{AttemptId, CancelHandle, FileCandidate, OutputFormat};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User closed the file picker; `None` when nothing was chosen.
    FileChosen(Option<FileCandidate>),
    /// User picked an output format.
    FormatChosen(OutputFormat),
    /// User clicked Reset.
    ResetClicked,
    /// User clicked Parse.
    SubmitClicked,
    /// User clicked Cancel, presenting the handle of the attempt they saw.
    CancelRequested(CancelHandle),
    /// User closed the alert panel.
    AlertDismissed,
    /// Transport finished an attempt.
    UploadFinished {
        attempt: AttemptId,
        outcome: UploadOutcome,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}

/// How the transport ended an attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// 2xx reply; `message` is the body's `message` field if any.
    Completed { message: Option<String> },
    /// Non-2xx reply; `error` is the body's `error` field if any.
    ServiceFailed { error: Option<String> },
    /// No reply at all (connect failure, timeout, unreadable file).
    TransportFailed { detail: String },
    /// The transport honoured a cancellation.
    Aborted,
}
