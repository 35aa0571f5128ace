use std::fmt;

use crate::view_model::{AlertSeverity, AlertView, AppViewModel, StatusKind};
use crate::SelectedFile;

pub type AttemptId = u64;

pub(crate) const CANCELLED_ALERT_TEXT: &str = "The request was cancelled.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Spreadsheet,
}

impl OutputFormat {
    /// Value sent in the `format` form field.
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Spreadsheet => "spreadsheet",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "spreadsheet" => Some(OutputFormat::Spreadsheet),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability to cancel exactly one attempt.
///
/// Handles are plain values and may outlive their attempt; once the attempt
/// has left `InFlight`, presenting the handle changes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CancelHandle {
    attempt: AttemptId,
}

impl CancelHandle {
    pub(crate) fn new(attempt: AttemptId) -> Self {
        Self { attempt }
    }

    pub fn attempt(&self) -> AttemptId {
        self.attempt
    }
}

/// Terminal states keep the last accepted file so a new attempt can start
/// without picking it again.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Ready {
        file: SelectedFile,
        format: OutputFormat,
    },
    InFlight {
        file: SelectedFile,
        format: OutputFormat,
        handle: CancelHandle,
    },
    Succeeded {
        message: String,
        file: SelectedFile,
    },
    Failed {
        error: String,
        file: Option<SelectedFile>,
    },
    Cancelled {
        file: SelectedFile,
    },
}

impl SubmissionState {
    pub fn kind(&self) -> StatusKind {
        match self {
            SubmissionState::Idle => StatusKind::Idle,
            SubmissionState::Ready { .. } => StatusKind::Ready,
            SubmissionState::InFlight { .. } => StatusKind::InFlight,
            SubmissionState::Succeeded { .. } => StatusKind::Succeeded,
            SubmissionState::Failed { .. } => StatusKind::Failed,
            SubmissionState::Cancelled { .. } => StatusKind::Cancelled,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubmissionState::Succeeded { .. }
                | SubmissionState::Failed { .. }
                | SubmissionState::Cancelled { .. }
        )
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        match self {
            SubmissionState::Idle => None,
            SubmissionState::Ready { file, .. }
            | SubmissionState::InFlight { file, .. }
            | SubmissionState::Succeeded { file, .. }
            | SubmissionState::Cancelled { file } => Some(file),
            SubmissionState::Failed { file, .. } => file.as_ref(),
        }
    }

    pub fn cancel_handle(&self) -> Option<CancelHandle> {
        match self {
            SubmissionState::InFlight { handle, .. } => Some(*handle),
            _ => None,
        }
    }

    fn alert(&self) -> Option<AlertView> {
        match self {
            SubmissionState::Succeeded { message, .. } => Some(AlertView {
                severity: AlertSeverity::Success,
                text: message.clone(),
            }),
            SubmissionState::Failed { error, .. } => Some(AlertView {
                severity: AlertSeverity::Warning,
                text: error.clone(),
            }),
            SubmissionState::Cancelled { .. } => Some(AlertView {
                severity: AlertSeverity::Info,
                text: CANCELLED_ALERT_TEXT.to_string(),
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    submission: SubmissionState,
    format: OutputFormat,
    alert_visible: bool,
    last_attempt: AttemptId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn alert_visible(&self) -> bool {
        self.alert_visible
    }

    pub fn cancel_handle(&self) -> Option<CancelHandle> {
        self.submission.cancel_handle()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            status: self.submission.kind(),
            selected_file: self.submission.file().map(|file| file.name().to_string()),
            format: self.format,
            progress_visible: matches!(self.submission, SubmissionState::InFlight { .. }),
            alert: self
                .alert_visible
                .then(|| self.submission.alert())
                .flatten(),
            can_cancel: self.cancel_handle().is_some(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_format(&mut self, format: OutputFormat) {
        self.format = format;
        if let SubmissionState::Ready { format: ready, .. } = &mut self.submission {
            *ready = format;
        }
        self.dirty = true;
    }

    pub(crate) fn set_alert_visible(&mut self, visible: bool) {
        if self.alert_visible != visible {
            self.alert_visible = visible;
            self.dirty = true;
        }
    }

    pub(crate) fn next_attempt(&mut self) -> AttemptId {
        self.last_attempt += 1;
        self.last_attempt
    }

    /// Replace the submission state. Terminal states raise the alert, anything
    /// else hides it.
    pub(crate) fn transition(&mut self, next: SubmissionState) {
        self.alert_visible = next.is_terminal();
        self.submission = next;
        self.dirty = true;
    }
}
