use crate::OutputFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    Idle,
    Ready,
    InFlight,
    Succeeded,
    Failed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSeverity {
    Success,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertView {
    pub severity: AlertSeverity,
    pub text: String,
}

/// Everything the presentation layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub status: StatusKind,
    pub selected_file: Option<String>,
    pub format: OutputFormat,
    pub progress_visible: bool,
    pub alert: Option<AlertView>,
    pub can_cancel: bool,
    pub dirty: bool,
}
