use resume_core::{AlertSeverity, AppViewModel, StatusKind};

/// Shown when the service reported success without a message.
const EMPTY_SUCCESS_TEXT: &str = "Parsing finished.";

pub fn render(view: &AppViewModel) -> Vec<String> {
    let status = match view.status {
        StatusKind::Idle => "Idle",
        StatusKind::Ready => "Ready",
        StatusKind::InFlight => "Parsing",
        StatusKind::Succeeded => "Succeeded",
        StatusKind::Failed => "Failed",
        StatusKind::Cancelled => "Cancelled",
    };

    let mut lines = Vec::new();
    lines.push(format!(
        "Status: {} | Output format: {}",
        status, view.format
    ));
    if let Some(name) = &view.selected_file {
        lines.push(format!("Selected File: {name}"));
    }
    if view.progress_visible {
        lines.push("[ uploading ... ] type `cancel` to abort".to_string());
    }
    if let Some(alert) = &view.alert {
        let label = match alert.severity {
            AlertSeverity::Success => "OK",
            AlertSeverity::Warning => "WARNING",
            AlertSeverity::Info => "NOTE",
        };
        let text = if alert.text.is_empty() {
            EMPTY_SUCCESS_TEXT
        } else {
            alert.text.as_str()
        };
        lines.push(format!("{label}: {text} (type `dismiss` to close)"));
    }
    lines
}
