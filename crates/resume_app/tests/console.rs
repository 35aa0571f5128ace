use std::path::PathBuf;

use resume_app::{parse_command, render, Command};
use resume_core::{AlertSeverity, AlertView, AppViewModel, OutputFormat, StatusKind};

#[test]
fn commands_are_parsed() {
    assert_eq!(
        parse_command("select /tmp/my resume.pdf"),
        Ok(Command::Select(Some(PathBuf::from("/tmp/my resume.pdf"))))
    );
    assert_eq!(parse_command("select"), Ok(Command::Select(None)));
    assert_eq!(
        parse_command("format Spreadsheet"),
        Ok(Command::Format(OutputFormat::Spreadsheet))
    );
    assert_eq!(parse_command("  SUBMIT "), Ok(Command::Submit));
    assert_eq!(parse_command("cancel"), Ok(Command::Cancel));
    assert_eq!(parse_command(""), Ok(Command::Status));
    assert!(parse_command("format xml").is_err());
    assert!(parse_command("launch").is_err());
}

#[test]
fn render_shows_progress_and_alert() {
    let in_flight = AppViewModel {
        status: StatusKind::InFlight,
        selected_file: Some("resume.pdf".to_string()),
        format: OutputFormat::Json,
        progress_visible: true,
        alert: None,
        can_cancel: true,
        dirty: true,
    };
    let lines = render(&in_flight);
    assert_eq!(lines[0], "Status: Parsing | Output format: json");
    assert_eq!(lines[1], "Selected File: resume.pdf");
    assert!(lines[2].contains("uploading"));

    let done = AppViewModel {
        status: StatusKind::Succeeded,
        progress_visible: false,
        can_cancel: false,
        alert: Some(AlertView {
            severity: AlertSeverity::Success,
            text: "Parsed 1 file".to_string(),
        }),
        ..in_flight
    };
    let lines = render(&done);
    assert_eq!(lines.len(), 3);
    assert!(lines[2].starts_with("OK: Parsed 1 file"));
}

#[test]
fn render_gives_empty_success_a_neutral_text() {
    let view = AppViewModel {
        status: StatusKind::Succeeded,
        selected_file: None,
        format: OutputFormat::Json,
        progress_visible: false,
        alert: Some(AlertView {
            severity: AlertSeverity::Success,
            text: String::new(),
        }),
        can_cancel: false,
        dirty: false,
    };

    let lines = render(&view);
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("OK: Parsing finished."), "{}", lines[1]);
}
