use std::sync::Once;

use pretty_assertions::assert_eq;
use resume_core::{
    update, AlertSeverity, AlertView, AppState, Effect, FileCandidate, Msg, OutputFormat,
    StatusKind, SubmissionState, UploadJob, UploadOutcome, FALLBACK_ERROR_MESSAGE,
    NOT_SELECTED_MESSAGE,
};

const MIB: u64 = 1024 * 1024;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn choose(state: AppState, name: &str, size_bytes: u64) -> AppState {
    let candidate = FileCandidate::new(name, size_bytes, format!("/resumes/{name}"));
    let (state, effects) = update(state, Msg::FileChosen(Some(candidate)));
    assert!(effects.is_empty());
    state
}

fn start_job(effects: &[Effect]) -> UploadJob {
    match effects {
        [Effect::StartUpload(job)] => job.clone(),
        other => panic!("expected a single StartUpload, got {other:?}"),
    }
}

fn submit_and_finish(outcome: UploadOutcome) -> AppState {
    let state = choose(AppState::new(), "resume.pdf", MIB);
    let (state, effects) = update(state, Msg::SubmitClicked);
    let job = start_job(&effects);
    let (state, effects) = update(
        state,
        Msg::UploadFinished {
            attempt: job.attempt,
            outcome,
        },
    );
    assert!(effects.is_empty());
    state
}

#[test]
fn valid_selection_moves_to_ready_and_hides_alert() {
    init_logging();
    let state = choose(AppState::new(), "resume.exe", 10);
    assert!(state.alert_visible());

    let mut state = choose(state, "resume.pdf", 2 * MIB);
    let view = state.view();

    assert_eq!(view.status, StatusKind::Ready);
    assert_eq!(view.selected_file.as_deref(), Some("resume.pdf"));
    assert_eq!(view.alert, None);
    assert!(!view.progress_visible);
    assert!(!view.can_cancel);
    assert!(state.consume_dirty());
}

#[test]
fn rejected_selection_fails_with_combined_message() {
    init_logging();
    let state = choose(AppState::new(), "resume.pdf", MIB);
    let state = choose(state, "resume.exe", MIB);

    assert_eq!(
        state.submission(),
        &SubmissionState::Failed {
            error: "This file was not accepted. Only PDF, DOCX, or DOC files under 5MB are allowed."
                .to_string(),
            file: None,
        }
    );
    assert_eq!(
        state.view().alert.map(|alert| alert.severity),
        Some(AlertSeverity::Warning)
    );

    // The earlier accepted file is gone, so submitting issues nothing.
    let (state, effects) = update(state, Msg::SubmitClicked);
    assert!(effects.is_empty());
    assert_eq!(
        state.submission(),
        &SubmissionState::Failed {
            error: NOT_SELECTED_MESSAGE.to_string(),
            file: None,
        }
    );
}

#[test]
fn dismissed_picker_reports_no_file_selected() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::FileChosen(None));

    assert!(effects.is_empty());
    assert_eq!(
        state.view().alert,
        Some(AlertView {
            severity: AlertSeverity::Warning,
            text: "No file selected.".to_string(),
        })
    );
}

#[test]
fn submit_without_file_fails_without_request() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::SubmitClicked);

    assert!(effects.is_empty());
    assert_eq!(
        state.submission(),
        &SubmissionState::Failed {
            error: NOT_SELECTED_MESSAGE.to_string(),
            file: None,
        }
    );
    assert!(state.alert_visible());
}

#[test]
fn submit_issues_one_upload_with_chosen_format() {
    init_logging();
    let state = choose(AppState::new(), "resume.pdf", 2 * MIB);
    let (state, _) = update(state, Msg::FormatChosen(OutputFormat::Spreadsheet));
    let (state, effects) = update(state, Msg::SubmitClicked);

    let job = start_job(&effects);
    assert_eq!(job.format, OutputFormat::Spreadsheet);
    assert_eq!(job.output_folder, "");
    assert_eq!(job.file.name(), "resume.pdf");

    let view = state.view();
    assert_eq!(view.status, StatusKind::InFlight);
    assert!(view.progress_visible);
    assert!(view.can_cancel);
    assert_eq!(view.alert, None);
    assert_eq!(state.cancel_handle().map(|h| h.attempt()), Some(job.attempt));
}

#[test]
fn second_submit_while_in_flight_is_ignored() {
    init_logging();
    let state = choose(AppState::new(), "resume.pdf", MIB);
    let (state, effects) = update(state, Msg::SubmitClicked);
    let job = start_job(&effects);

    let (state, effects) = update(state, Msg::SubmitClicked);
    assert!(effects.is_empty());
    assert_eq!(state.cancel_handle().map(|h| h.attempt()), Some(job.attempt));
}

#[test]
fn selection_and_reset_are_ignored_while_in_flight() {
    init_logging();
    let state = choose(AppState::new(), "resume.pdf", MIB);
    let (state, _) = update(state, Msg::SubmitClicked);
    let before = state.clone();

    let (state, effects) = update(
        state,
        Msg::FileChosen(Some(FileCandidate::new("other.doc", 1, "/other.doc"))),
    );
    assert!(effects.is_empty());
    let (state, effects) = update(state, Msg::ResetClicked);
    assert!(effects.is_empty());

    assert_eq!(state.submission(), before.submission());
}

#[test]
fn format_change_in_flight_does_not_touch_the_attempt() {
    init_logging();
    let state = choose(AppState::new(), "resume.pdf", MIB);
    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, _) = update(state, Msg::FormatChosen(OutputFormat::Spreadsheet));

    assert_eq!(state.format(), OutputFormat::Spreadsheet);
    match state.submission() {
        SubmissionState::InFlight { format, .. } => assert_eq!(*format, OutputFormat::Json),
        other => panic!("unexpected state {other:?}"),
    }
}

#[test]
fn format_change_updates_ready_state() {
    init_logging();
    let state = choose(AppState::new(), "resume.doc", MIB);
    let (state, _) = update(state, Msg::FormatChosen(OutputFormat::Spreadsheet));

    match state.submission() {
        SubmissionState::Ready { format, .. } => assert_eq!(*format, OutputFormat::Spreadsheet),
        other => panic!("unexpected state {other:?}"),
    }
}

#[test]
fn success_message_is_taken_verbatim() {
    init_logging();
    let state = submit_and_finish(UploadOutcome::Completed {
        message: Some("OK".to_string()),
    });

    let view = state.view();
    assert_eq!(view.status, StatusKind::Succeeded);
    assert!(!view.progress_visible);
    assert!(!view.can_cancel);
    assert_eq!(
        view.alert,
        Some(AlertView {
            severity: AlertSeverity::Success,
            text: "OK".to_string(),
        })
    );
}

#[test]
fn success_without_message_is_still_success() {
    init_logging();
    let state = submit_and_finish(UploadOutcome::Completed { message: None });

    match state.submission() {
        SubmissionState::Succeeded { message, .. } => assert_eq!(message, ""),
        other => panic!("unexpected state {other:?}"),
    }
}

#[test]
fn service_error_uses_structured_field() {
    init_logging();
    let state = submit_and_finish(UploadOutcome::ServiceFailed {
        error: Some("Bad format".to_string()),
    });

    match state.submission() {
        SubmissionState::Failed { error, file } => {
            assert_eq!(error, "Bad format");
            assert!(file.is_some());
        }
        other => panic!("unexpected state {other:?}"),
    }
}

#[test]
fn service_error_without_field_falls_back() {
    init_logging();
    for error in [None, Some(String::new())] {
        let state = submit_and_finish(UploadOutcome::ServiceFailed { error });
        assert_eq!(
            state.view().alert.map(|alert| alert.text),
            Some(FALLBACK_ERROR_MESSAGE.to_string())
        );
    }
}

#[test]
fn transport_failure_uses_fallback() {
    init_logging();
    let state = submit_and_finish(UploadOutcome::TransportFailed {
        detail: "connection refused".to_string(),
    });

    match state.submission() {
        SubmissionState::Failed { error, .. } => assert_eq!(error, FALLBACK_ERROR_MESSAGE),
        other => panic!("unexpected state {other:?}"),
    }
}

#[test]
fn dismiss_hides_alert_without_changing_state() {
    init_logging();
    let state = submit_and_finish(UploadOutcome::Completed {
        message: Some("Parsed 1 file".to_string()),
    });
    let before = state.submission().clone();

    let (state, effects) = update(state, Msg::AlertDismissed);

    assert!(effects.is_empty());
    assert!(!state.alert_visible());
    assert_eq!(state.view().alert, None);
    assert_eq!(state.submission(), &before);
}

#[test]
fn resubmit_after_success_starts_a_new_attempt() {
    init_logging();
    let state = choose(AppState::new(), "resume.pdf", MIB);
    let (state, effects) = update(state, Msg::SubmitClicked);
    let first = start_job(&effects);
    let (state, _) = update(
        state,
        Msg::UploadFinished {
            attempt: first.attempt,
            outcome: UploadOutcome::Completed {
                message: Some("done".to_string()),
            },
        },
    );

    let (state, effects) = update(state, Msg::SubmitClicked);
    let second = start_job(&effects);

    assert_ne!(first.attempt, second.attempt);
    assert_eq!(second.file, first.file);
    // Entering InFlight clears the previous message.
    assert_eq!(state.view().alert, None);
    assert_eq!(state.view().status, StatusKind::InFlight);
}

#[test]
fn reset_clears_file_but_keeps_format() {
    init_logging();
    let state = choose(AppState::new(), "resume.pdf", MIB);
    let (state, _) = update(state, Msg::FormatChosen(OutputFormat::Spreadsheet));
    let (state, effects) = update(state, Msg::ResetClicked);

    assert!(effects.is_empty());
    assert_eq!(state.submission(), &SubmissionState::Idle);
    assert_eq!(state.format(), OutputFormat::Spreadsheet);
    assert_eq!(state.view().selected_file, None);
    assert_eq!(state.view().alert, None);
}
