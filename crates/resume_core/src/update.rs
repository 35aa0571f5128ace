use engine_logging::{engine_debug, engine_info, engine_warn};

use crate::state::CancelHandle;
use crate::{
    validate, AppState, AttemptId, Effect, Msg, SubmissionState, UploadJob, UploadOutcome,
    Verdict,
};

pub const NOT_SELECTED_MESSAGE: &str = "Resume is not selected. Please upload a resume.";
pub const FALLBACK_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileChosen(candidate) => {
            if is_in_flight(&state) {
                engine_warn!("File selection ignored while a submission is in flight");
                return (state, Vec::new());
            }
            match validate(candidate) {
                Verdict::Accepted(file) => {
                    engine_info!(
                        "Selected {} ({} bytes)",
                        file.name(),
                        file.size_bytes()
                    );
                    let format = state.format();
                    state.transition(SubmissionState::Ready { file, format });
                }
                Verdict::Rejected(rejection) => {
                    engine_info!("File rejected: {:?}", rejection.reason);
                    state.transition(SubmissionState::Failed {
                        error: rejection.message().to_string(),
                        file: None,
                    });
                }
            }
            Vec::new()
        }
        Msg::FormatChosen(format) => {
            state.set_format(format);
            Vec::new()
        }
        Msg::ResetClicked => {
            if is_in_flight(&state) {
                engine_warn!("Reset ignored while a submission is in flight");
                return (state, Vec::new());
            }
            state.transition(SubmissionState::Idle);
            Vec::new()
        }
        Msg::SubmitClicked => submit(&mut state),
        Msg::CancelRequested(handle) => {
            if state.cancel_handle() != Some(handle) {
                engine_debug!("Stale cancel for attempt {} ignored", handle.attempt());
                return (state, Vec::new());
            }
            let file = state.submission().file().cloned();
            if let Some(file) = file {
                engine_info!("Attempt {} cancelled by user", handle.attempt());
                state.transition(SubmissionState::Cancelled { file });
            }
            vec![Effect::CancelUpload {
                attempt: handle.attempt(),
            }]
        }
        Msg::AlertDismissed => {
            state.set_alert_visible(false);
            Vec::new()
        }
        Msg::UploadFinished { attempt, outcome } => {
            finish(&mut state, attempt, outcome);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn is_in_flight(state: &AppState) -> bool {
    matches!(state.submission(), SubmissionState::InFlight { .. })
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    if is_in_flight(state) {
        engine_warn!("Submit ignored: a submission is already in flight");
        return Vec::new();
    }

    let Some(file) = state.submission().file().cloned() else {
        engine_info!("Submit without a selected file");
        state.transition(SubmissionState::Failed {
            error: NOT_SELECTED_MESSAGE.to_string(),
            file: None,
        });
        return Vec::new();
    };

    let attempt = state.next_attempt();
    let format = state.format();
    engine_info!(
        "Attempt {} started: file={} format={}",
        attempt,
        file.name(),
        format
    );
    state.transition(SubmissionState::InFlight {
        file: file.clone(),
        format,
        handle: CancelHandle::new(attempt),
    });

    vec![Effect::StartUpload(UploadJob {
        attempt,
        file,
        format,
        output_folder: String::new(),
    })]
}

fn finish(state: &mut AppState, attempt: AttemptId, outcome: UploadOutcome) {
    let file = match state.submission() {
        SubmissionState::InFlight { file, handle, .. } if handle.attempt() == attempt => {
            file.clone()
        }
        _ => {
            engine_debug!("Late outcome for attempt {} ignored: {:?}", attempt, outcome);
            return;
        }
    };

    let next = match outcome {
        UploadOutcome::Completed { message } => {
            engine_info!("Attempt {} succeeded", attempt);
            SubmissionState::Succeeded {
                message: message.unwrap_or_default(),
                file,
            }
        }
        UploadOutcome::ServiceFailed { error } => {
            let error = error
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
            engine_warn!("Attempt {} rejected by service: {}", attempt, error);
            SubmissionState::Failed {
                error,
                file: Some(file),
            }
        }
        UploadOutcome::TransportFailed { detail } => {
            engine_warn!("Attempt {} got no response: {}", attempt, detail);
            SubmissionState::Failed {
                error: FALLBACK_ERROR_MESSAGE.to_string(),
                file: Some(file),
            }
        }
        UploadOutcome::Aborted => {
            engine_info!("Attempt {} aborted by transport", attempt);
            SubmissionState::Cancelled { file }
        }
    };
    state.transition(next);
}
