use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use resume_core::{
    update, AppState, AppViewModel, CancelHandle, FileCandidate, Msg, OutputFormat,
    SubmissionState,
};
use resume_engine::{EngineHandle, UploadSettings};

use super::effects::EffectRunner;

/// Owns the submission state and the one outstanding upload.
///
/// Every intent goes through [`resume_core::update`]; the controller only
/// executes the resulting effects and feeds transport outcomes back in.
pub struct SubmissionController {
    state: AppState,
    runner: EffectRunner,
}

impl SubmissionController {
    pub fn new(settings: UploadSettings) -> Self {
        Self::with_engine(EngineHandle::new(settings))
    }

    pub fn with_engine(engine: EngineHandle) -> Self {
        Self {
            state: AppState::new(),
            runner: EffectRunner::new(engine),
        }
    }

    pub fn state(&self) -> &SubmissionState {
        self.state.submission()
    }

    pub fn format(&self) -> OutputFormat {
        self.state.format()
    }

    pub fn alert_visible(&self) -> bool {
        self.state.alert_visible()
    }

    pub fn cancel_handle(&self) -> Option<CancelHandle> {
        self.state.cancel_handle()
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    pub fn select_file(&mut self, candidate: Option<FileCandidate>) {
        self.dispatch(Msg::FileChosen(candidate));
    }

    pub fn set_format(&mut self, format: OutputFormat) {
        self.dispatch(Msg::FormatChosen(format));
    }

    pub fn reset(&mut self) {
        self.dispatch(Msg::ResetClicked);
    }

    pub fn submit(&mut self) {
        self.dispatch(Msg::SubmitClicked);
    }

    /// Cancel the current attempt, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.cancel_handle() {
            self.cancel_with(handle);
        }
    }

    /// Present a handle obtained earlier; stale handles change nothing.
    pub fn cancel_with(&mut self, handle: CancelHandle) {
        self.dispatch(Msg::CancelRequested(handle));
    }

    pub fn dismiss_alert(&mut self) {
        self.dispatch(Msg::AlertDismissed);
    }

    /// Apply any transport outcomes that have arrived, without blocking.
    pub fn pump(&mut self) {
        while let Some(msg) = self.runner.poll() {
            self.dispatch(msg);
        }
    }

    /// Block until the current attempt reaches a terminal state.
    ///
    /// Returns `false` if `timeout` elapsed while still in flight. A timeout
    /// too large to represent as an instant waits without a deadline.
    pub fn wait_for_outcome(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now().checked_add(timeout);
        while self.cancel_handle().is_some() {
            let remaining = match deadline {
                Some(deadline) => deadline.saturating_duration_since(Instant::now()),
                None => timeout,
            };
            if remaining.is_zero() {
                return false;
            }
            match self.runner.wait(remaining) {
                Some(msg) => self.dispatch(msg),
                None => return false,
            }
        }
        true
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
    }
}

/// Build a picker candidate from a path on disk.
pub fn candidate_from_path(path: &Path) -> io::Result<FileCandidate> {
    let metadata = std::fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a file", path.display()),
        ));
    }
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(FileCandidate::new(name, metadata.len(), path))
}
