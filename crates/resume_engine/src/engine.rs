use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn};
use tokio_util::sync::CancellationToken;

use crate::upload::{ReqwestUploader, UploadSettings, Uploader};
use crate::{AttemptId, EngineEvent, UploadRequest};

enum EngineCommand {
    Submit(UploadRequest),
    Cancel { attempt: AttemptId },
}

type ActiveUploads = Arc<Mutex<HashMap<AttemptId, CancellationToken>>>;

/// Runs uploads on a background tokio runtime and reports back over a channel.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: UploadSettings) -> Self {
        Self::with_uploader(Arc::new(ReqwestUploader::new(settings)))
    }

    pub fn with_uploader(uploader: Arc<dyn Uploader>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let active: ActiveUploads = Arc::new(Mutex::new(HashMap::new()));
            while let Ok(command) = cmd_rx.recv() {
                handle_command(&runtime, &uploader, &active, &event_tx, command);
            }
            // Handle dropped: stop whatever is still running.
            let pending: Vec<CancellationToken> = match active.lock() {
                Ok(mut tokens) => tokens.drain().map(|(_, token)| token).collect(),
                Err(_) => Vec::new(),
            };
            for token in pending {
                token.cancel();
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn submit(&self, request: UploadRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Submit(request));
    }

    /// Cancelling an attempt that already finished does nothing.
    pub fn cancel(&self, attempt: AttemptId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { attempt });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn handle_command(
    runtime: &tokio::runtime::Runtime,
    uploader: &Arc<dyn Uploader>,
    active: &ActiveUploads,
    event_tx: &mpsc::Sender<EngineEvent>,
    command: EngineCommand,
) {
    match command {
        EngineCommand::Submit(request) => {
            let attempt = request.attempt;
            let token = CancellationToken::new();
            if let Ok(mut tokens) = active.lock() {
                if !tokens.is_empty() {
                    engine_warn!(
                        "Attempt {} submitted while {} upload(s) still active",
                        attempt,
                        tokens.len()
                    );
                }
                tokens.insert(attempt, token.clone());
            }

            let uploader = uploader.clone();
            let active = active.clone();
            let event_tx = event_tx.clone();
            runtime.spawn(async move {
                let result = uploader.upload(&request, &token).await;
                if let Ok(mut tokens) = active.lock() {
                    tokens.remove(&attempt);
                }
                match &result {
                    Ok(_) => engine_info!("Attempt {} completed", attempt),
                    Err(err) => engine_warn!("Attempt {} failed: {}", attempt, err),
                }
                let _ = event_tx.send(EngineEvent::UploadCompleted { attempt, result });
            });
        }
        EngineCommand::Cancel { attempt } => {
            let token = active.lock().ok().and_then(|mut tokens| tokens.remove(&attempt));
            match token {
                Some(token) => {
                    engine_info!("Cancelling attempt {}", attempt);
                    token.cancel();
                }
                None => engine_debug!("Cancel for inactive attempt {} ignored", attempt),
            }
        }
    }
}
