use std::sync::{mpsc, Arc};
use std::thread;

use cyberware_core::{JobId, ScanMode, SubmissionKind, SubmissionRequest};
use cyberware_logging::{scan_debug, scan_error, scan_info};

use crate::poller::{ChannelProgressSink, PollSettings, PollTask, ProgressSink};
use crate::{AnalysisError, Analyzer, EngineEvent};

const ENGINE_STOPPED: &str = "analysis engine is not running";

enum EngineCommand {
    Submit(SubmissionRequest),
    StartPolling { job_id: JobId, mode: ScanMode },
    CancelPolling,
}

/// Front door to the analysis backend: commands in, events out.
///
/// Owns a background thread running a tokio runtime. At most one job is
/// polled at a time; starting a new poll cancels the previous one.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(analyzer: Arc<dyn Analyzer>, poll_settings: PollSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    scan_error!("Failed to start analysis runtime: {}", err);
                    reject_submissions(&cmd_rx, &event_tx, &err.to_string());
                    return;
                }
            };
            let sink: Arc<dyn ProgressSink> = Arc::new(ChannelProgressSink::new(event_tx.clone()));
            let mut active_poll: Option<PollTask> = None;

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Submit(request) => {
                        runtime.spawn(handle_submit(analyzer.clone(), request, event_tx.clone()));
                    }
                    EngineCommand::StartPolling { job_id, mode } => {
                        scan_info!("StartPolling job_id={} mode={}", job_id, mode);
                        // Replacing the handle drops, and so cancels, the old task.
                        active_poll = Some(PollTask::spawn(
                            runtime.handle(),
                            analyzer.clone(),
                            job_id,
                            mode,
                            poll_settings.clone(),
                            sink.clone(),
                        ));
                    }
                    EngineCommand::CancelPolling => {
                        if let Some(task) = active_poll.take() {
                            scan_debug!("CancelPolling job_id={}", task.job_id());
                        }
                    }
                }
            }
        });

        Self { cmd_tx, event_rx }
    }

    /// Queues a submission. Fails only when the engine thread is gone, in
    /// which case no `SubmissionResolved` will follow.
    pub fn submit(&self, request: SubmissionRequest) -> Result<(), AnalysisError> {
        self.cmd_tx
            .send(EngineCommand::Submit(request))
            .map_err(|_| AnalysisError::Submission(ENGINE_STOPPED.to_string()))
    }

    pub fn start_polling(&self, job_id: JobId, mode: ScanMode) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::StartPolling { job_id, mode });
    }

    pub fn cancel_polling(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CancelPolling);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

/// Runs the backend call in its own task so a panic still resolves the submission.
async fn handle_submit(
    analyzer: Arc<dyn Analyzer>,
    request: SubmissionRequest,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let kind = request.kind;
    let mode = request.mode;
    let call = tokio::spawn(async move { analyzer.submit(&request).await });
    let result = match call.await {
        Ok(result) => result,
        Err(err) => {
            scan_error!("Analysis task aborted kind={}: {}", kind, err);
            Err(aborted_error(kind))
        }
    };
    if let Err(err) = &result {
        scan_error!("Submission failed kind={}: {}", kind, err);
    }
    let _ = event_tx.send(EngineEvent::SubmissionResolved { kind, mode, result });
}

fn aborted_error(kind: SubmissionKind) -> AnalysisError {
    let message = kind.failure_message().to_string();
    if kind.is_file() {
        AnalysisError::Upload(message)
    } else {
        AnalysisError::Submission(message)
    }
}

/// Answers every submission with an error when no runtime could be built.
fn reject_submissions(
    cmd_rx: &mpsc::Receiver<EngineCommand>,
    event_tx: &mpsc::Sender<EngineEvent>,
    reason: &str,
) {
    while let Ok(command) = cmd_rx.recv() {
        if let EngineCommand::Submit(request) = command {
            let _ = event_tx.send(EngineEvent::SubmissionResolved {
                kind: request.kind,
                mode: request.mode,
                result: Err(AnalysisError::Submission(format!(
                    "analysis runtime unavailable: {reason}"
                ))),
            });
        }
    }
}
