use std::sync::{mpsc, Arc};
use std::time::Duration;

use cyberware_core::{JobId, ScanMode, POLL_COMPLETE};
use cyberware_logging::{scan_debug, scan_warn};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::{Analyzer, EngineEvent, JobStatus};

#[derive(Debug, Clone)]
pub struct PollSettings {
    pub interval: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(500),
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// A running job-status poll. Dropping the handle cancels it.
pub struct PollTask {
    job_id: JobId,
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl PollTask {
    pub fn spawn(
        runtime: &Handle,
        analyzer: Arc<dyn Analyzer>,
        job_id: JobId,
        mode: ScanMode,
        settings: PollSettings,
        sink: Arc<dyn ProgressSink>,
    ) -> Self {
        let token = CancellationToken::new();
        let handle = runtime.spawn(run(
            analyzer,
            job_id.clone(),
            mode,
            settings,
            sink,
            token.clone(),
        ));
        Self {
            job_id,
            token,
            handle,
        }
    }

    pub fn job_id(&self) -> &JobId {
        &self.job_id
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for PollTask {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

async fn run(
    analyzer: Arc<dyn Analyzer>,
    job_id: JobId,
    mode: ScanMode,
    settings: PollSettings,
    sink: Arc<dyn ProgressSink>,
    token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(settings.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick fires immediately; progress starts one period in.
    ticker.tick().await;

    let mut progress = 0u8;
    loop {
        tokio::select! {
            _ = token.cancelled() => {
                scan_debug!("Poll cancelled job_id={} progress={}", job_id, progress);
                analyzer.release_job(&job_id);
                return;
            }
            _ = ticker.tick() => {}
        }

        let status = tokio::select! {
            _ = token.cancelled() => {
                scan_debug!("Poll cancelled mid-request job_id={}", job_id);
                analyzer.release_job(&job_id);
                return;
            }
            status = analyzer.job_status(&job_id, mode) => status,
        };

        match status {
            Ok(JobStatus::Pending { progress: reported }) => {
                progress = reported.min(POLL_COMPLETE).max(progress);
                sink.emit(EngineEvent::PollProgress {
                    job_id: job_id.clone(),
                    progress,
                });
            }
            Ok(JobStatus::Done(result)) => {
                sink.emit(EngineEvent::PollProgress {
                    job_id: job_id.clone(),
                    progress: POLL_COMPLETE,
                });
                sink.emit(EngineEvent::PollCompleted { job_id, result });
                return;
            }
            Err(err) => {
                scan_warn!("Poll failed job_id={}: {}", job_id, err);
                analyzer.release_job(&job_id);
                sink.emit(EngineEvent::PollFailed {
                    job_id,
                    message: err.to_string(),
                });
                return;
            }
        }
    }
}
