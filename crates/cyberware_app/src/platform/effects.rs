use std::sync::Arc;
use std::time::Duration;

use cyberware_core::{Effect, Msg};
use cyberware_engine::{
    AnalysisError, Analyzer, EngineEvent, EngineHandle, HttpAnalyzer, HttpSettings, PollSettings,
    SimulatedAnalyzer, SimulatedSettings,
};
use cyberware_logging::{scan_error, scan_info};

use super::config::{AppConfig, Backend};

/// Executes core effects on the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: &AppConfig) -> Result<Self, AnalysisError> {
        let analyzer = build_analyzer(config)?;
        let engine = EngineHandle::new(
            analyzer,
            PollSettings {
                interval: config.poll_interval(),
            },
        );
        Ok(Self { engine })
    }

    /// Runs effects on the engine. Returns messages for submissions the engine
    /// could not accept, so the core still sees them resolve.
    pub fn enqueue(&self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut rejected = Vec::new();
        for effect in effects {
            match effect {
                Effect::Submit(request) => {
                    scan_info!("Analysis started: {}", request.meta());
                    let (kind, mode) = (request.kind, request.mode);
                    if let Err(err) = self.engine.submit(request) {
                        scan_error!("Submission not queued kind={}: {}", kind, err);
                        rejected.push(map_event(EngineEvent::SubmissionResolved {
                            kind,
                            mode,
                            result: Err(err),
                        }));
                    }
                }
                Effect::StartPolling { job_id, mode } => {
                    self.engine.start_polling(job_id, mode);
                }
                Effect::CancelPolling => {
                    self.engine.cancel_polling();
                }
            }
        }
        rejected
    }

    /// Messages for every engine event received since the last call.
    pub fn drain(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.engine.try_recv())
            .map(map_event)
            .collect()
    }
}

fn build_analyzer(config: &AppConfig) -> Result<Arc<dyn Analyzer>, AnalysisError> {
    match &config.backend {
        Backend::Simulated => {
            scan_info!(
                "Using simulated analyzer latency_ms={} increment={}",
                config.submit_latency_ms,
                config.poll_increment
            );
            Ok(Arc::new(SimulatedAnalyzer::new(SimulatedSettings {
                latency: config.submit_latency(),
                progress_step: config.poll_increment,
            })))
        }
        Backend::Http {
            base_url,
            request_timeout_ms,
        } => {
            scan_info!("Using analysis service at {}", base_url);
            let analyzer = HttpAnalyzer::new(HttpSettings {
                base_url: base_url.clone(),
                request_timeout: Duration::from_millis(*request_timeout_ms),
                ..HttpSettings::default()
            })?;
            Ok(Arc::new(analyzer))
        }
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SubmissionResolved { kind, mode, result } => Msg::SubmissionResolved {
            kind,
            mode,
            result: result.map_err(|err| {
                let message = err.to_string();
                if message.trim().is_empty() {
                    kind.failure_message().to_string()
                } else {
                    message
                }
            }),
        },
        EngineEvent::PollProgress { job_id, progress } => Msg::PollProgress { job_id, progress },
        EngineEvent::PollCompleted { job_id, result } => Msg::PollCompleted { job_id, result },
        EngineEvent::PollFailed { job_id, message } => Msg::PollFailed { job_id, message },
    }
}
