use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use std::path::PathBuf;

use cyberware_core::{
    AnalysisOutcome, JobId, Payload, ScanMode, SubmissionKind, SubmissionRequest,
};
use cyberware_engine::{
    AnalysisError, Analyzer, EngineEvent, EngineHandle, JobStatus, PollSettings, RandomVerdicts,
    SimulatedAnalyzer, SimulatedSettings,
};

/// Backend whose every call blows up.
struct PanickingAnalyzer;

#[async_trait::async_trait]
impl Analyzer for PanickingAnalyzer {
    async fn submit(&self, _request: &SubmissionRequest) -> Result<AnalysisOutcome, AnalysisError> {
        panic!("backend bug");
    }

    async fn job_status(&self, _job_id: &JobId, _mode: ScanMode) -> Result<JobStatus, AnalysisError> {
        panic!("backend bug");
    }
}

fn engine() -> EngineHandle {
    let analyzer = SimulatedAnalyzer::with_verdicts(
        SimulatedSettings {
            latency: Duration::from_millis(10),
            progress_step: 25,
        },
        Arc::new(RandomVerdicts::seeded(11)),
    );
    EngineHandle::new(
        Arc::new(analyzer),
        PollSettings {
            interval: Duration::from_millis(10),
        },
    )
}

fn wait_for(engine: &EngineHandle, mut done: impl FnMut(&EngineEvent) -> bool) -> Vec<EngineEvent> {
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut events = Vec::new();
    while Instant::now() < deadline {
        while let Some(event) = engine.try_recv() {
            let finished = done(&event);
            events.push(event);
            if finished {
                return events;
            }
        }
        thread::sleep(Duration::from_millis(5));
    }
    panic!("timed out waiting for engine events: {events:?}");
}

#[test]
fn text_submission_resolves_with_request_mode() {
    let engine = engine();
    engine
        .submit(SubmissionRequest {
            kind: SubmissionKind::Text,
            payload: Payload::Text("hello".to_string()),
            mode: ScanMode::Phishing,
        })
        .expect("engine running");

    let events = wait_for(&engine, |event| {
        matches!(event, EngineEvent::SubmissionResolved { .. })
    });
    match events.last() {
        Some(EngineEvent::SubmissionResolved { kind, mode, result }) => {
            assert_eq!(*kind, SubmissionKind::Text);
            assert_eq!(*mode, ScanMode::Phishing);
            assert!(result.as_ref().is_ok_and(|outcome| outcome.result().is_some()));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn url_submission_then_polling_runs_to_completion() {
    let engine = engine();
    engine
        .submit(SubmissionRequest {
            kind: SubmissionKind::Url,
            payload: Payload::Url("https://example.com".to_string()),
            mode: ScanMode::Phishing,
        })
        .expect("engine running");

    let events = wait_for(&engine, |event| {
        matches!(event, EngineEvent::SubmissionResolved { .. })
    });
    let job_id = match events.last() {
        Some(EngineEvent::SubmissionResolved {
            result: Ok(outcome),
            ..
        }) => outcome.job_id().cloned().expect("deferred job"),
        other => panic!("unexpected event {other:?}"),
    };

    engine.start_polling(job_id.clone(), ScanMode::Phishing);
    let events = wait_for(&engine, |event| {
        matches!(event, EngineEvent::PollCompleted { .. })
    });

    let progress: Vec<u8> = events
        .iter()
        .filter_map(|event| match event {
            EngineEvent::PollProgress { job_id: id, progress } if *id == job_id => Some(*progress),
            _ => None,
        })
        .collect();
    assert_eq!(progress, vec![25, 50, 75, 100]);
    match events.last() {
        Some(EngineEvent::PollCompleted { job_id: id, result }) => {
            assert_eq!(*id, job_id);
            assert_eq!(result.mode(), ScanMode::Phishing);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn cancel_polling_stops_progress_events() {
    let engine = EngineHandle::new(
        Arc::new(SimulatedAnalyzer::with_verdicts(
            SimulatedSettings {
                latency: Duration::ZERO,
                progress_step: 1,
            },
            Arc::new(RandomVerdicts::seeded(3)),
        )),
        PollSettings {
            interval: Duration::from_millis(10),
        },
    );
    engine.start_polling(
        cyberware_core::JobId::new("phishing_job_cancel01"),
        ScanMode::Phishing,
    );
    wait_for(&engine, |event| {
        matches!(event, EngineEvent::PollProgress { .. })
    });

    engine.cancel_polling();
    thread::sleep(Duration::from_millis(50));
    while engine.try_recv().is_some() {}

    thread::sleep(Duration::from_millis(100));
    assert!(engine.try_recv().is_none());
}

#[test]
fn panicking_backend_still_resolves_submission() {
    let engine = EngineHandle::new(Arc::new(PanickingAnalyzer), PollSettings::default());
    engine
        .submit(SubmissionRequest {
            kind: SubmissionKind::Image,
            payload: Payload::File {
                path: PathBuf::from("/tmp/a.png"),
                name: "a.png".to_string(),
            },
            mode: ScanMode::Deepfake,
        })
        .expect("engine running");

    let events = wait_for(&engine, |event| {
        matches!(event, EngineEvent::SubmissionResolved { .. })
    });
    assert_eq!(
        events.last(),
        Some(&EngineEvent::SubmissionResolved {
            kind: SubmissionKind::Image,
            mode: ScanMode::Deepfake,
            result: Err(AnalysisError::Upload("Failed to analyze file".to_string())),
        })
    );

    engine
        .submit(SubmissionRequest {
            kind: SubmissionKind::Text,
            payload: Payload::Text("hello".to_string()),
            mode: ScanMode::Phishing,
        })
        .expect("engine survives a panicking call");
    let events = wait_for(&engine, |event| {
        matches!(event, EngineEvent::SubmissionResolved { .. })
    });
    assert!(matches!(
        events.last(),
        Some(EngineEvent::SubmissionResolved {
            result: Err(AnalysisError::Submission(_)),
            ..
        })
    ));
}
