mod common;

use common::{
    choose_file, fake_result, init_logging, phishing_state, submit_text, submit_url,
};
use cyberware_core::{
    update, AnalysisOutcome, AppState, Effect, JobId, Msg, Payload, ResultsPanel, ScanMode,
    SubmissionKind, SubmissionMeta, SubmissionRequest,
};
use pretty_assertions::assert_eq;

fn submitted_request(effects: &[Effect]) -> SubmissionRequest {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Submit(request) => Some(request.clone()),
            _ => None,
        })
        .expect("submit effect")
}

#[test]
fn mode_toggle_resets_active_tab_to_mode_default() {
    init_logging();
    let state = AppState::new();
    assert_eq!(state.scanner().active_tab(), SubmissionKind::Image);

    let (state, _) = update(state, Msg::TabSelected(SubmissionKind::Video));
    assert_eq!(state.scanner().active_tab(), SubmissionKind::Video);

    let (state, _) = update(state, Msg::ModeToggled);
    assert_eq!(state.page().scan_mode(), ScanMode::Phishing);
    assert_eq!(state.scanner().active_tab(), SubmissionKind::Url);

    let (state, _) = update(state, Msg::TabSelected(SubmissionKind::Text));
    let (state, _) = update(state, Msg::ModeSelected(ScanMode::Deepfake));
    assert_eq!(state.scanner().active_tab(), SubmissionKind::Image);
}

#[test]
fn tabs_outside_the_current_mode_are_ignored() {
    init_logging();
    let mut state = AppState::new();
    assert!(!state.consume_dirty());

    let (mut state, _) = update(state, Msg::TabSelected(SubmissionKind::Url));
    assert_eq!(state.scanner().active_tab(), SubmissionKind::Image);
    assert!(!state.consume_dirty());
}

#[test]
fn url_submission_starts_analysis_with_meta() {
    init_logging();
    let (state, effects) = submit_url(phishing_state(), "https://example.com");

    let request = submitted_request(&effects);
    assert_eq!(
        request.meta(),
        SubmissionMeta {
            kind: SubmissionKind::Url,
            subject: "https://example.com".to_string(),
            mode: ScanMode::Phishing,
        }
    );
    assert!(state.scanner().in_flight());
    assert!(state.page().is_analyzing());
    assert_eq!(state.view().results, ResultsPanel::Loading);
    assert!(!state.view().can_submit);
}

#[test]
fn url_submission_requires_a_valid_url() {
    init_logging();
    let (state, effects) = submit_url(phishing_state(), "   ");
    assert!(effects.is_empty());
    assert!(!state.scanner().in_flight());

    let (state, effects) = submit_url(state, "not a url");
    assert!(effects.is_empty());
    assert!(!state.page().is_analyzing());
}

#[test]
fn file_upload_announces_file_name() {
    init_logging();
    let (state, effects) = choose_file(AppState::new(), "/tmp/uploads/a.png");

    let request = submitted_request(&effects);
    assert_eq!(
        request.payload,
        Payload::File {
            path: "/tmp/uploads/a.png".into(),
            name: "a.png".to_string(),
        }
    );
    assert_eq!(
        request.meta(),
        SubmissionMeta {
            kind: SubmissionKind::Image,
            subject: "a.png".to_string(),
            mode: ScanMode::Deepfake,
        }
    );
    assert!(state.scanner().in_flight());
}

#[test]
fn in_flight_flag_blocks_second_submission() {
    init_logging();
    let (state, effects) = choose_file(AppState::new(), "a.png");
    assert_eq!(effects.len(), 1);

    let (state, effects) = choose_file(state, "b.png");
    assert!(effects.is_empty());
    assert!(state.scanner().in_flight());
}

#[test]
fn upload_success_clears_in_flight_and_stores_result() {
    init_logging();
    let (state, _) = choose_file(AppState::new(), "a.png");
    let (state, effects) = update(
        state,
        Msg::SubmissionResolved {
            kind: SubmissionKind::Image,
            mode: ScanMode::Deepfake,
            result: Ok(AnalysisOutcome::Immediate(fake_result())),
        },
    );

    assert!(effects.is_empty());
    assert!(!state.scanner().in_flight());
    assert!(!state.page().is_analyzing());
    assert_eq!(state.page().result(), Some(&fake_result()));
    assert!(state.page().job_id().is_none());
}

#[test]
fn upload_failure_clears_in_flight_and_reports_error() {
    init_logging();
    let (state, _) = choose_file(AppState::new(), "a.png");
    let (state, effects) = update(
        state,
        Msg::SubmissionResolved {
            kind: SubmissionKind::Image,
            mode: ScanMode::Deepfake,
            result: Err("disk unreadable".to_string()),
        },
    );

    assert!(effects.is_empty());
    assert!(!state.scanner().in_flight());
    assert_eq!(state.page().error(), Some("disk unreadable"));
    assert!(state.page().result().is_none());
    assert_eq!(
        state.view().results,
        ResultsPanel::Error {
            message: "disk unreadable".to_string()
        }
    );
}

#[test]
fn empty_failure_message_falls_back_to_kind_message() {
    init_logging();
    let (state, _) = submit_text(phishing_state(), "Your account is locked");
    let (state, _) = update(
        state,
        Msg::SubmissionResolved {
            kind: SubmissionKind::Text,
            mode: ScanMode::Phishing,
            result: Err(String::new()),
        },
    );

    assert_eq!(state.page().error(), Some("Failed to analyze text"));
}

#[test]
fn text_submission_sends_untrimmed_text() {
    init_logging();
    let (_state, effects) = submit_text(phishing_state(), "  verify your password\n");
    let request = submitted_request(&effects);
    assert_eq!(request.kind, SubmissionKind::Text);
    assert_eq!(
        request.payload,
        Payload::Text("  verify your password\n".to_string())
    );
}

#[test]
fn deferred_outcome_stores_job_and_starts_polling() {
    init_logging();
    let (state, _) = submit_url(phishing_state(), "https://example.com");
    let job_id = JobId::new("phishing_job_abc12345");
    let (state, effects) = update(
        state,
        Msg::SubmissionResolved {
            kind: SubmissionKind::Url,
            mode: ScanMode::Phishing,
            result: Ok(AnalysisOutcome::Deferred(job_id.clone())),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::StartPolling {
            job_id: job_id.clone(),
            mode: ScanMode::Phishing,
        }]
    );
    assert_eq!(state.page().job_id(), Some(&job_id));
    assert!(state.page().result().is_none());
    assert_eq!(state.view().results, ResultsPanel::Polling { progress: 0 });
}

#[test]
fn reset_returns_page_to_idle_from_every_state() {
    init_logging();

    // Result populated.
    let (state, _) = choose_file(AppState::new(), "a.png");
    let (state, _) = update(
        state,
        Msg::SubmissionResolved {
            kind: SubmissionKind::Image,
            mode: ScanMode::Deepfake,
            result: Ok(AnalysisOutcome::Immediate(fake_result())),
        },
    );
    let (state, effects) = update(state, Msg::ResetClicked);
    assert!(effects.is_empty());
    assert_idle(&state);

    // Error populated.
    let (state, _) = choose_file(state, "b.png");
    let (state, _) = update(
        state,
        Msg::SubmissionResolved {
            kind: SubmissionKind::Image,
            mode: ScanMode::Deepfake,
            result: Err("boom".to_string()),
        },
    );
    let (state, _) = update(state, Msg::ResetClicked);
    assert_idle(&state);

    // Polling in progress.
    let (state, _) = update(state, Msg::ModeSelected(ScanMode::Phishing));
    let (state, _) = submit_url(state, "https://example.com");
    let job_id = JobId::new("phishing_job_00000000");
    let (state, _) = update(
        state,
        Msg::SubmissionResolved {
            kind: SubmissionKind::Url,
            mode: ScanMode::Phishing,
            result: Ok(AnalysisOutcome::Deferred(job_id.clone())),
        },
    );
    let (state, _) = update(
        state,
        Msg::PollProgress {
            job_id,
            progress: 40,
        },
    );
    let (state, effects) = update(state, Msg::ResetClicked);
    assert_eq!(effects, vec![Effect::CancelPolling]);
    assert_idle(&state);
    assert!(state.polling().is_none());
    assert_eq!(state.page().scan_mode(), ScanMode::Phishing);
}

#[test]
fn mode_switch_mid_flight_keeps_loading_state() {
    init_logging();
    let (state, _) = choose_file(AppState::new(), "clip.mp4");
    let (state, _) = update(state, Msg::ModeToggled);

    assert!(state.page().is_analyzing());
    assert!(state.scanner().in_flight());
    assert_eq!(state.scanner().active_tab(), SubmissionKind::Url);
    assert_eq!(state.view().results, ResultsPanel::Loading);
}

#[test]
fn analysis_start_clears_previous_error() {
    init_logging();
    let (state, _) = choose_file(AppState::new(), "a.png");
    let (state, _) = update(
        state,
        Msg::SubmissionResolved {
            kind: SubmissionKind::Image,
            mode: ScanMode::Deepfake,
            result: Err("boom".to_string()),
        },
    );
    let (state, _) = choose_file(state, "b.png");

    assert!(state.page().error().is_none());
    assert!(state.page().is_analyzing());
}

fn assert_idle(state: &AppState) {
    let page = state.page();
    assert!(page.result().is_none());
    assert!(page.error().is_none());
    assert!(page.job_id().is_none());
    assert!(!page.is_analyzing());
    assert_eq!(state.view().results, ResultsPanel::Hidden);
}
