use std::path::{Path, PathBuf};

use url::Url;

use crate::view_model::HERO_REVEAL_FRAMES;
use crate::{AppState, Effect, Msg, Payload, ScanMode, SubmissionKind, SubmissionRequest};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ModeSelected(mode) => {
            select_mode(&mut state, mode);
            Vec::new()
        }
        Msg::ModeToggled => {
            let mode = state.page().scan_mode().toggled();
            select_mode(&mut state, mode);
            Vec::new()
        }
        Msg::TabSelected(tab) => {
            let offered = state.page().scan_mode().tabs().contains(&tab);
            if offered && state.scanner().active_tab() != tab {
                state.scanner_mut().set_active_tab(tab);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::UrlInputChanged(url) => {
            if state.scanner().url() != url {
                state.scanner_mut().set_url(url);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::TextInputChanged(text) => {
            if state.scanner().text() != text {
                state.scanner_mut().set_text(text);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::FileInputChanged(path) => {
            if state.scanner().file_path() != path {
                state.scanner_mut().set_file_path(path);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::FileChosen => match file_request(&state) {
            Some(request) => begin_submission(&mut state, request),
            None => Vec::new(),
        },
        Msg::UrlSubmitted => match url_request(&state) {
            Some(request) => begin_submission(&mut state, request),
            None => Vec::new(),
        },
        Msg::TextSubmitted => match text_request(&state) {
            Some(request) => begin_submission(&mut state, request),
            None => Vec::new(),
        },
        Msg::SubmissionResolved { kind, mode, result } => {
            // The in-flight flag is released whatever the outcome.
            state.scanner_mut().set_in_flight(false);
            state.mark_dirty();
            match result {
                Ok(outcome) => {
                    let mut effects = Vec::new();
                    if let Some(job_id) = outcome.job_id().cloned() {
                        state.begin_polling(job_id.clone());
                        effects.push(Effect::StartPolling { job_id, mode });
                    }
                    state.page_mut().on_analysis_complete(outcome);
                    effects
                }
                Err(message) => {
                    let message = if message.trim().is_empty() {
                        kind.failure_message().to_string()
                    } else {
                        message
                    };
                    fail(&mut state, message)
                }
            }
        }
        Msg::PollProgress { job_id, progress } => {
            let changed = state
                .polling_for(&job_id)
                .is_some_and(|polling| polling.advance(progress));
            if changed {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::PollCompleted { job_id, result } => {
            let changed = state
                .polling_for(&job_id)
                .is_some_and(|polling| polling.complete(result));
            if changed {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::PollFailed { job_id, message } => {
            if state.page().job_id() == Some(&job_id) {
                fail(&mut state, message)
            } else {
                Vec::new()
            }
        }
        Msg::ResetClicked => {
            let had_job = state.page().job_id().is_some();
            state.page_mut().on_reset();
            state.clear_polling();
            state.mark_dirty();
            if had_job {
                vec![Effect::CancelPolling]
            } else {
                Vec::new()
            }
        }
        Msg::Tick => {
            state.advance_hero();
            if state.hero_frame() <= HERO_REVEAL_FRAMES {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Whether `input` is an absolute http(s) URL worth submitting.
pub fn is_submittable_url(input: &str) -> bool {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return false;
    }
    match Url::parse(trimmed) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

// Switching modes resets the tab only; loading, error and job state carry over.
fn select_mode(state: &mut AppState, mode: ScanMode) {
    if state.page().scan_mode() == mode {
        return;
    }
    state.page_mut().set_scan_mode(mode);
    state.scanner_mut().set_active_tab(mode.default_tab());
    state.mark_dirty();
}

fn begin_submission(state: &mut AppState, request: SubmissionRequest) -> Vec<Effect> {
    let meta = request.meta();
    state.scanner_mut().set_in_flight(true);
    state.page_mut().on_analysis_start(&meta);
    state.mark_dirty();
    vec![Effect::Submit(request)]
}

fn fail(state: &mut AppState, message: String) -> Vec<Effect> {
    let had_job = state.page().job_id().is_some();
    state.page_mut().on_analysis_error(message);
    state.clear_polling();
    state.mark_dirty();
    if had_job {
        vec![Effect::CancelPolling]
    } else {
        Vec::new()
    }
}

fn ready_tab(state: &AppState) -> Option<SubmissionKind> {
    let scanner = state.scanner();
    if scanner.in_flight() {
        return None;
    }
    Some(scanner.active_tab())
}

fn file_request(state: &AppState) -> Option<SubmissionRequest> {
    let kind = ready_tab(state).filter(|kind| kind.is_file())?;
    let raw = state.scanner().file_path().trim();
    if raw.is_empty() {
        return None;
    }
    let path = PathBuf::from(raw);
    let name = file_name(&path).unwrap_or_else(|| raw.to_string());
    Some(SubmissionRequest {
        kind,
        payload: Payload::File { path, name },
        mode: state.page().scan_mode(),
    })
}

fn url_request(state: &AppState) -> Option<SubmissionRequest> {
    ready_tab(state).filter(|kind| *kind == SubmissionKind::Url)?;
    let url = state.scanner().url().trim();
    if !is_submittable_url(url) {
        return None;
    }
    Some(SubmissionRequest {
        kind: SubmissionKind::Url,
        payload: Payload::Url(url.to_string()),
        mode: state.page().scan_mode(),
    })
}

fn text_request(state: &AppState) -> Option<SubmissionRequest> {
    ready_tab(state).filter(|kind| *kind == SubmissionKind::Text)?;
    let text = state.scanner().text();
    if text.trim().is_empty() {
        return None;
    }
    Some(SubmissionRequest {
        kind: SubmissionKind::Text,
        payload: Payload::Text(text.to_string()),
        mode: state.page().scan_mode(),
    })
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
}
