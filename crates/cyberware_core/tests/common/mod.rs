#![allow(dead_code)]

use std::sync::Once;

use cyberware_core::{
    update, AnalysisResult, AppState, DeepfakeFindings, DeepfakeVerdict, Effect, Findings, Msg,
    PhishingFindings, PhishingVerdict, ScanMode, SubmissionKind,
};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(cyberware_logging::initialize_for_tests);
}

pub fn phishing_state() -> AppState {
    let (state, _) = update(AppState::new(), Msg::ModeSelected(ScanMode::Phishing));
    state
}

pub fn submit_url(state: AppState, url: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::UrlInputChanged(url.to_string()));
    update(state, Msg::UrlSubmitted)
}

pub fn submit_text(state: AppState, text: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::TabSelected(SubmissionKind::Text));
    let (state, _) = update(state, Msg::TextInputChanged(text.to_string()));
    update(state, Msg::TextSubmitted)
}

pub fn choose_file(state: AppState, path: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::FileInputChanged(path.to_string()));
    update(state, Msg::FileChosen)
}

pub fn fake_result() -> AnalysisResult {
    AnalysisResult {
        confidence: 91.34,
        findings: Findings::Deepfake(DeepfakeFindings {
            verdict: DeepfakeVerdict::Fake,
            manipulation_score: 64.0,
            inconsistencies: vec!["lighting".to_string()],
        }),
    }
}

pub fn phishing_result() -> AnalysisResult {
    AnalysisResult {
        confidence: 80.0,
        findings: Findings::Phishing(PhishingFindings {
            verdict: PhishingVerdict::Phishing,
            risk_score: 72.0,
            suspicious_elements: vec!["Domain age less than 3 months".to_string()],
        }),
    }
}

pub fn legitimate_result() -> AnalysisResult {
    AnalysisResult {
        confidence: 75.5,
        findings: Findings::Phishing(PhishingFindings {
            verdict: PhishingVerdict::Legitimate,
            risk_score: 12.0,
            suspicious_elements: Vec::new(),
        }),
    }
}
