use crate::state::PollStatus;
use crate::update::is_submittable_url;
use crate::{AnalysisResult, AppState, Findings, ScanMode, SubmissionKind};

/// Ticks until the hero headline is fully revealed.
pub const HERO_REVEAL_FRAMES: u64 = 12;

pub const NO_INCONSISTENCIES: &str =
    "No specific inconsistencies detected, but overall patterns suggest manipulation.";
pub const NO_SUSPICIOUS_ELEMENTS: &str = "No specific suspicious elements detected.";
pub const LEGITIMATE_NOTE: &str =
    "Our analysis found no significant indicators of manipulation or suspicious activity.";
pub const CAUTION_NOTE: &str = "Note: While this content appears legitimate based on our analysis, always exercise caution online.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub mode: ScanMode,
    pub tabs: Vec<TabView>,
    pub active_tab: Option<SubmissionKind>,
    pub in_flight: bool,
    pub url_input: String,
    pub text_input: String,
    pub file_input: String,
    pub can_submit: bool,
    pub results: ResultsPanel,
    /// Percentage of the hero headline revealed so far.
    pub hero_reveal: u8,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabView {
    pub kind: SubmissionKind,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultsPanel {
    #[default]
    Hidden,
    Loading,
    Polling {
        progress: u8,
    },
    Error {
        message: String,
    },
    Verdict(VerdictView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerdictView {
    pub headline: &'static str,
    pub suspicious: bool,
    /// Formatted with one decimal, e.g. `"87.3%"`.
    pub confidence: String,
    pub details: DetailsView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailsView {
    Manipulation {
        score: String,
        inconsistencies: Vec<String>,
    },
    Risk {
        score: String,
        suspicious_elements: Vec<String>,
    },
    Legitimate,
}

pub(crate) fn project(state: &AppState) -> AppViewModel {
    let page = state.page();
    let scanner = state.scanner();
    let mode = page.scan_mode();
    let active_tab = scanner.active_tab();

    let tabs = mode
        .tabs()
        .iter()
        .map(|kind| TabView {
            kind: *kind,
            label: kind.label(),
            active: *kind == active_tab,
        })
        .collect();

    let can_submit = !scanner.in_flight()
        && match active_tab {
            SubmissionKind::Url => is_submittable_url(scanner.url()),
            SubmissionKind::Text => !scanner.text().trim().is_empty(),
            SubmissionKind::Image | SubmissionKind::Video => {
                !scanner.file_path().trim().is_empty()
            }
        };

    let revealed = state.hero_frame().min(HERO_REVEAL_FRAMES);
    let hero_reveal = (revealed * 100 / HERO_REVEAL_FRAMES) as u8;

    AppViewModel {
        mode,
        tabs,
        active_tab: Some(active_tab),
        in_flight: scanner.in_flight(),
        url_input: scanner.url().to_string(),
        text_input: scanner.text().to_string(),
        file_input: scanner.file_path().to_string(),
        can_submit,
        results: results_panel(state),
        hero_reveal,
        dirty: state.is_dirty(),
    }
}

fn results_panel(state: &AppState) -> ResultsPanel {
    let page = state.page();
    if !page.has_activity() {
        return ResultsPanel::Hidden;
    }
    if page.is_analyzing() {
        return ResultsPanel::Loading;
    }
    let polling = state
        .polling()
        .filter(|polling| page.job_id() == Some(polling.job_id()));
    if let Some(polling) = polling {
        if polling.status() == PollStatus::Polling {
            return ResultsPanel::Polling {
                progress: polling.progress(),
            };
        }
    }
    if let Some(message) = page.error() {
        return ResultsPanel::Error {
            message: message.to_string(),
        };
    }
    // An explicit result wins over one produced by polling.
    match page.result().or_else(|| polling.and_then(|p| p.result())) {
        Some(result) => ResultsPanel::Verdict(verdict_view(result)),
        None => ResultsPanel::Hidden,
    }
}

pub fn verdict_view(result: &AnalysisResult) -> VerdictView {
    let details = if !result.is_suspicious() {
        DetailsView::Legitimate
    } else {
        match &result.findings {
            Findings::Deepfake(findings) => DetailsView::Manipulation {
                score: format!("{:.1}%", findings.manipulation_score),
                inconsistencies: findings.inconsistencies.clone(),
            },
            Findings::Phishing(findings) => DetailsView::Risk {
                score: format!("{:.0}/100", findings.risk_score),
                suspicious_elements: findings.suspicious_elements.clone(),
            },
        }
    };
    VerdictView {
        headline: result.headline(),
        suspicious: result.is_suspicious(),
        confidence: format!("{:.1}%", result.confidence),
        details,
    }
}
