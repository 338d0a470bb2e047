//! CyberWare core: pure scan-flow state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod types;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{AppState, PageState, PollStatus, PollingState, ScannerState, POLL_COMPLETE};
pub use types::{
    AnalysisOutcome, AnalysisResult, DeepfakeFindings, DeepfakeVerdict, Findings, JobId, Payload,
    PhishingFindings, PhishingVerdict, ScanMode, SubmissionKind, SubmissionMeta,
    SubmissionRequest,
};
pub use update::{is_submittable_url, update};
pub use view_model::{
    verdict_view, AppViewModel, DetailsView, ResultsPanel, TabView, VerdictView, CAUTION_NOTE,
    HERO_REVEAL_FRAMES, LEGITIMATE_NOTE, NO_INCONSISTENCIES, NO_SUSPICIOUS_ELEMENTS,
};
