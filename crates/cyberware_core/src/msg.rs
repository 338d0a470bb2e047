use crate::{AnalysisOutcome, AnalysisResult, JobId, ScanMode, SubmissionKind};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User picked a scan mode explicitly.
    ModeSelected(ScanMode),
    /// User flipped between the two scan modes.
    ModeToggled,
    /// User selected a submission tab.
    TabSelected(SubmissionKind),
    /// User edited the URL input.
    UrlInputChanged(String),
    /// User edited the mail/text input.
    TextInputChanged(String),
    /// User edited the file path input.
    FileInputChanged(String),
    /// User picked the file currently named in the file input.
    FileChosen,
    /// User submitted the URL form.
    UrlSubmitted,
    /// User submitted the text form.
    TextSubmitted,
    /// Backend answered a submission (or failed to).
    SubmissionResolved {
        kind: SubmissionKind,
        mode: ScanMode,
        result: Result<AnalysisOutcome, String>,
    },
    /// Poll task reported progress for a deferred job.
    PollProgress { job_id: JobId, progress: u8 },
    /// Poll task finished a deferred job.
    PollCompleted {
        job_id: JobId,
        result: AnalysisResult,
    },
    /// Poll task gave up on a deferred job.
    PollFailed { job_id: JobId, message: String },
    /// User clicked "Try Again" / "Start New Analysis".
    ResetClicked,
    /// UI tick driving the hero animation.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
