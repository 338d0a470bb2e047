use crate::view_model::{self, AppViewModel};
use crate::{AnalysisOutcome, AnalysisResult, JobId, ScanMode, SubmissionKind, SubmissionMeta};

pub const POLL_COMPLETE: u8 = 100;

/// The page-level record: what the results panel is driven by.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageState {
    result: Option<AnalysisResult>,
    is_analyzing: bool,
    error: Option<String>,
    job_id: Option<JobId>,
    scan_mode: ScanMode,
}

impl PageState {
    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn is_analyzing(&self) -> bool {
        self.is_analyzing
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn job_id(&self) -> Option<&JobId> {
        self.job_id.as_ref()
    }

    pub fn scan_mode(&self) -> ScanMode {
        self.scan_mode
    }

    /// Whether the results panel is shown at all.
    pub fn has_activity(&self) -> bool {
        self.result.is_some() || self.is_analyzing || self.error.is_some() || self.job_id.is_some()
    }

    pub fn on_analysis_start(&mut self, _meta: &SubmissionMeta) {
        self.is_analyzing = true;
        self.error = None;
        self.result = None;
    }

    pub fn on_analysis_complete(&mut self, outcome: AnalysisOutcome) {
        self.is_analyzing = false;
        self.error = None;
        match outcome {
            AnalysisOutcome::Deferred(job_id) => self.job_id = Some(job_id),
            AnalysisOutcome::Immediate(result) => self.result = Some(result),
        }
    }

    pub fn on_analysis_error(&mut self, message: impl Into<String>) {
        self.is_analyzing = false;
        self.error = Some(message.into());
        self.result = None;
        self.job_id = None;
    }

    /// Clears the four derived cells; the selected mode is kept.
    pub fn on_reset(&mut self) {
        self.result = None;
        self.error = None;
        self.job_id = None;
        self.is_analyzing = false;
    }

    /// Does not touch in-flight state: a running analysis keeps its display.
    pub(crate) fn set_scan_mode(&mut self, mode: ScanMode) {
        self.scan_mode = mode;
    }
}

/// Submission widget state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerState {
    active_tab: SubmissionKind,
    in_flight: bool,
    url: String,
    text: String,
    file_path: String,
}

impl Default for ScannerState {
    fn default() -> Self {
        Self::for_mode(ScanMode::default())
    }
}

impl ScannerState {
    fn for_mode(mode: ScanMode) -> Self {
        Self {
            active_tab: mode.default_tab(),
            in_flight: false,
            url: String::new(),
            text: String::new(),
            file_path: String::new(),
        }
    }

    pub fn active_tab(&self) -> SubmissionKind {
        self.active_tab
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub(crate) fn set_active_tab(&mut self, tab: SubmissionKind) {
        self.active_tab = tab;
    }

    pub(crate) fn set_in_flight(&mut self, in_flight: bool) {
        self.in_flight = in_flight;
    }

    pub(crate) fn set_url(&mut self, url: String) {
        self.url = url;
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }

    pub(crate) fn set_file_path(&mut self, path: String) {
        self.file_path = path;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollStatus {
    #[default]
    Idle,
    Polling,
    Completed,
}

/// Progress of one deferred job, keyed by its id.
#[derive(Debug, Clone, PartialEq)]
pub struct PollingState {
    job_id: JobId,
    status: PollStatus,
    progress: u8,
    result: Option<AnalysisResult>,
}

impl PollingState {
    pub fn new(job_id: JobId) -> Self {
        Self {
            job_id,
            status: PollStatus::Polling,
            progress: 0,
            result: None,
        }
    }

    pub fn job_id(&self) -> &JobId {
        &self.job_id
    }

    pub fn status(&self) -> PollStatus {
        self.status
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// Returns whether anything changed. Progress never moves backwards.
    pub(crate) fn advance(&mut self, progress: u8) -> bool {
        if self.status != PollStatus::Polling {
            return false;
        }
        let next = progress.min(POLL_COMPLETE).max(self.progress);
        let changed = next != self.progress;
        self.progress = next;
        changed
    }

    pub(crate) fn complete(&mut self, result: AnalysisResult) -> bool {
        if self.status != PollStatus::Polling {
            return false;
        }
        self.status = PollStatus::Completed;
        self.progress = POLL_COMPLETE;
        self.result = Some(result);
        true
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    page: PageState,
    scanner: ScannerState,
    polling: Option<PollingState>,
    hero_frame: u64,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_mode(ScanMode::default())
    }

    pub fn with_mode(mode: ScanMode) -> Self {
        let mut page = PageState::default();
        page.set_scan_mode(mode);
        Self {
            page,
            scanner: ScannerState::for_mode(mode),
            polling: None,
            hero_frame: 0,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        view_model::project(self)
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn scanner(&self) -> &ScannerState {
        &self.scanner
    }

    pub fn polling(&self) -> Option<&PollingState> {
        self.polling.as_ref()
    }

    pub fn hero_frame(&self) -> u64 {
        self.hero_frame
    }

    pub(crate) fn page_mut(&mut self) -> &mut PageState {
        &mut self.page
    }

    pub(crate) fn scanner_mut(&mut self) -> &mut ScannerState {
        &mut self.scanner
    }

    /// Polling state for `job_id`, if that is the job being tracked.
    pub(crate) fn polling_for(&mut self, job_id: &JobId) -> Option<&mut PollingState> {
        self.polling
            .as_mut()
            .filter(|polling| polling.job_id() == job_id)
    }

    pub(crate) fn begin_polling(&mut self, job_id: JobId) {
        self.polling = Some(PollingState::new(job_id));
    }

    pub(crate) fn clear_polling(&mut self) {
        self.polling = None;
    }

    pub(crate) fn advance_hero(&mut self) {
        self.hero_frame = self.hero_frame.saturating_add(1);
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns whether a redraw is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
