use crate::{JobId, ScanMode, SubmissionRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Submit(SubmissionRequest),
    StartPolling { job_id: JobId, mode: ScanMode },
    CancelPolling,
}
