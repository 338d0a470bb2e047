use cyberware_core::{AnalysisOutcome, JobId, ScanMode, SubmissionRequest};

use crate::{AnalysisError, JobStatus};

/// Boundary to whatever produces verdicts: a local simulation or a remote service.
#[async_trait::async_trait]
pub trait Analyzer: Send + Sync {
    /// Submits content; the answer is a verdict now or a job to poll.
    async fn submit(&self, request: &SubmissionRequest) -> Result<AnalysisOutcome, AnalysisError>;

    /// Asks how far a deferred job has come.
    async fn job_status(&self, job_id: &JobId, mode: ScanMode) -> Result<JobStatus, AnalysisError>;

    /// Called once a job will not be polled again (cancelled or failed).
    fn release_job(&self, _job_id: &JobId) {}
}
