use cyberware_core::{AnalysisOutcome, AnalysisResult, JobId, ScanMode, SubmissionKind};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    SubmissionResolved {
        kind: SubmissionKind,
        mode: ScanMode,
        result: Result<AnalysisOutcome, AnalysisError>,
    },
    PollProgress {
        job_id: JobId,
        progress: u8,
    },
    PollCompleted {
        job_id: JobId,
        result: AnalysisResult,
    },
    PollFailed {
        job_id: JobId,
        message: String,
    },
}

/// Answer of the job-status endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum JobStatus {
    Pending { progress: u8 },
    Done(AnalysisResult),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// The file could not be read or is not acceptable for upload.
    #[error("{0}")]
    Upload(String),
    /// The URL or text call failed before reaching the service.
    #[error("{0}")]
    Submission(String),
    #[error("analysis service returned status {0}")]
    HttpStatus(u16),
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response from analysis service: {0}")]
    InvalidResponse(String),
    #[error("request timed out")]
    Timeout,
}
