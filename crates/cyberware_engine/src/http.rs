use std::time::Duration;

use cyberware_core::{
    AnalysisOutcome, AnalysisResult, DeepfakeFindings, DeepfakeVerdict, Findings, JobId, Payload,
    PhishingFindings, PhishingVerdict, ScanMode, SubmissionKind, SubmissionRequest,
};
use cyberware_logging::{scan_debug, scan_info};
use reqwest::multipart::{Form, Part};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::{AnalysisError, Analyzer, JobStatus};

#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Service root, e.g. `https://api.example.com`.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Serialize)]
struct SubmitBody<'a> {
    kind: &'a str,
    mode: &'a str,
    payload: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireJob {
    job_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireResult {
    verdict: String,
    confidence: f64,
    #[serde(default)]
    details: WireDetails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireDetails {
    manipulation_score: Option<f64>,
    #[serde(default)]
    inconsistencies: Vec<String>,
    risk_score: Option<f64>,
    #[serde(default, alias = "suspicious")]
    suspicious_elements: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum WireJobState {
    Pending,
    Done,
}

#[derive(Debug, Deserialize)]
struct WireJobStatus {
    status: WireJobState,
    #[serde(default)]
    progress: f64,
    result: Option<WireResult>,
}

impl WireResult {
    fn into_result(self) -> Result<AnalysisResult, AnalysisError> {
        let details = self.details;
        let findings = match self.verdict.as_str() {
            "real" | "fake" => Findings::Deepfake(DeepfakeFindings {
                verdict: if self.verdict == "fake" {
                    DeepfakeVerdict::Fake
                } else {
                    DeepfakeVerdict::Real
                },
                manipulation_score: details.manipulation_score.unwrap_or_default(),
                inconsistencies: details.inconsistencies,
            }),
            "safe" | "legitimate" | "phishing" => Findings::Phishing(PhishingFindings {
                verdict: match self.verdict.as_str() {
                    "phishing" => PhishingVerdict::Phishing,
                    "legitimate" => PhishingVerdict::Legitimate,
                    _ => PhishingVerdict::Safe,
                },
                risk_score: details.risk_score.unwrap_or_default(),
                suspicious_elements: details.suspicious_elements,
            }),
            other => {
                return Err(AnalysisError::InvalidResponse(format!(
                    "unknown verdict {other:?}"
                )))
            }
        };
        Ok(AnalysisResult {
            confidence: self.confidence.clamp(0.0, 100.0),
            findings,
        })
    }
}

/// Client for the remote analysis service.
///
/// `POST {base}/api/analyze` answers 200 with a verdict or 202 with a job id;
/// `GET {base}/api/jobs/{id}` reports job progress.
#[derive(Debug, Clone)]
pub struct HttpAnalyzer {
    settings: HttpSettings,
    client: reqwest::Client,
}

impl HttpAnalyzer {
    pub fn new(settings: HttpSettings) -> Result<Self, AnalysisError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| AnalysisError::Network(err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    /// `/api/jobs/{job_id}?mode=..`, with the id percent-encoded as one segment.
    fn job_url(&self, job_id: &JobId, mode: ScanMode) -> Result<Url, AnalysisError> {
        let mut url = Url::parse(&self.endpoint("/api/jobs"))
            .map_err(|err| AnalysisError::Submission(format!("invalid service URL: {err}")))?;
        url.path_segments_mut()
            .map_err(|()| {
                AnalysisError::Submission("service URL cannot carry a path".to_string())
            })?
            .push(job_id.as_str());
        url.query_pairs_mut().append_pair("mode", mode.as_str());
        Ok(url)
    }

    async fn upload_form(
        &self,
        request: &SubmissionRequest,
        path: &std::path::Path,
        name: &str,
    ) -> Result<Form, AnalysisError> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|err| AnalysisError::Upload(format!("Could not read {name}: {err}")))?;
        if let Some(limit) = request.kind.max_upload_bytes() {
            if metadata.len() > limit {
                return Err(AnalysisError::Upload(format!(
                    "{name} is larger than {} MB",
                    limit / (1024 * 1024)
                )));
            }
        }
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|err| AnalysisError::Upload(format!("Could not read {name}: {err}")))?;
        Ok(Form::new()
            .text("kind", request.kind.as_str())
            .text("mode", request.mode.as_str())
            .part("file", Part::bytes(bytes).file_name(name.to_string())))
    }
}

#[async_trait::async_trait]
impl Analyzer for HttpAnalyzer {
    async fn submit(&self, request: &SubmissionRequest) -> Result<AnalysisOutcome, AnalysisError> {
        let endpoint = self.endpoint("/api/analyze");
        let builder = match &request.payload {
            Payload::File { path, name } => {
                let form = self.upload_form(request, path, name).await?;
                self.client.post(&endpoint).multipart(form)
            }
            Payload::Url(value) | Payload::Text(value) => {
                self.client.post(&endpoint).json(&SubmitBody {
                    kind: request.kind.as_str(),
                    mode: request.mode.as_str(),
                    payload: value,
                })
            }
        };

        scan_info!("POST {} kind={}", endpoint, request.kind);
        let response = builder
            .send()
            .await
            .map_err(|err| map_reqwest_error(err, request.kind))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| map_reqwest_error(err, request.kind))?;

        if status == StatusCode::ACCEPTED {
            let job: WireJob = parse(&body)?;
            if job.job_id.trim().is_empty() {
                return Err(AnalysisError::InvalidResponse("empty job id".to_string()));
            }
            Ok(AnalysisOutcome::Deferred(JobId::new(job.job_id)))
        } else if status.is_success() {
            let result: WireResult = parse(&body)?;
            Ok(AnalysisOutcome::Immediate(result.into_result()?))
        } else {
            Err(AnalysisError::HttpStatus(status.as_u16()))
        }
    }

    async fn job_status(&self, job_id: &JobId, mode: ScanMode) -> Result<JobStatus, AnalysisError> {
        let endpoint = self.job_url(job_id, mode)?;
        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .map_err(|err| map_reqwest_error(err, SubmissionKind::Url))?;
        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::HttpStatus(status.as_u16()));
        }
        let body = response
            .bytes()
            .await
            .map_err(|err| map_reqwest_error(err, SubmissionKind::Url))?;
        let wire: WireJobStatus = parse(&body)?;
        scan_debug!("Job status job_id={} status={:?}", job_id, wire.status);

        match wire.status {
            WireJobState::Pending => Ok(JobStatus::Pending {
                progress: wire.progress.clamp(0.0, 100.0) as u8,
            }),
            WireJobState::Done => match wire.result {
                Some(result) => Ok(JobStatus::Done(result.into_result()?)),
                None => Err(AnalysisError::InvalidResponse(
                    "finished job without a result".to_string(),
                )),
            },
        }
    }
}

fn parse<'a, T: Deserialize<'a>>(body: &'a [u8]) -> Result<T, AnalysisError> {
    serde_json::from_slice(body).map_err(|err| AnalysisError::InvalidResponse(err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error, kind: SubmissionKind) -> AnalysisError {
    if err.is_timeout() {
        return AnalysisError::Timeout;
    }
    if err.is_connect() {
        return AnalysisError::Network(err.to_string());
    }
    if kind.is_file() {
        AnalysisError::Upload(err.to_string())
    } else {
        AnalysisError::Submission(err.to_string())
    }
}
