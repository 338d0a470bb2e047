use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use cyberware_core::{
    AnalysisOutcome, AnalysisResult, DeepfakeFindings, DeepfakeVerdict, Findings, JobId,
    PhishingFindings, PhishingVerdict, ScanMode, SubmissionKind, SubmissionRequest,
    POLL_COMPLETE,
};
use cyberware_logging::scan_debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{AnalysisError, Analyzer, JobStatus};

const JOB_TOKEN_LEN: usize = 8;
const JOB_TOKEN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone)]
pub struct SimulatedSettings {
    /// Fake network latency applied to every submission.
    pub latency: Duration,
    /// Progress added per job-status call.
    pub progress_step: u8,
}

impl Default for SimulatedSettings {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(2000),
            progress_step: 10,
        }
    }
}

/// Produces placeholder verdicts; swapped for a real classifier later.
pub trait VerdictSource: Send + Sync {
    /// Verdict returned directly by a file or text submission.
    fn immediate(&self, kind: SubmissionKind, mode: ScanMode) -> AnalysisResult;
    /// Verdict returned once a deferred job completes.
    fn polled(&self, mode: ScanMode) -> AnalysisResult;
    /// Random suffix for a new job id.
    fn job_token(&self) -> String;
}

/// Uniform-random verdicts. Carries no signal about the content.
pub struct RandomVerdicts {
    rng: Mutex<StdRng>,
}

impl RandomVerdicts {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut rng)
    }
}

impl Default for RandomVerdicts {
    fn default() -> Self {
        Self::new()
    }
}

impl VerdictSource for RandomVerdicts {
    fn immediate(&self, kind: SubmissionKind, mode: ScanMode) -> AnalysisResult {
        self.with_rng(|rng| {
            let deepfake_upload = kind.is_file() && mode == ScanMode::Deepfake;
            if deepfake_upload {
                return AnalysisResult {
                    confidence: rng.gen_range(0.0..100.0),
                    findings: Findings::Deepfake(DeepfakeFindings {
                        verdict: if rng.gen_bool(0.5) {
                            DeepfakeVerdict::Real
                        } else {
                            DeepfakeVerdict::Fake
                        },
                        manipulation_score: rng.gen_range(0.0..100.0),
                        inconsistencies: maybe_list(rng, 0.3, &["facial features", "lighting"]),
                    }),
                };
            }

            let indicators: &[&str] = if kind == SubmissionKind::Text {
                &["suspicious links", "scam keywords detected"]
            } else {
                &["fake login form", "spoofed domain"]
            };
            let verdict = if rng.gen_bool(0.5) {
                PhishingVerdict::Safe
            } else {
                PhishingVerdict::Phishing
            };
            let confidence = rng.gen_range(0.0..100.0);
            let suspicious_elements = maybe_list(rng, 0.3, indicators);
            AnalysisResult {
                confidence,
                findings: Findings::Phishing(PhishingFindings {
                    verdict,
                    risk_score: rng.gen_range(0.0..100.0),
                    suspicious_elements,
                }),
            }
        })
    }

    fn polled(&self, mode: ScanMode) -> AnalysisResult {
        self.with_rng(|rng| match mode {
            ScanMode::Deepfake => AnalysisResult {
                findings: Findings::Deepfake(DeepfakeFindings {
                    verdict: if rng.gen_bool(0.4) {
                        DeepfakeVerdict::Fake
                    } else {
                        DeepfakeVerdict::Real
                    },
                    manipulation_score: f64::from(rng.gen_range(0u8..100)),
                    inconsistencies: if rng.gen_bool(0.5) {
                        to_strings(&[
                            "Facial feature anomalies",
                            "Unnatural lighting effects",
                            "Digital artifact patterns",
                        ])
                    } else {
                        to_strings(&["Digital artifact patterns"])
                    },
                }),
                confidence: rng.gen_range(70.0..95.0),
            },
            ScanMode::Phishing => AnalysisResult {
                findings: Findings::Phishing(PhishingFindings {
                    verdict: if rng.gen_bool(0.4) {
                        PhishingVerdict::Phishing
                    } else {
                        PhishingVerdict::Legitimate
                    },
                    risk_score: f64::from(rng.gen_range(0u8..100)),
                    suspicious_elements: if rng.gen_bool(0.5) {
                        to_strings(&[
                            "Suspicious form submissions",
                            "Domain age less than 3 months",
                            "SSL certificate issues",
                        ])
                    } else {
                        to_strings(&["Domain age less than 3 months"])
                    },
                }),
                confidence: rng.gen_range(70.0..95.0),
            },
        })
    }

    fn job_token(&self) -> String {
        self.with_rng(|rng| {
            (0..JOB_TOKEN_LEN)
                .map(|_| char::from(JOB_TOKEN_ALPHABET[rng.gen_range(0..JOB_TOKEN_ALPHABET.len())]))
                .collect()
        })
    }
}

fn maybe_list(rng: &mut StdRng, probability: f64, items: &[&str]) -> Vec<String> {
    if rng.gen_bool(probability) {
        to_strings(items)
    } else {
        Vec::new()
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

/// In-process stand-in for the analysis service.
///
/// Files and text resolve immediately after the configured latency; URLs
/// resolve to a job whose progress advances by `progress_step` on each
/// status call until it completes.
pub struct SimulatedAnalyzer {
    settings: SimulatedSettings,
    verdicts: Arc<dyn VerdictSource>,
    jobs: Mutex<HashMap<JobId, u8>>,
}

impl SimulatedAnalyzer {
    pub fn new(settings: SimulatedSettings) -> Self {
        Self::with_verdicts(settings, Arc::new(RandomVerdicts::new()))
    }

    pub fn with_verdicts(settings: SimulatedSettings, verdicts: Arc<dyn VerdictSource>) -> Self {
        Self {
            settings,
            verdicts,
            jobs: Mutex::new(HashMap::new()),
        }
    }

    fn advance_job(&self, job_id: &JobId) -> u8 {
        let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        let progress = jobs.entry(job_id.clone()).or_insert(0);
        *progress = progress
            .saturating_add(self.settings.progress_step.max(1))
            .min(POLL_COMPLETE);
        let current = *progress;
        if current == POLL_COMPLETE {
            jobs.remove(job_id);
        }
        current
    }

    /// Number of jobs still holding progress state.
    pub fn tracked_jobs(&self) -> usize {
        self.jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait::async_trait]
impl Analyzer for SimulatedAnalyzer {
    async fn submit(&self, request: &SubmissionRequest) -> Result<AnalysisOutcome, AnalysisError> {
        tokio::time::sleep(self.settings.latency).await;

        let outcome = match request.kind {
            SubmissionKind::Url => {
                let job_id = JobId::new(format!(
                    "{}_job_{}",
                    request.mode,
                    self.verdicts.job_token()
                ));
                let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
                // Jobs never polled were abandoned before their first status call.
                jobs.retain(|_, progress| *progress > 0);
                jobs.insert(job_id.clone(), 0);
                drop(jobs);
                scan_debug!("Simulated job created job_id={}", job_id);
                AnalysisOutcome::Deferred(job_id)
            }
            SubmissionKind::Image | SubmissionKind::Video | SubmissionKind::Text => {
                AnalysisOutcome::Immediate(self.verdicts.immediate(request.kind, request.mode))
            }
        };
        Ok(outcome)
    }

    async fn job_status(&self, job_id: &JobId, mode: ScanMode) -> Result<JobStatus, AnalysisError> {
        let progress = self.advance_job(job_id);
        if progress == POLL_COMPLETE {
            Ok(JobStatus::Done(self.verdicts.polled(mode)))
        } else {
            Ok(JobStatus::Pending { progress })
        }
    }

    fn release_job(&self, job_id: &JobId) {
        if self
            .jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(job_id)
            .is_some()
        {
            scan_debug!("Simulated job released job_id={}", job_id);
        }
    }
}
