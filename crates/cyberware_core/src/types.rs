use std::fmt;
use std::path::PathBuf;

/// Top-level analysis category selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScanMode {
    #[default]
    Deepfake,
    Phishing,
}

impl ScanMode {
    /// Submission tabs offered while this mode is active, default first.
    pub fn tabs(self) -> &'static [SubmissionKind] {
        match self {
            ScanMode::Deepfake => &[SubmissionKind::Image, SubmissionKind::Video],
            ScanMode::Phishing => &[SubmissionKind::Url, SubmissionKind::Text],
        }
    }

    pub fn default_tab(self) -> SubmissionKind {
        self.tabs()[0]
    }

    pub fn toggled(self) -> Self {
        match self {
            ScanMode::Deepfake => ScanMode::Phishing,
            ScanMode::Phishing => ScanMode::Deepfake,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScanMode::Deepfake => "deepfake",
            ScanMode::Phishing => "phishing",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScanMode::Deepfake => "DEEPFAKE",
            ScanMode::Phishing => "PHISHING",
        }
    }

    pub fn tagline(self) -> &'static str {
        match self {
            ScanMode::Deepfake => "Upload image or video to analyze for deepfake manipulations",
            ScanMode::Phishing => "Enter website URL or mail to check for phishing attempts",
        }
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionKind {
    Image,
    Video,
    Url,
    Text,
}

impl SubmissionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionKind::Image => "image",
            SubmissionKind::Video => "video",
            SubmissionKind::Url => "url",
            SubmissionKind::Text => "text",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SubmissionKind::Image => "Image",
            SubmissionKind::Video => "Video",
            SubmissionKind::Url => "Website URL",
            SubmissionKind::Text => "Mail",
        }
    }

    pub fn is_file(self) -> bool {
        matches!(self, SubmissionKind::Image | SubmissionKind::Video)
    }

    pub fn upload_hint(self) -> Option<&'static str> {
        match self {
            SubmissionKind::Image => Some("PNG, JPG, GIF up to 10MB"),
            SubmissionKind::Video => Some("MP4, MOV, AVI up to 100MB"),
            SubmissionKind::Url | SubmissionKind::Text => None,
        }
    }

    /// Upload size limit for file kinds.
    pub fn max_upload_bytes(self) -> Option<u64> {
        match self {
            SubmissionKind::Image => Some(10 * 1024 * 1024),
            SubmissionKind::Video => Some(100 * 1024 * 1024),
            SubmissionKind::Url | SubmissionKind::Text => None,
        }
    }

    /// Message shown when a failure carries no text of its own.
    pub fn failure_message(self) -> &'static str {
        match self {
            SubmissionKind::Image | SubmissionKind::Video => "Failed to analyze file",
            SubmissionKind::Url => "Failed to analyze URL",
            SubmissionKind::Text => "Failed to analyze text",
        }
    }
}

impl fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    File { path: PathBuf, name: String },
    Url(String),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub kind: SubmissionKind,
    pub payload: Payload,
    pub mode: ScanMode,
}

impl SubmissionRequest {
    pub fn meta(&self) -> SubmissionMeta {
        let subject = match &self.payload {
            Payload::File { name, .. } => name.clone(),
            Payload::Url(url) => url.clone(),
            Payload::Text(text) => text.clone(),
        };
        SubmissionMeta {
            kind: self.kind,
            subject,
            mode: self.mode,
        }
    }
}

/// What a submission announced when it started: kind, file name / URL / text, mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionMeta {
    pub kind: SubmissionKind,
    pub subject: String,
    pub mode: ScanMode,
}

impl fmt::Display for SubmissionMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = match self.kind {
            SubmissionKind::Image | SubmissionKind::Video => "file",
            SubmissionKind::Url => "url",
            SubmissionKind::Text => "text_len",
        };
        if self.kind == SubmissionKind::Text {
            write!(
                f,
                "type={} {}={} scan_mode={}",
                self.kind,
                field,
                self.subject.len(),
                self.mode
            )
        } else {
            write!(
                f,
                "type={} {}={} scan_mode={}",
                self.kind, field, self.subject, self.mode
            )
        }
    }
}

/// Opaque token for a deferred analysis.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(String);

impl JobId {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeepfakeVerdict {
    Real,
    Fake,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhishingVerdict {
    Safe,
    Legitimate,
    Phishing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeepfakeFindings {
    pub verdict: DeepfakeVerdict,
    pub manipulation_score: f64,
    pub inconsistencies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhishingFindings {
    pub verdict: PhishingVerdict,
    pub risk_score: f64,
    pub suspicious_elements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Findings {
    Deepfake(DeepfakeFindings),
    Phishing(PhishingFindings),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    /// Percentage in `[0, 100]`.
    pub confidence: f64,
    pub findings: Findings,
}

impl AnalysisResult {
    pub fn mode(&self) -> ScanMode {
        match self.findings {
            Findings::Deepfake(_) => ScanMode::Deepfake,
            Findings::Phishing(_) => ScanMode::Phishing,
        }
    }

    pub fn verdict_str(&self) -> &'static str {
        match &self.findings {
            Findings::Deepfake(d) => match d.verdict {
                DeepfakeVerdict::Real => "real",
                DeepfakeVerdict::Fake => "fake",
            },
            Findings::Phishing(p) => match p.verdict {
                PhishingVerdict::Safe => "safe",
                PhishingVerdict::Legitimate => "legitimate",
                PhishingVerdict::Phishing => "phishing",
            },
        }
    }

    pub fn is_suspicious(&self) -> bool {
        match &self.findings {
            Findings::Deepfake(d) => d.verdict == DeepfakeVerdict::Fake,
            Findings::Phishing(p) => p.verdict == PhishingVerdict::Phishing,
        }
    }

    pub fn headline(&self) -> &'static str {
        match &self.findings {
            Findings::Deepfake(d) if d.verdict == DeepfakeVerdict::Fake => {
                "Likely Deepfake Detected"
            }
            Findings::Phishing(p) if p.verdict == PhishingVerdict::Phishing => {
                "Likely Phishing Detected"
            }
            _ => "Content Appears Legitimate",
        }
    }
}

/// What a submission resolved to: a verdict now, or a job to poll.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Immediate(AnalysisResult),
    Deferred(JobId),
}

impl AnalysisOutcome {
    pub fn job_id(&self) -> Option<&JobId> {
        match self {
            AnalysisOutcome::Deferred(job_id) => Some(job_id),
            AnalysisOutcome::Immediate(_) => None,
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            AnalysisOutcome::Immediate(result) => Some(result),
            AnalysisOutcome::Deferred(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mode_defaults_to_its_first_tab() {
        assert_eq!(ScanMode::Deepfake.default_tab(), SubmissionKind::Image);
        assert_eq!(ScanMode::Phishing.default_tab(), SubmissionKind::Url);
        assert_eq!(ScanMode::Deepfake.toggled(), ScanMode::Phishing);
    }

    #[test]
    fn text_meta_logs_length_not_content() {
        let request = SubmissionRequest {
            kind: SubmissionKind::Text,
            payload: Payload::Text("click here now".to_string()),
            mode: ScanMode::Phishing,
        };
        assert_eq!(
            request.meta().to_string(),
            "type=text text_len=14 scan_mode=phishing"
        );
    }

    #[test]
    fn headline_follows_verdict_not_mode() {
        let result = AnalysisResult {
            confidence: 50.0,
            findings: Findings::Phishing(PhishingFindings {
                verdict: PhishingVerdict::Legitimate,
                risk_score: 10.0,
                suspicious_elements: Vec::new(),
            }),
        };
        assert!(!result.is_suspicious());
        assert_eq!(result.headline(), "Content Appears Legitimate");
        assert_eq!(result.verdict_str(), "legitimate");
    }
}
