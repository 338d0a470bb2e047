//! CyberWare engine: analysis backends and effect execution.
mod analyzer;
mod engine;
mod http;
mod poller;
mod simulated;
mod types;

pub use analyzer::Analyzer;
pub use engine::EngineHandle;
pub use http::{HttpAnalyzer, HttpSettings};
pub use poller::{ChannelProgressSink, PollSettings, PollTask, ProgressSink};
pub use simulated::{RandomVerdicts, SimulatedAnalyzer, SimulatedSettings, VerdictSource};
pub use types::{AnalysisError, EngineEvent, JobStatus};
