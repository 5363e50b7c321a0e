//! Job bookkeeping for the processing worker.
//!
//! The job record moves through a small state machine:
//! `uploaded -> processing -> completed | failed`. Terminal states are
//! final; there are no retries at this layer.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

use crate::options::ProcessingOptions;
use crate::report::ProcessingReport;

/// Unique identifier for a job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Generate a new random job ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Job lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    /// Video received, not yet picked up by a worker
    #[default]
    Uploaded,
    /// Pipeline is running
    Processing,
    /// Pipeline finished, report available
    Completed,
    /// Pipeline aborted with an error
    Failed,
}

impl JobState {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobState::Uploaded => "uploaded",
            JobState::Processing => "processing",
            JobState::Completed => "completed",
            JobState::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Completed | JobState::Failed)
    }
}

/// A silence-cutting job.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Job {
    /// Unique job ID
    pub id: JobId,

    /// Source video path
    pub video_path: PathBuf,

    /// Processing options
    pub options: ProcessingOptions,

    /// Lifecycle state
    #[serde(default)]
    pub state: JobState,

    /// Progress (0-100)
    #[serde(default)]
    pub progress: f64,

    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// Final report (if completed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ProcessingReport>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Create a job for a freshly uploaded video.
    pub fn new(video_path: impl Into<PathBuf>, options: ProcessingOptions) -> Self {
        let now = Utc::now();
        Self {
            id: JobId::new(),
            video_path: video_path.into(),
            options,
            state: JobState::Uploaded,
            progress: 0.0,
            error_message: None,
            result: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Start processing the job.
    pub fn start(mut self) -> Self {
        self.state = JobState::Processing;
        self.updated_at = Utc::now();
        self
    }

    /// Mark job as completed with its final report.
    pub fn complete(mut self, result: ProcessingReport) -> Self {
        self.state = JobState::Completed;
        self.progress = 100.0;
        self.result = Some(result);
        self.updated_at = Utc::now();
        self
    }

    /// Mark job as failed.
    pub fn fail(mut self, error: impl Into<String>) -> Self {
        self.state = JobState::Failed;
        self.error_message = Some(error.into());
        self.updated_at = Utc::now();
        self
    }

    /// Update progress, clamped to 0-100.
    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = progress.clamp(0.0, 100.0);
        self.updated_at = Utc::now();
        self
    }
}
