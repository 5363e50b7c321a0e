//! Worker error types.

use thiserror::Error;

use autocut_models::JobId;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    /// Filler detection or subtitle output requested without a transcript.
    /// Checked before the stage starts, never raised mid-stage.
    #[error("Transcription required but not available")]
    TranscriptionUnavailable,

    #[error("Job not found: {0}")]
    JobNotFound(JobId),

    #[error("Job failed: {0}")]
    JobFailed(String),

    #[error("Job timed out after {0} seconds")]
    JobTimeout(u64),

    #[error("Media error: {0}")]
    Media(#[from] autocut_media::MediaError),

    #[error("Engine error: {0}")]
    Engine(#[from] autocut_engine::EngineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WorkerError {
    pub fn job_failed(msg: impl Into<String>) -> Self {
        Self::JobFailed(msg.into())
    }
}
