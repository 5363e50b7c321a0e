//! Worker configuration.

use std::time::Duration;

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Maximum concurrent jobs
    pub max_concurrent_jobs: usize,
    /// Work directory for extracted audio and other temporaries
    pub work_dir: String,
    /// Directory receiving the exported timeline documents
    pub output_dir: String,
    /// Sample rate for audio extraction
    pub audio_sample_rate: u32,
    /// Job timeout
    pub job_timeout: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_jobs: 2,
            work_dir: "/tmp/autocut".to_string(),
            output_dir: "/tmp/autocut/exports".to_string(),
            audio_sample_rate: 44_100,
            job_timeout: Duration::from_secs(3600),
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            max_concurrent_jobs: std::env::var("AUTOCUT_MAX_JOBS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
            work_dir: std::env::var("AUTOCUT_WORK_DIR")
                .unwrap_or_else(|_| "/tmp/autocut".to_string()),
            output_dir: std::env::var("AUTOCUT_OUTPUT_DIR")
                .unwrap_or_else(|_| "/tmp/autocut/exports".to_string()),
            audio_sample_rate: std::env::var("AUTOCUT_SAMPLE_RATE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(44_100),
            job_timeout: Duration::from_secs(
                std::env::var("AUTOCUT_JOB_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(3600),
            ),
        }
    }
}
