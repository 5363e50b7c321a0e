//! Job runner.
//!
//! Owns the job lifecycle around the pipeline: store transitions,
//! per-job work directories, the concurrency cap, and the conversion of
//! any stage error into a terminal `failed` state with a readable
//! message. Terminal states are final; a failed job is resubmitted by
//! the host, never retried here.

use std::path::Path;
use std::sync::Arc;

use metrics::counter;
use tokio::sync::Semaphore;
use tracing::{error, info};

use autocut_models::{Job, JobId, ProcessingOptions, ProcessingReport, Transcript};

use crate::config::WorkerConfig;
use crate::error::{WorkerError, WorkerResult};
use crate::job_store::JobStore;
use crate::pipeline::Pipeline;
use crate::progress::ProgressSink;

/// Runs jobs against a store, bounded by a concurrency cap.
#[derive(Clone)]
pub struct JobRunner {
    config: WorkerConfig,
    store: Arc<dyn JobStore>,
    semaphore: Arc<Semaphore>,
}

impl JobRunner {
    /// Create a runner.
    pub fn new(config: WorkerConfig, store: Arc<dyn JobStore>) -> Self {
        let semaphore = Arc::new(Semaphore::new(config.max_concurrent_jobs));
        Self {
            config,
            store,
            semaphore,
        }
    }

    /// Register a job and process it in the background.
    ///
    /// Returns the job id immediately; completion is observed through
    /// the store and the progress sink.
    pub async fn submit(
        &self,
        video_path: impl Into<std::path::PathBuf>,
        options: ProcessingOptions,
        transcript: Option<Transcript>,
        sink: Arc<dyn ProgressSink>,
    ) -> JobId {
        let job = Job::new(video_path, options);
        let id = job.id.clone();
        self.store.put(job).await;

        let runner = self.clone();
        let job_id = id.clone();
        tokio::spawn(async move {
            let _ = runner.execute(job_id, transcript, sink).await;
        });

        id
    }

    /// Process a registered job to completion.
    pub async fn execute(
        &self,
        id: JobId,
        transcript: Option<Transcript>,
        sink: Arc<dyn ProgressSink>,
    ) -> WorkerResult<ProcessingReport> {
        let _permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| WorkerError::job_failed("runner shut down"))?;

        let job = self.store.update(&id, Box::new(Job::start)).await?;
        info!(job_id = %id, video = %job.video_path.display(), "Job started");

        let pipeline =
            Pipeline::new(job.options.clone()).with_sample_rate(self.config.audio_sample_rate);
        let work_dir = Path::new(&self.config.work_dir).join(id.as_str());
        let output_dir = Path::new(&self.config.output_dir).join(id.as_str());

        let outcome = match tokio::time::timeout(
            self.config.job_timeout,
            pipeline.run(
                &job.video_path,
                &work_dir,
                &output_dir,
                transcript.as_ref(),
                sink.as_ref(),
            ),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(WorkerError::JobTimeout(self.config.job_timeout.as_secs())),
        };

        match outcome {
            Ok(report) => {
                let saved = report.clone();
                self.store
                    .update(&id, Box::new(move |j| j.complete(saved)))
                    .await?;
                counter!("autocut_jobs_completed").increment(1);
                info!(job_id = %id, "Job completed");
                Ok(report)
            }
            Err(e) => {
                error!(job_id = %id, error = %e, "Job failed");
                let message = e.to_string();
                if let Err(store_err) = self
                    .store
                    .update(&id, Box::new(move |j| j.fail(message)))
                    .await
                {
                    error!(job_id = %id, error = %store_err, "Failed to record job failure");
                }
                counter!("autocut_jobs_failed").increment(1);
                Err(e)
            }
        }
    }
}
