//! Job store.
//!
//! The pipeline takes no dependency on job persistence; the runner
//! records lifecycle transitions through this narrow interface and a
//! host may back it with whatever storage it has. The in-memory store
//! is the default and is safe under concurrent jobs.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use autocut_models::{Job, JobId, JobState};

use crate::error::{WorkerError, WorkerResult};

/// Persistence interface for job bookkeeping.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Insert or replace a job record.
    async fn put(&self, job: Job);

    /// Fetch a job by id.
    async fn get(&self, id: &JobId) -> Option<Job>;

    /// Apply a transition to a stored job and return the updated record.
    async fn update(&self, id: &JobId, f: Box<dyn FnOnce(Job) -> Job + Send>)
        -> WorkerResult<Job>;

    /// List all known jobs.
    async fn list(&self) -> Vec<Job>;
}

/// Concurrency-safe in-process store.
#[derive(Debug, Default, Clone)]
pub struct MemoryJobStore {
    jobs: Arc<RwLock<HashMap<JobId, Job>>>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count of jobs currently in a non-terminal state.
    pub async fn active_count(&self) -> usize {
        self.jobs
            .read()
            .await
            .values()
            .filter(|j| !j.state.is_terminal())
            .count()
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn put(&self, job: Job) {
        self.jobs.write().await.insert(job.id.clone(), job);
    }

    async fn get(&self, id: &JobId) -> Option<Job> {
        self.jobs.read().await.get(id).cloned()
    }

    async fn update(
        &self,
        id: &JobId,
        f: Box<dyn FnOnce(Job) -> Job + Send>,
    ) -> WorkerResult<Job> {
        let mut jobs = self.jobs.write().await;
        let job = jobs
            .remove(id)
            .ok_or_else(|| WorkerError::JobNotFound(id.clone()))?;
        let updated = f(job);
        jobs.insert(id.clone(), updated.clone());
        Ok(updated)
    }

    async fn list(&self) -> Vec<Job> {
        self.jobs.read().await.values().cloned().collect()
    }
}

/// Convenience: set only the state of a job.
pub async fn update_status(
    store: &dyn JobStore,
    id: &JobId,
    state: JobState,
) -> WorkerResult<Job> {
    store
        .update(
            id,
            Box::new(move |mut job| {
                job.state = state;
                job
            }),
        )
        .await
}
