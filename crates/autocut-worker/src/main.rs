//! AutoCut worker binary.
//!
//! Processes one video given on the command line and prints the final
//! report as JSON. Configuration comes from the environment.

use std::sync::Arc;

use anyhow::{bail, Context};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use autocut_models::{Job, ProcessingOptions};
use autocut_worker::{JobRunner, JobStore, LogSink, MemoryJobStore, WorkerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("autocut=info"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(true).with_target(true))
            .with(env_filter)
            .init();
    }

    let Some(video_path) = std::env::args().nth(1) else {
        bail!("usage: autocut-worker <video-path>");
    };

    let config = WorkerConfig::from_env();
    info!("Worker config: {:?}", config);

    let store = Arc::new(MemoryJobStore::new());
    let runner = JobRunner::new(config, store.clone());

    let job = Job::new(&video_path, ProcessingOptions::default());
    let job_id = job.id.clone();
    store.put(job).await;
    info!(job_id = %job_id, video = %video_path, "Job submitted");

    let report = runner
        .execute(job_id, None, Arc::new(LogSink))
        .await
        .context("processing failed")?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
