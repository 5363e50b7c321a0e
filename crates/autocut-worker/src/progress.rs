//! Progress sinks.
//!
//! The pipeline reports through one narrow capability; the host decides
//! what a report becomes (a channel send, a log line, nothing). Sinks
//! must never block the pipeline: a slow or disconnected subscriber is
//! the subscriber's problem.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc;
use tracing::info;

use autocut_models::ProgressUpdate;

/// Capability the orchestrator calls at fixed checkpoints.
pub trait ProgressSink: Send + Sync {
    /// Report progress (0-100) with a human-readable stage label.
    fn report(&self, progress: f64, message: &str);
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl ProgressSink for NoopSink {
    fn report(&self, _progress: f64, _message: &str) {}
}

/// Sink that logs each checkpoint.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ProgressSink for LogSink {
    fn report(&self, progress: f64, message: &str) {
        info!(progress = format!("{progress:.0}%"), "{message}");
    }
}

/// Sink that forwards updates over an unbounded channel.
///
/// The send never blocks; once the receiver is gone, updates are
/// silently dropped so a vanished subscriber cannot stall detection.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<ProgressUpdate>,
}

impl ChannelSink {
    /// Create a sink and the receiving end for the subscriber.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ProgressUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ProgressSink for ChannelSink {
    fn report(&self, progress: f64, message: &str) {
        let _ = self.tx.send(ProgressUpdate::new(progress, message));
    }
}

/// Wrapper that makes any sink monotonic non-decreasing.
///
/// The pipeline promises callers a progress bar that never moves
/// backwards; this enforces it regardless of stage ordering bugs.
pub struct MonotonicSink<'a> {
    inner: &'a dyn ProgressSink,
    last_bits: AtomicU64,
}

impl<'a> MonotonicSink<'a> {
    pub fn new(inner: &'a dyn ProgressSink) -> Self {
        Self {
            inner,
            last_bits: AtomicU64::new(0f64.to_bits()),
        }
    }
}

impl ProgressSink for MonotonicSink<'_> {
    fn report(&self, progress: f64, message: &str) {
        let last = f64::from_bits(self.last_bits.load(Ordering::Relaxed));
        let clamped = progress.clamp(0.0, 100.0).max(last);
        self.last_bits.store(clamped.to_bits(), Ordering::Relaxed);
        self.inner.report(clamped, message);
    }
}
