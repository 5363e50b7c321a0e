//! Shared data models for the AutoCut backend.
//!
//! This crate provides Serde-serializable types for:
//! - Half-open millisecond intervals and the interval algebra
//! - Transcript segments from the speech-to-text engine
//! - Cut plans, filler spans, and derived statistics
//! - Jobs and their lifecycle state machine
//! - Progress events pushed to the notification channel

pub mod interval;
pub mod job;
pub mod options;
pub mod plan;
pub mod progress;
pub mod report;
pub mod transcript;

// Re-export common types
pub use interval::{
    clamp_to_duration, complement, merge_overlapping, total_duration, Interval, IntervalError,
    IntervalResult,
};
pub use job::{Job, JobId, JobState};
pub use options::ProcessingOptions;
pub use plan::{CutPlan, CutStatistics, FillerSpan};
pub use progress::ProgressUpdate;
pub use report::{ExportPaths, ProcessingReport};
pub use transcript::{Transcript, TranscriptSegment};
