//! Cut plan: the merged edit decision produced for one processing job.
//!
//! A plan is assembled once by the cut merger, is immutable afterwards,
//! and is the single input both timeline exporters read from.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::interval::{total_duration, Interval};

/// A filler-word occurrence located in the transcript, before padding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FillerSpan {
    /// Start in milliseconds
    pub start_ms: u64,
    /// End in milliseconds
    pub end_ms: u64,
    /// The matched text (e.g. "euh")
    pub text: String,
    /// Index of the transcript segment the match came from
    pub source_segment: usize,
}

impl FillerSpan {
    /// The span as an interval.
    pub fn interval(&self) -> Interval {
        Interval {
            start_ms: self.start_ms,
            end_ms: self.end_ms,
        }
    }

    /// Duration in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }
}

/// The merged cut decision for one job.
///
/// `merged_cuts` is the overlap-merged union of `silence_intervals` and
/// the padded `filler_intervals`; `keep_intervals` is its exact
/// complement over `[0, total_duration_ms)`. Together they tile the
/// whole timeline with no gaps and no overlaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CutPlan {
    /// Detected silences, unpadded
    pub silence_intervals: Vec<Interval>,
    /// Detected filler words after padding and clamping
    pub filler_intervals: Vec<Interval>,
    /// Authoritative cut list
    pub merged_cuts: Vec<Interval>,
    /// Material retained in the final edit
    pub keep_intervals: Vec<Interval>,
    /// Source duration in milliseconds
    pub total_duration_ms: u64,
}

impl CutPlan {
    /// Derive the summary statistics reported to the job status channel.
    pub fn statistics(&self) -> CutStatistics {
        let removed_ms = total_duration(&self.merged_cuts);
        let kept_ms = total_duration(&self.keep_intervals);
        let percentage_saved = if self.total_duration_ms == 0 {
            0.0
        } else {
            removed_ms as f64 / self.total_duration_ms as f64 * 100.0
        };

        CutStatistics {
            total_cuts: self.keep_intervals.len(),
            silence_periods_removed: self.silence_intervals.len(),
            filler_words_removed: self.filler_intervals.len(),
            kept_duration_seconds: kept_ms as f64 / 1000.0,
            removed_duration_seconds: removed_ms as f64 / 1000.0,
            percentage_saved,
        }
    }

    /// Whether the plan keeps nothing (fully silent source).
    pub fn is_empty(&self) -> bool {
        self.keep_intervals.is_empty()
    }
}

/// Summary statistics derived from a [`CutPlan`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CutStatistics {
    /// Number of kept segments placed on the output timeline
    pub total_cuts: usize,
    /// Number of silence periods removed
    pub silence_periods_removed: usize,
    /// Number of filler words removed
    pub filler_words_removed: usize,
    /// Total kept duration in seconds
    pub kept_duration_seconds: f64,
    /// Total removed duration in seconds
    pub removed_duration_seconds: f64,
    /// Removed / total, as a percentage; 0 for an empty source
    pub percentage_saved: f64,
}
