//! Per-job processing options.
//!
//! Defaults mirror the upload form of the hosting service: -40 dB
//! threshold, 500 ms minimum silence, 100 ms padding, 30 fps export.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Tunable knobs for one processing job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProcessingOptions {
    /// Silence threshold in dBFS; windows at or below are silence candidates
    #[serde(default = "default_silence_threshold_db")]
    pub silence_threshold_db: f64,

    /// Minimum silence duration in milliseconds
    #[serde(default = "default_min_silence_duration_ms")]
    pub min_silence_duration_ms: u64,

    /// Scan window in milliseconds (coarseness vs. accuracy trade-off)
    #[serde(default = "default_scan_step_ms")]
    pub scan_step_ms: u64,

    /// Padding applied around filler-word cuts in milliseconds
    #[serde(default = "default_padding_ms")]
    pub padding_ms: u64,

    /// Frame rate used by the frame-based timeline export
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// Whether to run filler-word detection (requires a transcript)
    #[serde(default)]
    pub remove_fillers: bool,

    /// Filler detection sensitivity in `[0, 1]`; word-level scanning
    /// kicks in at 0.5 and above
    #[serde(default = "default_filler_sensitivity")]
    pub filler_sensitivity: f64,
}

fn default_silence_threshold_db() -> f64 {
    -40.0
}

fn default_min_silence_duration_ms() -> u64 {
    500
}

fn default_scan_step_ms() -> u64 {
    10
}

fn default_padding_ms() -> u64 {
    100
}

fn default_fps() -> u32 {
    30
}

fn default_filler_sensitivity() -> f64 {
    0.7
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            silence_threshold_db: default_silence_threshold_db(),
            min_silence_duration_ms: default_min_silence_duration_ms(),
            scan_step_ms: default_scan_step_ms(),
            padding_ms: default_padding_ms(),
            fps: default_fps(),
            remove_fillers: false,
            filler_sensitivity: default_filler_sensitivity(),
        }
    }
}

impl ProcessingOptions {
    /// Builder-style setter for the silence threshold.
    pub fn with_threshold_db(mut self, db: f64) -> Self {
        self.silence_threshold_db = db;
        self
    }

    /// Builder-style setter for the minimum silence duration.
    pub fn with_min_silence_ms(mut self, ms: u64) -> Self {
        self.min_silence_duration_ms = ms;
        self
    }

    /// Builder-style setter for cut padding.
    pub fn with_padding_ms(mut self, ms: u64) -> Self {
        self.padding_ms = ms;
        self
    }

    /// Builder-style setter for export frame rate.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Enable filler-word removal at the given sensitivity.
    pub fn with_filler_removal(mut self, sensitivity: f64) -> Self {
        self.remove_fillers = true;
        self.filler_sensitivity = sensitivity.clamp(0.0, 1.0);
        self
    }
}
