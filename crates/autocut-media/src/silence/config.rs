//! Configuration for silence detection.

use serde::{Deserialize, Serialize};

/// Configuration for the energy-threshold silence scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SilenceConfig {
    /// Level floor in dBFS; a window at or below this is a silence candidate.
    ///
    /// - Higher values (-30 dB): aggressive, quiet speech may be cut
    /// - Default (-40 dB): balanced for voice recordings
    /// - Lower values (-50 dB): only near-digital silence is cut
    pub threshold_db: f64,

    /// Minimum duration before a sub-threshold run counts as silence
    /// (milliseconds). Shorter runs stay classified as speech.
    pub min_silence_ms: u64,

    /// Scan window in milliseconds. Smaller is more accurate and slower.
    pub scan_step_ms: u64,
}

impl Default for SilenceConfig {
    fn default() -> Self {
        Self {
            threshold_db: -40.0,
            min_silence_ms: 500,
            scan_step_ms: 10,
        }
    }
}

impl SilenceConfig {
    /// Builder-style setter for the threshold.
    pub fn with_threshold_db(mut self, db: f64) -> Self {
        self.threshold_db = db;
        self
    }

    /// Builder-style setter for the minimum silence duration.
    pub fn with_min_silence_ms(mut self, ms: u64) -> Self {
        self.min_silence_ms = ms.max(1);
        self
    }

    /// Builder-style setter for the scan step.
    pub fn with_scan_step_ms(mut self, ms: u64) -> Self {
        self.scan_step_ms = ms.max(1);
        self
    }
}
