//! Progress events pushed to the notification channel.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A progress event for one job, suitable for fan-out to subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProgressUpdate {
    /// Completion percentage (0-100)
    pub progress: f64,
    /// Human-readable stage label
    pub message: String,
    /// Emission timestamp
    pub timestamp: DateTime<Utc>,
}

impl ProgressUpdate {
    /// Create an update, clamping progress to 0-100.
    pub fn new(progress: f64, message: impl Into<String>) -> Self {
        Self {
            progress: progress.clamp(0.0, 100.0),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}
