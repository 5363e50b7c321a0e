//! Transcription records supplied by the external speech-to-text engine.
//!
//! Segments enter the system as loosely shaped engine output; validation
//! happens here at the boundary so downstream code only ever sees
//! well-formed timing.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One transcribed span of speech.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TranscriptSegment {
    /// Start in seconds
    pub start_s: f64,
    /// End in seconds
    pub end_s: f64,
    /// Transcribed text
    pub text: String,
}

impl TranscriptSegment {
    /// Create a segment.
    pub fn new(start_s: f64, end_s: f64, text: impl Into<String>) -> Self {
        Self {
            start_s,
            end_s,
            text: text.into(),
        }
    }

    /// Start in milliseconds, truncated.
    pub fn start_ms(&self) -> u64 {
        (self.start_s * 1000.0) as u64
    }

    /// End in milliseconds, truncated.
    pub fn end_ms(&self) -> u64 {
        (self.end_s * 1000.0) as u64
    }

    /// Duration in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.end_ms().saturating_sub(self.start_ms())
    }

    /// Shape check for engine output: finite, non-negative, end after start.
    pub fn is_valid(&self) -> bool {
        self.start_s.is_finite()
            && self.end_s.is_finite()
            && self.start_s >= 0.0
            && self.end_s > self.start_s
    }
}

/// A full transcription: ordered segments plus the detected language.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Transcript {
    /// Language code reported by the engine (e.g. "fr")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Ordered transcript segments
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    /// Create a transcript from segments.
    pub fn new(segments: Vec<TranscriptSegment>) -> Self {
        Self {
            language: None,
            segments,
        }
    }

    /// Set the language code.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Concatenated text of all segments.
    pub fn full_text(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.trim())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Drop segments that fail the boundary shape check.
    pub fn retain_valid(mut self) -> Self {
        self.segments.retain(TranscriptSegment::is_valid);
        self
    }
}
