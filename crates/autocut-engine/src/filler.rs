//! Filler-word detection over transcript segments.
//!
//! Matches verbal hesitations in French transcripts: interjections
//! ("euh", "hum"), discourse tics ("ben", "bah"), hesitation phrases,
//! stutter repetitions, and annotated breathing sounds. A whole segment
//! whose text matches is flagged outright; at sensitivity 0.5 and above
//! multi-word segments are additionally scanned word by word, with each
//! word's timespan estimated by splitting the segment duration evenly
//! across its words. That split is an approximation, not an alignment.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use autocut_models::{FillerSpan, Interval, Transcript};

use crate::error::EngineResult;

/// Built-in hesitation patterns for French speech.
const FILLER_PATTERNS: &[&str] = &[
    // "Euh" variations
    r"\b(?:euh+|heu+|eu+h*|uh+)\b",
    // "Hum" variations
    r"\b(?:hum+|hmm+|mm+h*|mh+)\b",
    // "Ben" and "Bah"
    r"\b(?:ben|bah|beh)\b",
    // Common hesitation phrases
    r"\b(?:alors\s+euh+|donc\s+euh+|et\s+euh+)\b",
    r"\b(?:comment\s+dire|disons|voilà)\b",
    // Annotated breathing sounds
    r"\[(?:breath|respiration)\]",
];

/// Sensitivity level at which the per-word pass is enabled.
const WORD_SCAN_SENSITIVITY: f64 = 0.5;

/// Configuration for filler detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillerConfig {
    /// Detection sensitivity in `[0, 1]`; >= 0.5 enables word-level scanning
    pub sensitivity: f64,
    /// Segments shorter than this are skipped entirely (milliseconds)
    pub min_duration_ms: u64,
    /// Extra regex patterns matched alongside the built-in set
    pub custom_patterns: Vec<String>,
}

impl Default for FillerConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.7,
            min_duration_ms: 100,
            custom_patterns: Vec::new(),
        }
    }
}

impl FillerConfig {
    /// Builder-style setter for sensitivity.
    pub fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        self.sensitivity = sensitivity.clamp(0.0, 1.0);
        self
    }

    /// Builder-style setter for the minimum segment duration.
    pub fn with_min_duration_ms(mut self, ms: u64) -> Self {
        self.min_duration_ms = ms;
        self
    }

    /// Add a custom pattern.
    pub fn with_custom_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.custom_patterns.push(pattern.into());
        self
    }
}

/// Result of a filler scan.
#[derive(Debug, Clone, Default)]
pub struct FillerScan {
    /// Matched spans with text and source segment, in transcript order
    pub spans: Vec<FillerSpan>,
    /// The same spans as unpadded intervals
    pub filler_periods: Vec<Interval>,
}

impl FillerScan {
    fn push(&mut self, span: FillerSpan) {
        if span.end_ms > span.start_ms {
            self.filler_periods.push(span.interval());
            self.spans.push(span);
        }
    }
}

/// Detects filler words in transcript segments.
pub struct FillerDetector {
    patterns: Vec<Regex>,
    sensitivity: f64,
    min_duration_ms: u64,
}

impl FillerDetector {
    /// Compile the pattern set for the given configuration.
    pub fn new(config: &FillerConfig) -> EngineResult<Self> {
        let mut patterns = Vec::with_capacity(FILLER_PATTERNS.len() + config.custom_patterns.len());
        for pattern in FILLER_PATTERNS
            .iter()
            .copied()
            .chain(config.custom_patterns.iter().map(String::as_str))
        {
            patterns.push(
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()?,
            );
        }

        Ok(Self {
            patterns,
            sensitivity: config.sensitivity,
            min_duration_ms: config.min_duration_ms,
        })
    }

    /// Scan a transcript for filler words.
    ///
    /// Finding nothing is not an error; the scan comes back empty.
    pub fn detect(&self, transcript: &Transcript) -> FillerScan {
        let mut scan = FillerScan::default();

        for (idx, segment) in transcript.segments.iter().enumerate() {
            let text = segment.text.trim();
            let start_ms = segment.start_ms();
            let duration_ms = segment.duration_ms();

            // Too short to split or to hold a useful filler
            if duration_ms < self.min_duration_ms {
                continue;
            }

            if self.is_filler(text) {
                debug!(segment = idx, text, "Filler segment");
                scan.push(FillerSpan {
                    start_ms,
                    end_ms: segment.end_ms(),
                    text: text.to_string(),
                    source_segment: idx,
                });
                continue;
            }

            let words: Vec<&str> = text.split_whitespace().collect();
            if self.sensitivity >= WORD_SCAN_SENSITIVITY && words.len() > 1 {
                let word_duration = duration_ms as f64 / words.len() as f64;

                for (i, word) in words.iter().enumerate() {
                    if self.matches_pattern(word) {
                        let word_start_ms = start_ms + (i as f64 * word_duration) as u64;
                        let word_end_ms = word_start_ms + word_duration as u64;

                        debug!(segment = idx, word, word_start_ms, "Filler word");
                        scan.push(FillerSpan {
                            start_ms: word_start_ms,
                            end_ms: word_end_ms,
                            text: (*word).to_string(),
                            source_segment: idx,
                        });
                    }
                }
            }
        }

        debug!(fillers = scan.spans.len(), "Filler scan complete");
        scan
    }

    /// Whether a whole segment is a filler: its full text is a filler
    /// pattern, or it stutters. A filler word buried inside a longer
    /// sentence is the word-level pass's job, not this one's.
    fn is_filler(&self, text: &str) -> bool {
        self.matches_full(text) || has_stutter(text)
    }

    /// Full-text pattern match, tolerant of surrounding punctuation.
    fn matches_full(&self, text: &str) -> bool {
        let core = text.trim_matches(|c: char| !c.is_alphanumeric());
        self.patterns
            .iter()
            .any(|p| full_match(p, text) || full_match(p, core))
    }

    fn matches_pattern(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
    }
}

/// Whether the pattern matches `text` in its entirety.
fn full_match(pattern: &Regex, text: &str) -> bool {
    !text.is_empty()
        && pattern
            .find(text)
            .is_some_and(|m| m.start() == 0 && m.end() == text.len())
}

/// Detect immediate repetition of an identical word ("je je", "le le").
///
/// The regex crate has no backreferences, so repetition is checked by
/// comparing adjacent normalized words.
fn has_stutter(text: &str) -> bool {
    let words: Vec<String> = text
        .split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect();

    words.windows(2).any(|pair| pair[0] == pair[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use autocut_models::TranscriptSegment;

    fn detector(sensitivity: f64) -> FillerDetector {
        FillerDetector::new(&FillerConfig::default().with_sensitivity(sensitivity)).unwrap()
    }

    fn transcript(segments: Vec<TranscriptSegment>) -> Transcript {
        Transcript::new(segments)
    }

    #[test]
    fn test_whole_segment_interjection() {
        let scan = detector(0.7).detect(&transcript(vec![TranscriptSegment::new(
            1.9, 2.1, "euh",
        )]));

        assert_eq!(scan.spans.len(), 1);
        assert_eq!(scan.spans[0].start_ms, 1900);
        assert_eq!(scan.spans[0].end_ms, 2100);
        assert_eq!(scan.spans[0].text, "euh");
        assert_eq!(scan.spans[0].source_segment, 0);
    }

    #[test]
    fn test_variants_match() {
        let det = detector(0.7);
        for text in ["Euh", "heuuu", "hmm", "mmh", "bah", "voilà", "comment dire"] {
            let scan = det.detect(&transcript(vec![TranscriptSegment::new(0.0, 1.0, text)]));
            assert_eq!(scan.spans.len(), 1, "{text} should match");
        }
    }

    #[test]
    fn test_clean_speech_matches_nothing() {
        let scan = detector(0.7).detect(&transcript(vec![TranscriptSegment::new(
            0.0,
            2.0,
            "on passe maintenant au montage",
        )]));
        assert!(scan.spans.is_empty());
        assert!(scan.filler_periods.is_empty());
    }

    #[test]
    fn test_stutter_repetition() {
        let scan = detector(0.7).detect(&transcript(vec![TranscriptSegment::new(
            0.0, 1.0, "je je pense",
        )]));
        assert_eq!(scan.spans.len(), 1);
    }

    #[test]
    fn test_embedded_filler_does_not_flag_whole_segment() {
        // "euh" inside a sentence is a word-level hit, not a
        // whole-segment one; only the word's estimated span is cut
        let scan = detector(0.7).detect(&transcript(vec![TranscriptSegment::new(
            0.0,
            2.0,
            "alors euh je pense",
        )]));

        assert_eq!(scan.spans.len(), 1);
        assert_eq!(scan.spans[0].text, "euh");
        assert!(scan.spans[0].duration_ms() < 2000);
    }

    #[test]
    fn test_punctuated_interjection_still_matches() {
        let scan = detector(0.7).detect(&transcript(vec![TranscriptSegment::new(
            0.0, 1.0, "Euh...",
        )]));
        assert_eq!(scan.spans.len(), 1);
    }

    #[test]
    fn test_word_level_scan_with_even_split() {
        // Four words over 4s: each word gets ~1s, "euh" is the third
        let scan = detector(0.7).detect(&transcript(vec![TranscriptSegment::new(
            10.0,
            14.0,
            "on va euh continuer",
        )]));

        assert_eq!(scan.spans.len(), 1);
        assert_eq!(scan.spans[0].text, "euh");
        assert_eq!(scan.spans[0].start_ms, 12000);
        assert_eq!(scan.spans[0].end_ms, 13000);
    }

    #[test]
    fn test_low_sensitivity_skips_word_scan() {
        let scan = detector(0.3).detect(&transcript(vec![TranscriptSegment::new(
            10.0,
            14.0,
            "on va euh continuer",
        )]));
        assert!(scan.spans.is_empty());
    }

    #[test]
    fn test_short_segments_skipped() {
        // 50ms segment, below the 100ms default minimum
        let scan = detector(0.7).detect(&transcript(vec![TranscriptSegment::new(
            0.0, 0.05, "euh",
        )]));
        assert!(scan.spans.is_empty());
    }

    #[test]
    fn test_custom_pattern() {
        let det = FillerDetector::new(
            &FillerConfig::default().with_custom_pattern(r"\b(?:genre)\b"),
        )
        .unwrap();
        let scan = det.detect(&transcript(vec![TranscriptSegment::new(0.0, 1.0, "genre")]));
        assert_eq!(scan.spans.len(), 1);
    }

    #[test]
    fn test_invalid_custom_pattern_rejected() {
        let result = FillerDetector::new(&FillerConfig::default().with_custom_pattern("(unclosed"));
        assert!(result.is_err());
    }

    #[test]
    fn test_has_stutter_ignores_case_and_punctuation() {
        assert!(has_stutter("Le, le montage"));
        assert!(!has_stutter("le montage le"));
        assert!(!has_stutter("euh"));
    }
}
